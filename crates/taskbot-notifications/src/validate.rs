//! Pure validation rules for notification operations. No I/O.

use chrono::{DateTime, Utc};
use taskbot_core::errors::ValidationError;

use crate::params::{CreateParams, UpdateParams};

/// On success returns the validated fire time, so the caller does not have
/// to re-unwrap a field the check already proved present.
pub fn create(params: &CreateParams) -> Result<DateTime<Utc>, ValidationError> {
    let mut empty = Vec::new();
    if params.notify_at.is_none() {
        empty.push("NotifyAt");
    }
    if params.task_id == 0 {
        empty.push("TaskID");
    }
    match params.notify_at {
        Some(notify_at) if empty.is_empty() => Ok(notify_at),
        _ => Err(ValidationError::EmptyRequiredFields(empty)),
    }
}

pub fn update(params: &UpdateParams) -> Result<(), ValidationError> {
    if params.notification_id == 0 {
        return Err(ValidationError::MissingId("NotificationID"));
    }
    if params.notify_at.is_none() && params.repeat_interval.is_none() {
        return Err(ValidationError::NothingToUpdate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use super::*;

    #[test]
    fn create_collects_all_missing_fields() {
        let err = create(&CreateParams::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyRequiredFields(vec!["NotifyAt", "TaskID"])
        );
    }

    #[test]
    fn create_accepts_valid_input() {
        let params = CreateParams {
            task_id: 3,
            notify_at: Some(Utc::now()),
            repeat_interval: TimeDelta::zero(),
        };
        assert!(create(&params).is_ok());
    }

    #[test]
    fn update_requires_notification_id() {
        let params = UpdateParams {
            notify_at: Some(Utc::now()),
            ..UpdateParams::default()
        };
        assert_eq!(
            update(&params).unwrap_err(),
            ValidationError::MissingId("NotificationID")
        );
    }

    #[test]
    fn update_requires_at_least_one_field() {
        let params = UpdateParams {
            notification_id: 5,
            ..UpdateParams::default()
        };
        assert_eq!(update(&params).unwrap_err(), ValidationError::NothingToUpdate);
    }

    #[test]
    fn update_accepts_interval_only() {
        let params = UpdateParams {
            notification_id: 5,
            repeat_interval: Some(TimeDelta::minutes(30)),
            ..UpdateParams::default()
        };
        assert!(update(&params).is_ok());
    }
}
