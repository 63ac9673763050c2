//! Notification service: reminder CRUD and the upcoming-window query.
//!
//! Repeat intervals are normalized on every write that touches them: zero
//! becomes the one-hour default, anything positive below one minute is
//! clamped up to exactly one minute. The upcoming query is what an
//! external dispatcher polls; this layer never schedules or dispatches
//! anything itself.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{instrument, warn};

use taskbot_core::errors::ServiceError;
use taskbot_core::models::Notification;
use taskbot_core::repository::NotificationRepository;

use crate::params::{CreateParams, UpdateParams};
use crate::validate;

/// Apply the default/clamp rules to a repeat interval.
fn normalize_interval(interval: TimeDelta) -> TimeDelta {
    if interval.is_zero() {
        TimeDelta::hours(1)
    } else if interval < TimeDelta::minutes(1) {
        TimeDelta::minutes(1)
    } else {
        interval
    }
}

/// Notification service over abstract notification storage.
pub struct NotificationService<N> {
    notifications: N,
}

impl<N: NotificationRepository> NotificationService<N> {
    /// Create a service over the given repository.
    pub fn new(notifications: N) -> Self {
        Self { notifications }
    }

    /// Validate, normalize the repeat interval, and persist.
    #[instrument(skip(self, params), fields(task_id = params.task_id))]
    pub fn create(&self, params: CreateParams) -> Result<(), ServiceError> {
        let notify_at = validate::create(&params)?;

        let draft = Notification {
            id: 0,
            task_id: params.task_id,
            notify_at,
            repeat_interval: normalize_interval(params.repeat_interval),
            // storage stamps the real value
            created_at: Utc::now(),
        };
        let _ = self.notifications.create(draft).map_err(|err| {
            warn!(task_id = params.task_id, error = %err, "notification create failed");
            ServiceError::from(err)
        })?;
        Ok(())
    }

    /// Load the notification, merge the fields marked set, and persist.
    ///
    /// The default/clamp rules are re-applied only when `repeat_interval`
    /// is part of the update.
    #[instrument(skip(self, params), fields(notification_id = params.notification_id))]
    pub fn update(&self, params: UpdateParams) -> Result<(), ServiceError> {
        validate::update(&params)?;

        let mut notification = self
            .notifications
            .find_by_id(params.notification_id)
            .map_err(|err| {
                warn!(
                    notification_id = params.notification_id,
                    error = %err,
                    "notification lookup failed"
                );
                ServiceError::from(err)
            })?;

        if let Some(notify_at) = params.notify_at {
            notification.notify_at = notify_at;
        }
        if let Some(interval) = params.repeat_interval {
            notification.repeat_interval = normalize_interval(interval);
        }

        self.notifications.update(&notification).map_err(|err| {
            warn!(notification_id = notification.id, error = %err, "notification update failed");
            ServiceError::from(err)
        })
    }

    /// Delete one notification by ID.
    #[instrument(skip(self))]
    pub fn delete_by_id(&self, notification_id: i64) -> Result<(), ServiceError> {
        self.notifications.delete_by_id(notification_id).map_err(|err| {
            warn!(notification_id, error = %err, "notification delete failed");
            ServiceError::from(err)
        })
    }

    /// Notifications due up to the given horizon, ascending by fire time.
    ///
    /// With no horizon the window defaults to one minute from now, the
    /// cadence an external dispatcher polls at.
    #[instrument(skip(self))]
    pub fn upcoming(
        &self,
        up_to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Notification>, ServiceError> {
        let horizon = up_to.unwrap_or_else(|| Utc::now() + TimeDelta::minutes(1));
        self.notifications.upcoming(horizon).map_err(|err| {
            warn!(%horizon, error = %err, "upcoming fetch failed");
            ServiceError::from(err)
        })
    }
}
