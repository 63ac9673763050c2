//! Parameter structs for the notification service.
//!
//! `notify_at` on creation is an `Option` so an omitted value is caught by
//! validation (and reported alongside other missing fields) instead of
//! being smuggled in as a sentinel timestamp.

use chrono::{DateTime, TimeDelta, Utc};

/// Input for [`crate::NotificationService::create`].
#[derive(Clone, Copy, Debug)]
pub struct CreateParams {
    /// The task the reminder belongs to; required, non-zero.
    pub task_id: i64,
    /// When the reminder fires; required.
    pub notify_at: Option<DateTime<Utc>>,
    /// Recurrence interval. Zero means "use the default" (one hour);
    /// anything below one minute is clamped up to one minute.
    pub repeat_interval: TimeDelta,
}

impl Default for CreateParams {
    fn default() -> Self {
        Self {
            task_id: 0,
            notify_at: None,
            repeat_interval: TimeDelta::zero(),
        }
    }
}

/// Input for [`crate::NotificationService::update`]. At least one field
/// must be set.
#[derive(Clone, Copy, Debug, Default)]
pub struct UpdateParams {
    /// The notification to update; required.
    pub notification_id: i64,
    /// New fire time, if set.
    pub notify_at: Option<DateTime<Utc>>,
    /// New recurrence interval, if set; the default/clamp rules are
    /// re-applied to the new value.
    pub repeat_interval: Option<TimeDelta>,
}
