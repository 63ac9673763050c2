//! Parameter structs for the task service.
//!
//! Update fields distinguish "omitted" from "explicitly set to empty":
//! `None` leaves the stored value untouched, `Some(value)` overwrites it.
//! The nullable `datetime` nests one more level so a caller can clear the
//! schedule (`Some(None)`) without clearing anything else.

use chrono::{DateTime, Utc};

/// Input for [`crate::TaskService::create`].
#[derive(Clone, Debug, Default)]
pub struct CreateParams {
    /// Task title; required, non-empty.
    pub title: String,
    /// Free-form description; may be empty.
    pub description: String,
    /// Optional scheduled point in time.
    pub datetime: Option<DateTime<Utc>>,
    /// Owning user; required, non-zero.
    pub user_id: i64,
}

/// Input for [`crate::TaskService::update`]. Only fields carrying `Some`
/// are merged into the stored task.
#[derive(Clone, Debug, Default)]
pub struct UpdateParams {
    /// The task to update; required.
    pub task_id: i64,
    /// New title, if set; must be non-empty when set.
    pub title: Option<String>,
    /// New description, if set.
    pub description: Option<String>,
    /// New schedule, if set; `Some(None)` clears it.
    pub datetime: Option<Option<DateTime<Utc>>>,
    /// New owner, if set; must be non-zero when set.
    pub user_id: Option<i64>,
    /// Completion flag. Unlike every other field this is **always**
    /// written, whether or not the caller meant to change it. Preserved
    /// from the original design; likely an inconsistency rather than
    /// intent, kept pending product input.
    pub done: bool,
}

/// Input for [`crate::TaskService::search_by_date_for_user`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchByDateParams {
    /// Inclusive lower bound on the task datetime.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the task datetime.
    pub to: Option<DateTime<Utc>>,
    /// Owning user; required, non-zero. At least one bound must be set.
    pub user_id: i64,
}
