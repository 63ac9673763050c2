//! Domain models for users, tasks, and notifications.
//!
//! IDs and creation timestamps are assigned by the storage backend; a model
//! built by a service carries `id = 0` until it crosses the repository
//! boundary.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// A registered user, identified externally by a Telegram account ID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identifier.
    pub id: i64,
    /// External chat identity; unique across users.
    pub telegram_id: i64,
    /// Creation timestamp, assigned by storage.
    pub created_at: DateTime<Utc>,
}

/// A to-do item owned by a user, optionally scheduled at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Short label; non-empty at creation.
    pub title: String,
    /// Free-form body; may be empty.
    pub description: String,
    /// Optional point in time the task is scheduled for.
    pub datetime: Option<DateTime<Utc>>,
    /// Whether the task is completed. Tasks with `done = false` are "active".
    pub done: bool,
    /// Owning user; non-zero at creation.
    pub user_id: i64,
    /// Creation timestamp, assigned by storage.
    pub created_at: DateTime<Utc>,
    /// Reminder attached in memory by the task service; never populated by
    /// a storage join.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notification: Option<Notification>,
}

/// A reminder attached to a task, firing at `notify_at` and recurring every
/// `repeat_interval`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Storage-assigned identifier.
    pub id: i64,
    /// The task this reminder belongs to (one per task by convention).
    pub task_id: i64,
    /// When the reminder fires next.
    pub notify_at: DateTime<Utc>,
    /// Recurrence interval; never below one minute once persisted.
    /// Serialized as whole seconds.
    #[serde(with = "seconds")]
    pub repeat_interval: TimeDelta,
    /// Creation timestamp, assigned by storage.
    pub created_at: DateTime<Utc>,
}

/// Serde adapter storing a [`TimeDelta`] as whole seconds.
mod seconds {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(delta: &TimeDelta, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_i64(delta.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<TimeDelta, D::Error> {
        Ok(TimeDelta::seconds(i64::deserialize(de)?))
    }
}
