//! Storage contracts consumed by the service layer.
//!
//! The three contracts stay separate so the batched
//! [`NotificationRepository::find_by_task_ids`] lookup remains a first-class
//! operation instead of degrading into N individual reads. Implementations
//! live outside this layer; [`crate::memory::MemoryStore`] is the in-process
//! reference used by the test suites.
//!
//! All methods are synchronous single calls. The layer above issues them
//! without locks or transactions, so a concurrent writer may interleave
//! between two reads; that eventual-consistency window is accepted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::errors::RepositoryError;
use crate::models::{Notification, Task, User};

/// Task storage contract.
pub trait TaskRepository {
    /// Persist a new task; returns the stored entity with its assigned ID
    /// and creation timestamp.
    fn create(&self, task: Task) -> Result<Task, RepositoryError>;

    /// Overwrite the stored task identified by `task.id`.
    fn update(&self, task: &Task) -> Result<(), RepositoryError>;

    /// Delete one task by ID.
    fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    /// Delete every done task across all users, together with the
    /// notifications attached to them. Global maintenance sweep, not scoped
    /// to a user.
    fn delete_completed(&self) -> Result<(), RepositoryError>;

    /// Load one task by ID.
    fn find_by_id(&self, id: i64) -> Result<Task, RepositoryError>;

    /// All active (not done) tasks owned by `user_id`.
    fn all_active_for_user(&self, user_id: i64) -> Result<Vec<Task>, RepositoryError>;

    /// Active tasks owned by `user_id` that have no scheduled datetime.
    fn active_without_datetime_for_user(&self, user_id: i64)
    -> Result<Vec<Task>, RepositoryError>;

    /// Active scheduled tasks owned by `user_id` whose datetime falls within
    /// the given bounds (inclusive, either may be absent), ordered by
    /// occurrence time then title.
    fn search_active_by_datetime_for_user(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        user_id: i64,
    ) -> Result<Vec<Task>, RepositoryError>;
}

/// Notification storage contract.
pub trait NotificationRepository {
    /// Persist a new notification; returns the stored entity with its
    /// assigned ID and creation timestamp.
    fn create(&self, notification: Notification) -> Result<Notification, RepositoryError>;

    /// Overwrite the stored notification identified by `notification.id`.
    fn update(&self, notification: &Notification) -> Result<(), RepositoryError>;

    /// Delete one notification by ID.
    fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    /// Load one notification by ID.
    fn find_by_id(&self, id: i64) -> Result<Notification, RepositoryError>;

    /// All notifications with `notify_at <= up_to`, ascending by `notify_at`.
    fn upcoming(&self, up_to: DateTime<Utc>) -> Result<Vec<Notification>, RepositoryError>;

    /// Batched lookup: the notification for each of the given task IDs,
    /// keyed by task ID. Tasks without a notification are simply absent
    /// from the map.
    fn find_by_task_ids(
        &self,
        task_ids: &[i64],
    ) -> Result<HashMap<i64, Notification>, RepositoryError>;
}

/// User storage contract.
pub trait UserRepository {
    /// Persist a new user; fails with [`RepositoryError::AlreadyExists`]
    /// when the `telegram_id` is already registered.
    fn create(&self, user: User) -> Result<User, RepositoryError>;

    /// Load one user by external chat identity.
    fn find_by_telegram_id(&self, telegram_id: i64) -> Result<User, RepositoryError>;

    /// Delete one user by external chat identity.
    fn delete_by_telegram_id(&self, telegram_id: i64) -> Result<(), RepositoryError>;
}
