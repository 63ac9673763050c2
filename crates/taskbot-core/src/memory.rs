//! In-memory implementation of the storage contracts.
//!
//! [`MemoryStore`] keeps all three tables behind one `parking_lot` mutex
//! and hands out cloneable handles, so a single store can back every
//! repository parameter of a service under test. It honors the ordering
//! guarantees the contracts promise: date searches sort by occurrence time
//! then title, the upcoming query sorts by `notify_at` ascending.
//!
//! IDs are assigned from per-table sequences starting at 1; `created_at`
//! is stamped at insert time.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::errors::RepositoryError;
use crate::models::{Notification, Task, User};
use crate::repository::{NotificationRepository, TaskRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    tasks: BTreeMap<i64, Task>,
    notifications: BTreeMap<i64, Notification>,
    next_user_id: i64,
    next_task_id: i64,
    next_notification_id: i64,
}

/// Cloneable in-memory backend implementing all three storage contracts.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskRepository for MemoryStore {
    fn create(&self, task: Task) -> Result<Task, RepositoryError> {
        let mut tables = self.inner.lock();
        tables.next_task_id += 1;
        let stored = Task {
            id: tables.next_task_id,
            created_at: Utc::now(),
            // the attachment field never persists
            notification: None,
            ..task
        };
        let _ = tables.tasks.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update(&self, task: &Task) -> Result<(), RepositoryError> {
        let mut tables = self.inner.lock();
        if !tables.tasks.contains_key(&task.id) {
            return Err(RepositoryError::NotFound);
        }
        let stored = Task {
            notification: None,
            ..task.clone()
        };
        let _ = tables.tasks.insert(task.id, stored);
        Ok(())
    }

    fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let _ = self.inner.lock().tasks.remove(&id);
        Ok(())
    }

    fn delete_completed(&self) -> Result<(), RepositoryError> {
        let mut tables = self.inner.lock();
        let done_ids: Vec<i64> = tables
            .tasks
            .values()
            .filter(|task| task.done)
            .map(|task| task.id)
            .collect();
        tables.tasks.retain(|_, task| !task.done);
        tables
            .notifications
            .retain(|_, notification| !done_ids.contains(&notification.task_id));
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> Result<Task, RepositoryError> {
        self.inner
            .lock()
            .tasks
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    fn all_active_for_user(&self, user_id: i64) -> Result<Vec<Task>, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .tasks
            .values()
            .filter(|task| !task.done && task.user_id == user_id)
            .cloned()
            .collect())
    }

    fn active_without_datetime_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Task>, RepositoryError> {
        Ok(self
            .inner
            .lock()
            .tasks
            .values()
            .filter(|task| !task.done && task.user_id == user_id && task.datetime.is_none())
            .cloned()
            .collect())
    }

    fn search_active_by_datetime_for_user(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        user_id: i64,
    ) -> Result<Vec<Task>, RepositoryError> {
        let mut found: Vec<Task> = self
            .inner
            .lock()
            .tasks
            .values()
            .filter(|task| !task.done && task.user_id == user_id)
            .filter(|task| {
                task.datetime.is_some_and(|dt| {
                    from.is_none_or(|lower| dt >= lower) && to.is_none_or(|upper| dt <= upper)
                })
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.datetime.cmp(&b.datetime).then_with(|| a.title.cmp(&b.title)));
        Ok(found)
    }
}

impl NotificationRepository for MemoryStore {
    fn create(&self, notification: Notification) -> Result<Notification, RepositoryError> {
        let mut tables = self.inner.lock();
        tables.next_notification_id += 1;
        let stored = Notification {
            id: tables.next_notification_id,
            created_at: Utc::now(),
            ..notification
        };
        let _ = tables.notifications.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update(&self, notification: &Notification) -> Result<(), RepositoryError> {
        let mut tables = self.inner.lock();
        if !tables.notifications.contains_key(&notification.id) {
            return Err(RepositoryError::NotFound);
        }
        let _ = tables
            .notifications
            .insert(notification.id, notification.clone());
        Ok(())
    }

    fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let _ = self.inner.lock().notifications.remove(&id);
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> Result<Notification, RepositoryError> {
        self.inner
            .lock()
            .notifications
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    fn upcoming(&self, up_to: DateTime<Utc>) -> Result<Vec<Notification>, RepositoryError> {
        let mut due: Vec<Notification> = self
            .inner
            .lock()
            .notifications
            .values()
            .filter(|notification| notification.notify_at <= up_to)
            .cloned()
            .collect();
        due.sort_by_key(|notification| notification.notify_at);
        Ok(due)
    }

    fn find_by_task_ids(
        &self,
        task_ids: &[i64],
    ) -> Result<HashMap<i64, Notification>, RepositoryError> {
        let tables = self.inner.lock();
        let mut by_task = HashMap::new();
        for notification in tables.notifications.values() {
            if task_ids.contains(&notification.task_id) {
                let _ = by_task.insert(notification.task_id, notification.clone());
            }
        }
        Ok(by_task)
    }
}

impl UserRepository for MemoryStore {
    fn create(&self, user: User) -> Result<User, RepositoryError> {
        let mut tables = self.inner.lock();
        if tables
            .users
            .values()
            .any(|existing| existing.telegram_id == user.telegram_id)
        {
            return Err(RepositoryError::AlreadyExists);
        }
        tables.next_user_id += 1;
        let stored = User {
            id: tables.next_user_id,
            created_at: Utc::now(),
            ..user
        };
        let _ = tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn find_by_telegram_id(&self, telegram_id: i64) -> Result<User, RepositoryError> {
        self.inner
            .lock()
            .users
            .values()
            .find(|user| user.telegram_id == telegram_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    fn delete_by_telegram_id(&self, telegram_id: i64) -> Result<(), RepositoryError> {
        self.inner
            .lock()
            .users
            .retain(|_, user| user.telegram_id != telegram_id);
        Ok(())
    }
}
