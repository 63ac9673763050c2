//! Task service: validated CRUD plus the read paths a bot front end needs.
//!
//! Key behaviors:
//!
//! - **Partial updates**: only fields marked set are merged, except `done`,
//!   which is always overwritten (see [`UpdateParams::done`]).
//! - **Batched attachment**: read paths collect the result set's task IDs,
//!   issue one `find_by_task_ids` call, and attach notifications in memory.
//!   The two repository calls are independent, so a concurrent notification
//!   write between them can leave a stale or missing attachment; that
//!   window is accepted.
//! - **NotFound remap**: repository `NotFound` surfaces as
//!   [`ServiceError::NotFound`] at every read/update entry point.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use tracing::{instrument, warn};

use taskbot_core::errors::ServiceError;
use taskbot_core::models::Task;
use taskbot_core::repository::{NotificationRepository, TaskRepository};

use crate::params::{CreateParams, SearchByDateParams, UpdateParams};
use crate::validate;

/// Task service over abstract task and notification storage.
pub struct TaskService<T, N> {
    tasks: T,
    notifications: N,
}

impl<T: TaskRepository, N: NotificationRepository> TaskService<T, N> {
    /// Create a service over the given repositories.
    pub fn new(tasks: T, notifications: N) -> Self {
        Self {
            tasks,
            notifications,
        }
    }

    /// Validate and persist a new task with `done = false`.
    ///
    /// The repository-assigned entity is discarded; callers only observe
    /// the persistence side effect.
    #[instrument(skip(self, params), fields(user_id = params.user_id))]
    pub fn create(&self, params: CreateParams) -> Result<(), ServiceError> {
        validate::create(&params)?;

        let draft = Task {
            id: 0,
            title: params.title,
            description: params.description,
            datetime: params.datetime,
            done: false,
            user_id: params.user_id,
            // storage stamps the real value
            created_at: Utc::now(),
            notification: None,
        };
        let _ = self.tasks.create(draft).map_err(|err| {
            warn!(error = %err, "task create failed");
            ServiceError::from(err)
        })?;
        Ok(())
    }

    /// Load the task, merge the fields marked set, and persist.
    ///
    /// `done` is written unconditionally from the parameter, whether or not
    /// the caller meant to change it.
    #[instrument(skip(self, params), fields(task_id = params.task_id))]
    pub fn update(&self, params: UpdateParams) -> Result<(), ServiceError> {
        validate::update(&params)?;

        let mut task = self.tasks.find_by_id(params.task_id).map_err(|err| {
            warn!(task_id = params.task_id, error = %err, "task lookup failed");
            ServiceError::from(err)
        })?;

        if let Some(user_id) = params.user_id {
            task.user_id = user_id;
        }
        if let Some(title) = params.title {
            task.title = title;
        }
        if let Some(description) = params.description {
            task.description = description;
        }
        if let Some(datetime) = params.datetime {
            task.datetime = datetime;
        }
        task.done = params.done;

        self.tasks.update(&task).map_err(|err| {
            warn!(task_id = task.id, error = %err, "task update failed");
            ServiceError::from(err)
        })
    }

    /// Active scheduled tasks for a user within the bound window, enriched
    /// with their notifications and grouped by calendar date ascending.
    #[instrument(skip(self, params), fields(user_id = params.user_id))]
    pub fn search_by_date_for_user(
        &self,
        params: SearchByDateParams,
    ) -> Result<BTreeMap<NaiveDate, Vec<Task>>, ServiceError> {
        validate::search_by_date(&params)?;

        let mut tasks = self
            .tasks
            .search_active_by_datetime_for_user(params.from, params.to, params.user_id)
            .map_err(|err| {
                warn!(user_id = params.user_id, error = %err, "date search failed");
                ServiceError::from(err)
            })?;
        self.attach_notifications(&mut tasks)?;

        let mut by_date: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
        for task in tasks {
            // the search contract only returns scheduled tasks
            let Some(datetime) = task.datetime else {
                continue;
            };
            by_date.entry(datetime.date_naive()).or_default().push(task);
        }
        Ok(by_date)
    }

    /// All active tasks for a user, enriched with their notifications.
    #[instrument(skip(self))]
    pub fn all_active_for_user(&self, user_id: i64) -> Result<Vec<Task>, ServiceError> {
        let mut tasks = self.tasks.all_active_for_user(user_id).map_err(|err| {
            warn!(user_id, error = %err, "active task fetch failed");
            ServiceError::from(err)
        })?;
        self.attach_notifications(&mut tasks)?;
        Ok(tasks)
    }

    /// Active unscheduled tasks for a user, enriched with their
    /// notifications.
    #[instrument(skip(self))]
    pub fn active_without_datetime_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Task>, ServiceError> {
        let mut tasks = self
            .tasks
            .active_without_datetime_for_user(user_id)
            .map_err(|err| {
                warn!(user_id, error = %err, "unscheduled task fetch failed");
                ServiceError::from(err)
            })?;
        self.attach_notifications(&mut tasks)?;
        Ok(tasks)
    }

    /// Delete one task by ID.
    #[instrument(skip(self))]
    pub fn delete_by_id(&self, task_id: i64) -> Result<(), ServiceError> {
        self.tasks.delete_by_id(task_id).map_err(|err| {
            warn!(task_id, error = %err, "task delete failed");
            ServiceError::from(err)
        })
    }

    /// Delete every done task across all users. Global maintenance sweep.
    #[instrument(skip(self))]
    pub fn delete_completed(&self) -> Result<(), ServiceError> {
        self.tasks.delete_completed().map_err(|err| {
            warn!(error = %err, "completed sweep failed");
            ServiceError::from(err)
        })
    }

    /// Load one task by ID.
    #[instrument(skip(self))]
    pub fn find_by_id(&self, task_id: i64) -> Result<Task, ServiceError> {
        self.tasks.find_by_id(task_id).map_err(|err| {
            warn!(task_id, error = %err, "task lookup failed");
            ServiceError::from(err)
        })
    }

    /// One batched lookup for the whole result set, then attach by
    /// membership. Tasks without a notification keep `notification = None`.
    fn attach_notifications(&self, tasks: &mut [Task]) -> Result<(), ServiceError> {
        if tasks.is_empty() {
            return Ok(());
        }
        let task_ids: Vec<i64> = tasks.iter().map(|task| task.id).collect();
        let by_task = self
            .notifications
            .find_by_task_ids(&task_ids)
            .map_err(|err| {
                warn!(error = %err, "batched notification lookup failed");
                ServiceError::from(err)
            })?;
        for task in tasks.iter_mut() {
            if let Some(notification) = by_task.get(&task.id) {
                task.notification = Some(notification.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    use taskbot_core::errors::{RepositoryError, ValidationError};
    use taskbot_core::memory::MemoryStore;
    use taskbot_core::models::Notification;

    use super::*;

    fn service(store: &MemoryStore) -> TaskService<MemoryStore, MemoryStore> {
        TaskService::new(store.clone(), store.clone())
    }

    fn create_task(store: &MemoryStore, title: &str, datetime: Option<DateTime<Utc>>) -> i64 {
        let stored = TaskRepository::create(
            store,
            Task {
                id: 0,
                title: title.to_string(),
                description: String::new(),
                datetime,
                done: false,
                user_id: 7,
                created_at: Utc::now(),
                notification: None,
            },
        )
        .unwrap();
        stored.id
    }

    fn add_notification(store: &MemoryStore, task_id: i64) -> Notification {
        NotificationRepository::create(
            store,
            Notification {
                id: 0,
                task_id,
                notify_at: Utc::now() + TimeDelta::hours(1),
                repeat_interval: TimeDelta::hours(1),
                created_at: Utc::now(),
            },
        )
        .unwrap()
    }

    // --- create ---

    #[test]
    fn create_with_empty_title_names_exactly_title() {
        let store = MemoryStore::new();
        let err = service(&store)
            .create(CreateParams {
                user_id: 7,
                ..CreateParams::default()
            })
            .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Validation(ValidationError::EmptyRequiredFields(vec!["Title"]))
        );
        // validation failures never reach storage
        assert!(store.all_active_for_user(7).unwrap().is_empty());
    }

    #[test]
    fn create_persists_an_active_task() {
        let store = MemoryStore::new();
        service(&store)
            .create(CreateParams {
                title: "buy milk".to_string(),
                description: "2 liters".to_string(),
                user_id: 7,
                ..CreateParams::default()
            })
            .unwrap();

        let active = store.all_active_for_user(7).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "buy milk");
        assert!(!active[0].done);
    }

    // --- update ---

    #[test]
    fn update_merges_only_set_fields() {
        let store = MemoryStore::new();
        let when = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let id = create_task(&store, "old title", Some(when));

        service(&store)
            .update(UpdateParams {
                task_id: id,
                title: Some("new title".to_string()),
                ..UpdateParams::default()
            })
            .unwrap();

        let task = TaskRepository::find_by_id(&store, id).unwrap();
        assert_eq!(task.title, "new title");
        assert_eq!(task.description, "");
        assert_eq!(task.datetime, Some(when));
        assert_eq!(task.user_id, 7);
    }

    #[test]
    fn update_always_overwrites_done() {
        let store = MemoryStore::new();
        let id = create_task(&store, "task", None);

        // mark done
        service(&store)
            .update(UpdateParams {
                task_id: id,
                done: true,
                ..UpdateParams::default()
            })
            .unwrap();
        assert!(TaskRepository::find_by_id(&store, id).unwrap().done);

        // a title-only update silently flips it back: `done` defaulted to
        // false and is written regardless
        service(&store)
            .update(UpdateParams {
                task_id: id,
                title: Some("renamed".to_string()),
                ..UpdateParams::default()
            })
            .unwrap();
        let task = TaskRepository::find_by_id(&store, id).unwrap();
        assert_eq!(task.title, "renamed");
        assert!(!task.done);
    }

    #[test]
    fn update_can_clear_the_schedule() {
        let store = MemoryStore::new();
        let id = create_task(&store, "task", Some(Utc::now()));

        service(&store)
            .update(UpdateParams {
                task_id: id,
                datetime: Some(None),
                ..UpdateParams::default()
            })
            .unwrap();

        assert_eq!(TaskRepository::find_by_id(&store, id).unwrap().datetime, None);
    }

    #[test]
    fn update_missing_task_is_not_found() {
        let store = MemoryStore::new();
        let err = service(&store)
            .update(UpdateParams {
                task_id: 99,
                done: true,
                ..UpdateParams::default()
            })
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    // --- search and grouping ---

    #[test]
    fn search_groups_by_calendar_date_with_notifications() {
        let store = MemoryStore::new();
        let morning = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 1, 2, 18, 0, 0).unwrap();
        let first = create_task(&store, "standup", Some(morning));
        let second = create_task(&store, "dinner", Some(evening));
        let reminder = add_notification(&store, first);

        let grouped = service(&store)
            .search_by_date_for_user(SearchByDateParams {
                from: Some(morning - TimeDelta::days(1)),
                to: Some(evening + TimeDelta::days(1)),
                user_id: 7,
            })
            .unwrap();

        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), [jan1, jan2]);
        assert_eq!(grouped[&jan1].len(), 1);
        assert_eq!(grouped[&jan1][0].id, first);
        assert_eq!(
            grouped[&jan1][0].notification.as_ref().map(|n| n.id),
            Some(reminder.id)
        );
        assert_eq!(grouped[&jan2][0].id, second);
        assert!(grouped[&jan2][0].notification.is_none());
    }

    #[test]
    fn search_without_bounds_is_rejected() {
        let store = MemoryStore::new();
        let err = service(&store)
            .search_by_date_for_user(SearchByDateParams {
                user_id: 7,
                ..SearchByDateParams::default()
            })
            .unwrap_err();
        assert_matches!(err, ServiceError::Validation(_));
    }

    // --- active listings ---

    #[test]
    fn all_active_attaches_notifications() {
        let store = MemoryStore::new();
        let with_reminder = create_task(&store, "a", None);
        let without = create_task(&store, "b", None);
        let reminder = add_notification(&store, with_reminder);

        let tasks = service(&store).all_active_for_user(7).unwrap();
        assert_eq!(tasks.len(), 2);
        let by_id: HashMap<i64, &Task> = tasks.iter().map(|t| (t.id, t)).collect();
        assert_eq!(
            by_id[&with_reminder].notification.as_ref().map(|n| n.id),
            Some(reminder.id)
        );
        assert!(by_id[&without].notification.is_none());
    }

    #[test]
    fn unscheduled_listing_excludes_scheduled_tasks() {
        let store = MemoryStore::new();
        let unscheduled = create_task(&store, "someday", None);
        let _ = create_task(&store, "scheduled", Some(Utc::now()));

        let tasks = service(&store).active_without_datetime_for_user(7).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, unscheduled);
    }

    // --- deletion ---

    #[test]
    fn delete_completed_then_find_is_not_found() {
        let store = MemoryStore::new();
        let id = create_task(&store, "finish me", None);
        let svc = service(&store);
        svc.update(UpdateParams {
            task_id: id,
            done: true,
            ..UpdateParams::default()
        })
        .unwrap();

        svc.delete_completed().unwrap();

        assert_eq!(svc.find_by_id(id).unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn delete_by_id_delegates() {
        let store = MemoryStore::new();
        let id = create_task(&store, "gone", None);
        service(&store).delete_by_id(id).unwrap();
        assert_matches!(
            TaskRepository::find_by_id(&store, id),
            Err(RepositoryError::NotFound)
        );
    }

    // --- storage failures pass through ---

    struct BrokenTasks;

    impl TaskRepository for BrokenTasks {
        fn create(&self, _task: Task) -> Result<Task, RepositoryError> {
            Err(RepositoryError::Storage("disk on fire".to_string()))
        }
        fn update(&self, _task: &Task) -> Result<(), RepositoryError> {
            Err(RepositoryError::Storage("disk on fire".to_string()))
        }
        fn delete_by_id(&self, _id: i64) -> Result<(), RepositoryError> {
            Err(RepositoryError::Storage("disk on fire".to_string()))
        }
        fn delete_completed(&self) -> Result<(), RepositoryError> {
            Err(RepositoryError::Storage("disk on fire".to_string()))
        }
        fn find_by_id(&self, _id: i64) -> Result<Task, RepositoryError> {
            Err(RepositoryError::Storage("disk on fire".to_string()))
        }
        fn all_active_for_user(&self, _user_id: i64) -> Result<Vec<Task>, RepositoryError> {
            Err(RepositoryError::Storage("disk on fire".to_string()))
        }
        fn active_without_datetime_for_user(
            &self,
            _user_id: i64,
        ) -> Result<Vec<Task>, RepositoryError> {
            Err(RepositoryError::Storage("disk on fire".to_string()))
        }
        fn search_active_by_datetime_for_user(
            &self,
            _from: Option<DateTime<Utc>>,
            _to: Option<DateTime<Utc>>,
            _user_id: i64,
        ) -> Result<Vec<Task>, RepositoryError> {
            Err(RepositoryError::Storage("disk on fire".to_string()))
        }
    }

    #[test]
    fn storage_failures_are_opaque_pass_throughs() {
        let svc = TaskService::new(BrokenTasks, MemoryStore::new());
        let err = svc.all_active_for_user(7).unwrap_err();
        assert_eq!(err, ServiceError::Storage("disk on fire".to_string()));
    }
}
