//! Task board coordinator: the single authority over lifecycle state.
//!
//! The board owns the in-memory task collection (most-recent-first) and the
//! one "active task" reference for the signed-in user. Every status movement
//! flows through [`TaskBoard::start_task`] and [`TaskBoard::complete_task`],
//! so the single-active-task guard and the actual-time bookkeeping cannot be
//! bypassed. Store failures are logged and leave the local collection in its
//! pre-call state.

use crate::schedule::{
    domain::{
        CompletionNotice, DayActivity, ScheduleDomainError, Task, TaskDraft, TaskEdit, TaskId,
        TaskStatus, UserId, daily_history, day_key, tasks_on_day, week_history,
    },
    ports::{TaskPatch, TaskStore, TaskStoreError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::warn;

/// Service-level errors for task board operations.
#[derive(Debug, Clone, Error)]
pub enum TaskBoardError {
    /// Domain validation or transition failed.
    #[error(transparent)]
    Domain(#[from] ScheduleDomainError),

    /// Store operation failed; the local collection is unchanged.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// Another task is already in progress for this user.
    #[error("another task is already in progress: {active}")]
    ActiveTaskRunning {
        /// The task currently holding the active slot.
        active: TaskId,
    },

    /// The task is not present in the board's collection.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),

    /// The board's state lock was poisoned by a panicking reader or writer.
    #[error("task board state lock poisoned")]
    StatePoisoned,
}

/// Result type for task board operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

#[derive(Debug, Default)]
struct BoardState {
    tasks: Vec<Task>,
    active: Option<TaskId>,
}

/// Dashboard coordinator for one signed-in user's tasks.
pub struct TaskBoard<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    owner: UserId,
    state: RwLock<BoardState>,
}

impl<S, C> TaskBoard<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a board for the owner with an empty collection and no active
    /// task.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, owner: UserId) -> Self {
        Self {
            store,
            clock,
            owner,
            state: RwLock::new(BoardState::default()),
        }
    }

    /// Returns the owning user identity.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Replaces the collection from the store, newest first.
    ///
    /// The active reference survives a refresh only while its task is still
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Store`] when the fetch fails; the local
    /// collection is unchanged.
    pub async fn refresh(&self) -> TaskBoardResult<()> {
        let fetched = self
            .store
            .list_for_user(&self.owner)
            .await
            .inspect_err(|err| log_store_failure("list", err))?;
        let mut state = self.write_state()?;
        state.tasks = fetched;
        if let Some(active) = state.active
            && !state.tasks.iter().any(|task| task.id() == active)
        {
            state.active = None;
        }
        Ok(())
    }

    /// Creates a task from the draft and prepends the stored record to the
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Store`] when the insert fails; the local
    /// collection is unchanged.
    pub async fn create_task(&self, draft: &TaskDraft) -> TaskBoardResult<Task> {
        let created = self
            .store
            .insert(&self.owner, draft)
            .await
            .inspect_err(|err| log_store_failure("insert", err))?;
        let mut state = self.write_state()?;
        state.tasks.insert(0, created.clone());
        Ok(created)
    }

    /// Starts the task, guarded by the single-active-task constraint.
    ///
    /// On success the task's actual start time is stamped, the change is
    /// persisted, and the task becomes the board's active reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::ActiveTaskRunning`] while any task is in
    /// progress (nothing is mutated), [`TaskBoardError::UnknownTask`] when
    /// the id is not in the collection, [`TaskBoardError::Domain`] when the
    /// task is not `Pending`, or [`TaskBoardError::Store`] when persistence
    /// fails (local state unchanged).
    pub async fn start_task(&self, id: TaskId) -> TaskBoardResult<Task> {
        let mut working = {
            let state = self.read_state()?;
            if let Some(active) = state.running_task_id() {
                return Err(TaskBoardError::ActiveTaskRunning { active });
            }
            state.find(id)?
        };

        let started_at = working.begin(&*self.clock)?;
        let merged = self
            .store
            .update(id, &TaskPatch::begin(started_at))
            .await
            .inspect_err(|err| log_store_failure("update", err))?;

        let mut state = self.write_state()?;
        state.replace(&merged);
        state.active = Some(id);
        Ok(merged)
    }

    /// Completes the task, stamping its actual end time, recording the
    /// tracked duration, and clearing the active reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::UnknownTask`] when the id is not in the
    /// collection, [`TaskBoardError::Domain`] when the task is not in
    /// progress or never recorded a start, or [`TaskBoardError::Store`] when
    /// persistence fails (local state unchanged).
    pub async fn complete_task(&self, id: TaskId) -> TaskBoardResult<CompletionNotice> {
        let mut working = {
            let state = self.read_state()?;
            state.find(id)?
        };

        let notice = working.finish(&*self.clock)?;
        let merged = self
            .store
            .update(
                id,
                &TaskPatch::finish(notice.completed_at(), notice.duration_seconds()),
            )
            .await
            .inspect_err(|err| log_store_failure("update", err))?;

        let mut state = self.write_state()?;
        state.replace(&merged);
        if state.active == Some(id) {
            state.active = None;
        }
        Ok(notice)
    }

    /// Applies a schedule/narrative edit and merges the stored result into
    /// the collection. Lifecycle fields are structurally out of reach here.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::UnknownTask`] when the id is not in the
    /// collection, or [`TaskBoardError::Store`] when persistence fails
    /// (local state unchanged).
    pub async fn edit_task(&self, id: TaskId, edit: &TaskEdit) -> TaskBoardResult<Task> {
        if edit.is_empty() {
            let state = self.read_state()?;
            return state.find(id);
        }

        {
            let state = self.read_state()?;
            state.find(id)?;
        }
        let merged = self
            .store
            .update(id, &TaskPatch::from_edit(edit))
            .await
            .inspect_err(|err| log_store_failure("update", err))?;

        let mut state = self.write_state()?;
        state.replace(&merged);
        Ok(merged)
    }

    /// Deletes the task, clearing the active reference when it pointed at
    /// the deleted task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Store`] when the delete fails; the local
    /// collection is unchanged.
    pub async fn delete_task(&self, id: TaskId) -> TaskBoardResult<()> {
        self.store
            .delete(id)
            .await
            .inspect_err(|err| log_store_failure("delete", err))?;
        let mut state = self.write_state()?;
        state.tasks.retain(|task| task.id() != id);
        if state.active == Some(id) {
            state.active = None;
        }
        Ok(())
    }

    /// Returns a snapshot of the collection, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::StatePoisoned`] when the state lock is
    /// poisoned.
    pub fn tasks(&self) -> TaskBoardResult<Vec<Task>> {
        Ok(self.read_state()?.tasks.clone())
    }

    /// Returns the task currently holding the active reference, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::StatePoisoned`] when the state lock is
    /// poisoned.
    pub fn active_task(&self) -> TaskBoardResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state
            .active
            .and_then(|id| state.tasks.iter().find(|task| task.id() == id).cloned()))
    }

    /// Returns the tasks planned for the current calendar day.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::StatePoisoned`] when the state lock is
    /// poisoned.
    pub fn today(&self) -> TaskBoardResult<Vec<Task>> {
        let today = self.clock.utc().date_naive();
        let state = self.read_state()?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| day_key(task) == today)
            .cloned()
            .collect())
    }

    /// Returns per-day activity roll-ups, newest day first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::StatePoisoned`] when the state lock is
    /// poisoned.
    pub fn history(&self) -> TaskBoardResult<Vec<DayActivity>> {
        Ok(daily_history(&self.read_state()?.tasks))
    }

    /// Returns one week of activity roll-ups starting at `week_start`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::StatePoisoned`] when the state lock is
    /// poisoned.
    pub fn week(&self, week_start: NaiveDate) -> TaskBoardResult<Vec<DayActivity>> {
        Ok(week_history(&self.read_state()?.tasks, week_start))
    }

    /// Returns the tasks planned on the given day, in planned order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::StatePoisoned`] when the state lock is
    /// poisoned.
    pub fn day_tasks(&self, date: NaiveDate) -> TaskBoardResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(tasks_on_day(&state.tasks, date)
            .into_iter()
            .cloned()
            .collect())
    }

    fn read_state(&self) -> TaskBoardResult<RwLockReadGuard<'_, BoardState>> {
        self.state.read().map_err(|_| TaskBoardError::StatePoisoned)
    }

    fn write_state(&self) -> TaskBoardResult<RwLockWriteGuard<'_, BoardState>> {
        self.state
            .write()
            .map_err(|_| TaskBoardError::StatePoisoned)
    }
}

impl BoardState {
    /// Returns the id guarding the active slot: the explicit reference, or
    /// any task whose persisted status is still In Progress.
    fn running_task_id(&self) -> Option<TaskId> {
        self.active.or_else(|| {
            self.tasks
                .iter()
                .find(|task| task.status() == TaskStatus::InProgress)
                .map(Task::id)
        })
    }

    fn find(&self, id: TaskId) -> TaskBoardResult<Task> {
        self.tasks
            .iter()
            .find(|task| task.id() == id)
            .cloned()
            .ok_or(TaskBoardError::UnknownTask(id))
    }

    fn replace(&mut self, merged: &Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|task| task.id() == merged.id()) {
            *slot = merged.clone();
        }
    }
}

fn log_store_failure(operation: &str, err: &TaskStoreError) {
    warn!(operation, error = %err, "task store call failed; local collection unchanged");
}
