//! Store port for task persistence against the hosted data service.

use crate::schedule::domain::{
    Category, Priority, Task, TaskDescription, TaskDraft, TaskEdit, TaskId, TaskName, TaskStatus,
    UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// The store assigns identity and audit stamps on insert and stamps
/// `updated_at` on every update. Every operation is one asynchronous round
/// trip; nothing is retried or pipelined.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns all tasks owned by the user, ordered by creation time
    /// descending.
    async fn list_for_user(&self, user_id: &UserId) -> TaskStoreResult<Vec<Task>>;

    /// Stores a new task for the owner and returns the full record with
    /// store-assigned identity and audit stamps.
    async fn insert(&self, owner: &UserId, draft: &TaskDraft) -> TaskStoreResult<Task>;

    /// Applies a partial update and returns the merged record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<Task>;

    /// Removes the task record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;
}

/// Field-level partial update accepted by [`TaskStore::update`].
///
/// Lifecycle fields (status, actual times, duration) are only ever filled in
/// by the guarded transition constructors, keeping the state machine the
/// single authority over status writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement task name.
    pub name: Option<TaskName>,
    /// Replacement description.
    pub description: Option<TaskDescription>,
    /// Replacement planned start.
    pub start_time: Option<DateTime<Utc>>,
    /// Replacement planned end.
    pub end_time: Option<DateTime<Utc>>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement category.
    pub category: Option<Category>,
    /// Lifecycle status write (guarded transitions only).
    pub status: Option<TaskStatus>,
    /// Actual start stamp (guarded transitions only).
    pub actual_start_time: Option<DateTime<Utc>>,
    /// Actual end stamp (guarded transitions only).
    pub actual_end_time: Option<DateTime<Utc>>,
    /// Tracked duration in whole seconds (guarded transitions only).
    pub duration_seconds: Option<i64>,
}

impl TaskPatch {
    /// Builds the patch persisting a Pending → In Progress transition.
    #[must_use]
    pub const fn begin(actual_start_time: DateTime<Utc>) -> Self {
        Self {
            name: None,
            description: None,
            start_time: None,
            end_time: None,
            priority: None,
            category: None,
            status: Some(TaskStatus::InProgress),
            actual_start_time: Some(actual_start_time),
            actual_end_time: None,
            duration_seconds: None,
        }
    }

    /// Builds the patch persisting an In Progress → Completed transition.
    #[must_use]
    pub const fn finish(actual_end_time: DateTime<Utc>, duration_seconds: i64) -> Self {
        Self {
            name: None,
            description: None,
            start_time: None,
            end_time: None,
            priority: None,
            category: None,
            status: Some(TaskStatus::Completed),
            actual_start_time: None,
            actual_end_time: Some(actual_end_time),
            duration_seconds: Some(duration_seconds),
        }
    }

    /// Builds the patch for a schedule/narrative edit. Never writes
    /// lifecycle fields.
    #[must_use]
    pub fn from_edit(edit: &TaskEdit) -> Self {
        Self {
            name: edit.name.clone(),
            description: edit.description.clone(),
            start_time: edit.window.map(|window| window.start()),
            end_time: edit.window.map(|window| window.end()),
            priority: edit.priority,
            category: edit.category,
            status: None,
            actual_start_time: None,
            actual_end_time: None,
            duration_seconds: None,
        }
    }
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The service rejected the request.
    #[error("store rejected the request with status {status}: {detail}")]
    Rejected {
        /// HTTP-level status code reported by the service.
        status: u16,
        /// Service-provided failure detail, possibly empty.
        detail: String,
    },

    /// A wire record could not be decoded into the domain model.
    #[error("undecodable store record: {0}")]
    Decode(String),

    /// Transport-level failure reaching the service.
    #[error("store unreachable: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
