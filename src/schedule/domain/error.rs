//! Error types for schedule domain validation and lifecycle transitions.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or transitioning domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name exceeds the display limit.
    #[error("task name must be at most 50 characters, got {0}")]
    TaskNameTooLong(usize),

    /// The task description exceeds the display limit.
    #[error("task description must be at most 200 characters, got {0}")]
    DescriptionTooLong(usize),

    /// The owner identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The planned window ends before it starts.
    #[error("planned end {end} precedes planned start {start}")]
    WindowEndsBeforeStart {
        /// Planned window start.
        start: DateTime<Utc>,
        /// Planned window end.
        end: DateTime<Utc>,
    },

    /// A task may only start from the `Pending` status.
    #[error("task {task_id} cannot start from status '{status}'")]
    NotStartable {
        /// The task that rejected the transition.
        task_id: TaskId,
        /// The status the task held at the time.
        status: TaskStatus,
    },

    /// A task may only complete from the `In Progress` status.
    #[error("task {task_id} cannot complete from status '{status}'")]
    NotCompletable {
        /// The task that rejected the transition.
        task_id: TaskId,
        /// The status the task held at the time.
        status: TaskStatus,
    },

    /// A task reached completion without a recorded actual start time.
    #[error("task {task_id} has no recorded actual start time")]
    MissingActualStart {
        /// The task missing its start bookkeeping.
        task_id: TaskId,
    },
}

/// Error returned while parsing task statuses from their wire form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing priorities from their wire form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing categories from their wire form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);
