//! Task aggregate root and the lifecycle state machine.
//!
//! A task is created `Pending` with a planned window, moves to `In Progress`
//! when the user actually starts it (stamping `actual_start_time`), and ends
//! `Completed` with an `actual_end_time` and a whole-second tracked duration.
//! All status movement happens through [`Task::begin`] and [`Task::finish`];
//! the partial-edit path ([`TaskEdit`]) deliberately has no status field.

use super::{
    ParseCategoryError, ParsePriorityError, ParseTaskStatusError, ScheduleDomainError,
    TaskDescription, TaskId, TaskName, UserId,
};
use crate::timeutil::{self, format_duration};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Task is scheduled but work has not started.
    Pending,
    /// Task is the one currently being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Task work has finished and its duration is recorded.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Must happen today.
    High,
    /// Default tier.
    Medium,
    /// Nice to have.
    Low,
}

impl Priority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Work-related task.
    Work,
    /// Personal task.
    Personal,
}

impl Category {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = ParseCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Work" => Ok(Self::Work),
            "Personal" => Ok(Self::Personal),
            _ => Err(ParseCategoryError(value.to_owned())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Planned scheduling window for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl PlannedWindow {
    /// Default span suggested for a new task, in minutes.
    pub const DEFAULT_SPAN_MINUTES: i64 = 30;

    /// Creates a validated planned window.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::WindowEndsBeforeStart`] when `end`
    /// precedes `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ScheduleDomainError> {
        if end < start {
            return Err(ScheduleDomainError::WindowEndsBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Suggests a default window: the current instant snapped onto the
    /// quarter-hour grid, spanning [`Self::DEFAULT_SPAN_MINUTES`].
    #[must_use]
    pub fn suggested(clock: &impl Clock) -> Self {
        let start = timeutil::round_to_quarter_hour(clock.utc());
        Self {
            start,
            end: start + Duration::minutes(Self::DEFAULT_SPAN_MINUTES),
        }
    }

    /// Returns the planned start instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the planned end instant.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// User-submitted task fields, before the store assigns identity and audit
/// stamps. New tasks always enter the lifecycle as `Pending` with no actual
/// times recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    name: TaskName,
    description: Option<TaskDescription>,
    window: PlannedWindow,
    priority: Priority,
    category: Category,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub const fn new(
        name: TaskName,
        window: PlannedWindow,
        priority: Priority,
        category: Category,
    ) -> Self {
        Self {
            name,
            description: None,
            window,
            priority,
            category,
        }
    }

    /// Sets the optional description.
    #[must_use]
    pub fn with_description(mut self, description: TaskDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the planned window.
    #[must_use]
    pub const fn window(&self) -> PlannedWindow {
        self.window
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }
}

/// Partial update to a task's schedule and narrative fields.
///
/// Lifecycle state is intentionally absent: status, actual times, and
/// duration can only move through [`Task::begin`] and [`Task::finish`], so
/// an edit can never bypass the single-active-task guard or the time
/// bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement task name, if any.
    pub name: Option<TaskName>,
    /// Replacement description, if any.
    pub description: Option<TaskDescription>,
    /// Replacement planned window, if any.
    pub window: Option<PlannedWindow>,
    /// Replacement priority, if any.
    pub priority: Option<Priority>,
    /// Replacement category, if any.
    pub category: Option<Category>,
}

impl TaskEdit {
    /// Returns `true` when the edit carries no field changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.window.is_none()
            && self.priority.is_none()
            && self.category.is_none()
    }
}

/// Human-readable completion receipt returned by [`Task::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionNotice {
    completed_at: DateTime<Utc>,
    duration_seconds: i64,
}

impl CompletionNotice {
    /// Returns the instant the task completed.
    #[must_use]
    pub const fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Returns the tracked duration in whole seconds.
    #[must_use]
    pub const fn duration_seconds(&self) -> i64 {
        self.duration_seconds
    }
}

impl fmt::Display for CompletionNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task completed! Duration: {}",
            format_duration(self.duration_seconds)
        )
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned task identifier.
    pub id: TaskId,
    /// Owning user identity.
    pub owner: UserId,
    /// Persisted task name.
    pub name: TaskName,
    /// Persisted description, if any.
    pub description: Option<TaskDescription>,
    /// Persisted planned window.
    pub window: PlannedWindow,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted category.
    pub category: Category,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Recorded actual start, if the task ever began.
    pub actual_start_time: Option<DateTime<Utc>>,
    /// Recorded actual end, if the task completed.
    pub actual_end_time: Option<DateTime<Utc>>,
    /// Tracked duration in whole seconds, if the task completed.
    pub duration_seconds: Option<i64>,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Store-maintained last-mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    owner: UserId,
    name: TaskName,
    description: Option<TaskDescription>,
    window: PlannedWindow,
    priority: Priority,
    category: Category,
    status: TaskStatus,
    actual_start_time: Option<DateTime<Utc>>,
    actual_end_time: Option<DateTime<Utc>>,
    duration_seconds: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            name: data.name,
            description: data.description,
            window: data.window,
            priority: data.priority,
            category: data.category,
            status: data.status,
            actual_start_time: data.actual_start_time,
            actual_end_time: data.actual_end_time,
            duration_seconds: data.duration_seconds,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user identity.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the planned window.
    #[must_use]
    pub const fn window(&self) -> PlannedWindow {
        self.window
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the recorded actual start instant, if any.
    #[must_use]
    pub const fn actual_start_time(&self) -> Option<DateTime<Utc>> {
        self.actual_start_time
    }

    /// Returns the recorded actual end instant, if any.
    #[must_use]
    pub const fn actual_end_time(&self) -> Option<DateTime<Utc>> {
        self.actual_end_time
    }

    /// Returns the tracked duration in whole seconds, if completed.
    #[must_use]
    pub const fn duration_seconds(&self) -> Option<i64> {
        self.duration_seconds
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task from `Pending` to `In Progress`, stamping the actual
    /// start time from the clock. Returns the recorded start instant.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::NotStartable`] when the task is not
    /// `Pending`; the task is left untouched.
    pub fn begin(&mut self, clock: &impl Clock) -> Result<DateTime<Utc>, ScheduleDomainError> {
        if self.status != TaskStatus::Pending {
            return Err(ScheduleDomainError::NotStartable {
                task_id: self.id,
                status: self.status,
            });
        }
        let started = clock.utc();
        self.status = TaskStatus::InProgress;
        self.actual_start_time = Some(started);
        self.touch(clock);
        Ok(started)
    }

    /// Moves the task from `In Progress` to `Completed`, stamping the actual
    /// end time and recording the tracked duration as whole seconds between
    /// the actual start and end.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleDomainError::NotCompletable`] when the task is not
    /// `In Progress`, or [`ScheduleDomainError::MissingActualStart`] when no
    /// actual start was ever recorded. The task is left untouched on error.
    pub fn finish(&mut self, clock: &impl Clock) -> Result<CompletionNotice, ScheduleDomainError> {
        if self.status != TaskStatus::InProgress {
            return Err(ScheduleDomainError::NotCompletable {
                task_id: self.id,
                status: self.status,
            });
        }
        let Some(started) = self.actual_start_time else {
            return Err(ScheduleDomainError::MissingActualStart { task_id: self.id });
        };
        let ended = clock.utc();
        let duration_seconds = (ended - started).num_seconds();
        self.status = TaskStatus::Completed;
        self.actual_end_time = Some(ended);
        self.duration_seconds = Some(duration_seconds);
        self.touch(clock);
        Ok(CompletionNotice {
            completed_at: ended,
            duration_seconds,
        })
    }

    /// Returns the seconds elapsed since the actual start, or `None` when
    /// the task never began. Purely a display derivation; nothing is
    /// persisted until [`Task::finish`].
    #[must_use]
    pub fn elapsed_seconds(&self, clock: &impl Clock) -> Option<i64> {
        self.actual_start_time
            .map(|started| (clock.utc() - started).num_seconds())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
