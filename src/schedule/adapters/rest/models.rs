//! Wire row models exchanged with the hosted task store.
//!
//! Timestamps travel as ISO-8601 instant strings and are reconstructed as
//! structured time values at every read boundary. Optional fields are
//! omitted from the wire when absent and deserialize back to `None`, never
//! to an epoch placeholder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::domain::{
    Category, PersistedTaskData, PlannedWindow, Priority, Task, TaskDescription, TaskDraft,
    TaskId, TaskName, TaskStatus, UserId,
};
use crate::schedule::ports::{TaskPatch, TaskStoreError};

/// Full task record as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    /// Service-assigned record identifier.
    pub id: Uuid,
    /// Owning user identifier.
    pub user_id: String,
    /// Task name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Planned window start.
    pub start_time: DateTime<Utc>,
    /// Planned window end.
    pub end_time: DateTime<Utc>,
    /// Priority tier.
    pub priority: Priority,
    /// Task category.
    pub category: Category,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Actual start stamp, absent until the task begins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_start_time: Option<DateTime<Utc>>,
    /// Actual end stamp, absent until the task completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_end_time: Option<DateTime<Utc>>,
    /// Tracked duration in whole seconds, absent until the task completes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// Service-assigned creation stamp.
    pub created_at: DateTime<Utc>,
    /// Service-maintained last-mutation stamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskStoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let decode = |err: &dyn std::fmt::Display| TaskStoreError::Decode(err.to_string());

        let owner = UserId::new(row.user_id).map_err(|err| decode(&err))?;
        let name = TaskName::new(row.name).map_err(|err| decode(&err))?;
        let description = row
            .description
            .map(TaskDescription::new)
            .transpose()
            .map_err(|err| decode(&err))?;
        let window =
            PlannedWindow::new(row.start_time, row.end_time).map_err(|err| decode(&err))?;

        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(row.id),
            owner,
            name,
            description,
            window,
            priority: row.priority,
            category: row.category,
            status: row.status,
            actual_start_time: row.actual_start_time,
            actual_end_time: row.actual_end_time,
            duration_seconds: row.duration,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

/// Insert payload for a new task record.
///
/// Identity and audit stamps are service-assigned; new tasks always start
/// `Pending` with no actual times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaskRow {
    /// Owning user identifier.
    pub user_id: String,
    /// Task name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Planned window start.
    pub start_time: DateTime<Utc>,
    /// Planned window end.
    pub end_time: DateTime<Utc>,
    /// Priority tier.
    pub priority: Priority,
    /// Task category.
    pub category: Category,
    /// Lifecycle status.
    pub status: TaskStatus,
}

impl NewTaskRow {
    /// Builds the insert payload for an owner's draft.
    #[must_use]
    pub fn from_draft(owner: &UserId, draft: &TaskDraft) -> Self {
        Self {
            user_id: owner.as_str().to_owned(),
            name: draft.name().as_str().to_owned(),
            description: draft
                .description()
                .map(|description| description.as_str().to_owned()),
            start_time: draft.window().start(),
            end_time: draft.window().end(),
            priority: draft.priority(),
            category: draft.category(),
            status: TaskStatus::Pending,
        }
    }
}

/// Partial update payload; only the fields present on the patch hit the
/// wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskRowPatch {
    /// Replacement task name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement planned start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Replacement planned end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Replacement priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Replacement category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Lifecycle status write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Actual start stamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start_time: Option<DateTime<Utc>>,
    /// Actual end stamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end_time: Option<DateTime<Utc>>,
    /// Tracked duration in whole seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl From<&TaskPatch> for TaskRowPatch {
    fn from(patch: &TaskPatch) -> Self {
        Self {
            name: patch.name.as_ref().map(|name| name.as_str().to_owned()),
            description: patch
                .description
                .as_ref()
                .map(|description| description.as_str().to_owned()),
            start_time: patch.start_time,
            end_time: patch.end_time,
            priority: patch.priority,
            category: patch.category,
            status: patch.status,
            actual_start_time: patch.actual_start_time,
            actual_end_time: patch.actual_end_time,
            duration: patch.duration_seconds,
        }
    }
}
