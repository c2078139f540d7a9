//! In-memory task store for lifecycle tests and offline demos.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::schedule::{
    domain::{PersistedTaskData, PlannedWindow, Task, TaskDraft, TaskId, TaskStatus, UserId},
    ports::{TaskPatch, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Assigns identity and audit stamps the way the hosted service does, so the
/// task board behaves identically against either backend.
#[derive(Debug)]
pub struct InMemoryTaskStore<C> {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTaskStore<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    rows: HashMap<TaskId, StoredRow>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct StoredRow {
    task: Task,
    seq: u64,
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory store stamping records from the clock.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::transport(std::io::Error::other(err.to_string()))
}

/// Applies a patch over an existing record, restamping `updated_at`.
fn merged(
    existing: &Task,
    patch: &TaskPatch,
    updated_at: DateTime<Utc>,
) -> TaskStoreResult<Task> {
    let window = PlannedWindow::new(
        patch.start_time.unwrap_or(existing.window().start()),
        patch.end_time.unwrap_or(existing.window().end()),
    )
    .map_err(|err| TaskStoreError::Rejected {
        status: 422,
        detail: err.to_string(),
    })?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: existing.id(),
        owner: existing.owner().clone(),
        name: patch.name.clone().unwrap_or_else(|| existing.name().clone()),
        description: patch
            .description
            .clone()
            .or_else(|| existing.description().cloned()),
        window,
        priority: patch.priority.unwrap_or(existing.priority()),
        category: patch.category.unwrap_or(existing.category()),
        status: patch.status.unwrap_or(existing.status()),
        actual_start_time: patch.actual_start_time.or(existing.actual_start_time()),
        actual_end_time: patch.actual_end_time.or(existing.actual_end_time()),
        duration_seconds: patch.duration_seconds.or(existing.duration_seconds()),
        created_at: existing.created_at(),
        updated_at,
    }))
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn list_for_user(&self, user_id: &UserId) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut rows: Vec<&StoredRow> = state
            .rows
            .values()
            .filter(|row| row.task.owner() == user_id)
            .collect();
        // Creation time descending; the insertion sequence breaks ties.
        rows.sort_by(|a, b| {
            b.task
                .created_at()
                .cmp(&a.task.created_at())
                .then(b.seq.cmp(&a.seq))
        });
        Ok(rows.into_iter().map(|row| row.task.clone()).collect())
    }

    async fn insert(&self, owner: &UserId, draft: &TaskDraft) -> TaskStoreResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        let stamped = self.clock.utc();
        let task = Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            owner: owner.clone(),
            name: draft.name().clone(),
            description: draft.description().cloned(),
            window: draft.window(),
            priority: draft.priority(),
            category: draft.category(),
            status: TaskStatus::Pending,
            actual_start_time: None,
            actual_end_time: None,
            duration_seconds: None,
            created_at: stamped,
            updated_at: stamped,
        });
        let seq = state.next_seq;
        state.next_seq += 1;
        state.rows.insert(task.id(), StoredRow {
            task: task.clone(),
            seq,
        });
        Ok(task)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskStoreResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        let updated_at = self.clock.utc();
        let row = state
            .rows
            .get_mut(&id)
            .ok_or(TaskStoreError::NotFound(id))?;
        let task = merged(&row.task, patch, updated_at)?;
        row.task = task.clone();
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskStoreError::NotFound(id))
    }
}
