//! Shared fixtures for schedule tests.

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::RwLock;

use crate::schedule::domain::{
    Category, PersistedTaskData, PlannedWindow, Priority, Task, TaskDraft, TaskId, TaskName,
    TaskStatus, UserId,
};

/// Test clock advanced explicitly by each scenario.
#[derive(Debug)]
pub(crate) struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub(crate) fn fixed(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub(crate) fn set(&self, now: DateTime<Utc>) {
        *self.now.write().expect("manual clock poisoned") = now;
    }

    pub(crate) fn advance(&self, delta: Duration) {
        let mut guard = self.now.write().expect("manual clock poisoned");
        *guard = *guard + delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("manual clock poisoned")
    }
}

pub(crate) fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("valid test instant")
}

pub(crate) fn owner() -> UserId {
    UserId::new("user-1").expect("valid owner id")
}

pub(crate) fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> PlannedWindow {
    PlannedWindow::new(start, end).expect("valid planned window")
}

pub(crate) fn morning_window() -> PlannedWindow {
    window(utc(2026, 3, 14, 9, 0, 0), utc(2026, 3, 14, 10, 0, 0))
}

pub(crate) fn draft(name: &str) -> TaskDraft {
    TaskDraft::new(
        TaskName::new(name).expect("valid task name"),
        morning_window(),
        Priority::Medium,
        Category::Work,
    )
}

/// Builds a persisted task in the given lifecycle shape, created at the
/// window start.
pub(crate) fn persisted_task(
    name: &str,
    planned: PlannedWindow,
    status: TaskStatus,
    actual_start_time: Option<DateTime<Utc>>,
    actual_end_time: Option<DateTime<Utc>>,
    duration_seconds: Option<i64>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        owner: owner(),
        name: TaskName::new(name).expect("valid task name"),
        description: None,
        window: planned,
        priority: Priority::Medium,
        category: Category::Work,
        status,
        actual_start_time,
        actual_end_time,
        duration_seconds,
        created_at: planned.start(),
        updated_at: planned.start(),
    })
}

pub(crate) fn pending_task(name: &str, planned: PlannedWindow) -> Task {
    persisted_task(name, planned, TaskStatus::Pending, None, None, None)
}
