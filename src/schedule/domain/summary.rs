//! Daily roll-ups over the task collection for history review.
//!
//! Tasks are bucketed by the calendar date (UTC) of their planned start.
//! The history view lists days newest-first with a completed-of-total count
//! and the total tracked time for the day; the per-day summary lists that
//! day's tasks in planned order.

use super::{Task, TaskStatus};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One day's activity roll-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayActivity {
    date: NaiveDate,
    total: usize,
    completed: usize,
    tracked_seconds: i64,
}

impl DayActivity {
    /// Returns the calendar date of this roll-up.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the number of tasks planned on this day.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns how many of the day's tasks completed.
    #[must_use]
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Returns the total tracked duration for the day, in whole seconds.
    #[must_use]
    pub const fn tracked_seconds(&self) -> i64 {
        self.tracked_seconds
    }
}

/// Returns the calendar date bucket a task belongs to.
#[must_use]
pub fn day_key(task: &Task) -> NaiveDate {
    task.window().start().date_naive()
}

/// Rolls the collection up into per-day activity, newest day first.
#[must_use]
pub fn daily_history(tasks: &[Task]) -> Vec<DayActivity> {
    let mut days: BTreeMap<NaiveDate, DayActivity> = BTreeMap::new();
    for task in tasks {
        let date = day_key(task);
        let entry = days.entry(date).or_insert(DayActivity {
            date,
            total: 0,
            completed: 0,
            tracked_seconds: 0,
        });
        entry.total += 1;
        if task.status() == TaskStatus::Completed {
            entry.completed += 1;
            entry.tracked_seconds += task.duration_seconds().unwrap_or(0);
        }
    }
    days.into_values().rev().collect()
}

/// Rolls one calendar week up into seven [`DayActivity`] entries starting at
/// `week_start`, including days with no planned tasks.
#[must_use]
pub fn week_history(tasks: &[Task], week_start: NaiveDate) -> Vec<DayActivity> {
    let by_day = daily_history(tasks);
    week_start
        .iter_days()
        .take(7)
        .map(|date| {
            by_day
                .iter()
                .find(|activity| activity.date() == date)
                .copied()
                .unwrap_or(DayActivity {
                    date,
                    total: 0,
                    completed: 0,
                    tracked_seconds: 0,
                })
        })
        .collect()
}

/// Returns the tasks planned on the given day, ordered by planned start.
#[must_use]
pub fn tasks_on_day<'a>(tasks: &'a [Task], date: NaiveDate) -> Vec<&'a Task> {
    let mut day_tasks: Vec<&Task> = tasks.iter().filter(|task| day_key(task) == date).collect();
    day_tasks.sort_by_key(|task| task.window().start());
    day_tasks
}
