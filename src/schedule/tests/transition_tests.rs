//! Unit tests for the guarded lifecycle transitions and time accounting.

use super::helpers::{ManualClock, morning_window, pending_task, persisted_task, utc};
use crate::schedule::domain::{ScheduleDomainError, TaskStatus};
use chrono::Duration;
use eyre::ensure;
use rstest::rstest;

#[rstest]
fn begin_stamps_actual_start_from_the_clock() -> eyre::Result<()> {
    let clock = ManualClock::fixed(utc(2026, 3, 14, 9, 5, 0));
    let mut task = pending_task("Write spec", morning_window());

    let started = task.begin(&clock)?;

    ensure!(started == utc(2026, 3, 14, 9, 5, 0));
    ensure!(task.status() == TaskStatus::InProgress);
    ensure!(task.actual_start_time() == Some(started));
    ensure!(task.actual_end_time().is_none());
    ensure!(task.duration_seconds().is_none());
    ensure!(task.updated_at() == started);
    Ok(())
}

#[rstest]
#[case(TaskStatus::InProgress)]
#[case(TaskStatus::Completed)]
fn begin_rejects_tasks_that_are_not_pending(#[case] status: TaskStatus) {
    let clock = ManualClock::fixed(utc(2026, 3, 14, 9, 5, 0));
    let actual_end = (status == TaskStatus::Completed).then(|| utc(2026, 3, 14, 9, 3, 0));
    let duration = (status == TaskStatus::Completed).then_some(180);
    let mut task = persisted_task(
        "Fixture",
        morning_window(),
        status,
        Some(utc(2026, 3, 14, 9, 0, 0)),
        actual_end,
        duration,
    );
    let before = task.clone();

    let result = task.begin(&clock);

    assert_eq!(
        result,
        Err(ScheduleDomainError::NotStartable {
            task_id: task.id(),
            status,
        })
    );
    assert_eq!(task, before);
}

#[rstest]
fn finish_records_whole_second_duration() -> eyre::Result<()> {
    let clock = ManualClock::fixed(utc(2026, 3, 14, 9, 5, 0));
    let mut task = pending_task("Write spec", morning_window());
    task.begin(&clock)?;

    clock.set(utc(2026, 3, 14, 9, 50, 0));
    let notice = task.finish(&clock)?;

    ensure!(notice.duration_seconds() == 2700);
    ensure!(notice.completed_at() == utc(2026, 3, 14, 9, 50, 0));
    ensure!(task.status() == TaskStatus::Completed);
    ensure!(task.actual_end_time() == Some(utc(2026, 3, 14, 9, 50, 0)));
    ensure!(task.duration_seconds() == Some(2700));
    Ok(())
}

#[rstest]
fn finish_floors_sub_second_elapsed_time() -> eyre::Result<()> {
    let clock = ManualClock::fixed(utc(2026, 3, 14, 9, 0, 0));
    let mut task = pending_task("Write spec", morning_window());
    task.begin(&clock)?;

    clock.advance(Duration::seconds(10) + Duration::milliseconds(900));
    let notice = task.finish(&clock)?;

    ensure!(notice.duration_seconds() == 10);
    Ok(())
}

#[rstest]
#[case(TaskStatus::Pending)]
#[case(TaskStatus::Completed)]
fn finish_rejects_tasks_that_are_not_in_progress(#[case] status: TaskStatus) {
    let clock = ManualClock::fixed(utc(2026, 3, 14, 9, 50, 0));
    let mut task = persisted_task("Fixture", morning_window(), status, None, None, None);
    let before = task.clone();

    let result = task.finish(&clock);

    assert_eq!(
        result,
        Err(ScheduleDomainError::NotCompletable {
            task_id: task.id(),
            status,
        })
    );
    assert_eq!(task, before);
}

#[rstest]
fn finish_rejects_a_missing_actual_start() {
    // An In Progress record with no start stamp can only come from a store
    // written outside the guarded transitions.
    let clock = ManualClock::fixed(utc(2026, 3, 14, 9, 50, 0));
    let mut task = persisted_task(
        "Fixture",
        morning_window(),
        TaskStatus::InProgress,
        None,
        None,
        None,
    );
    let before = task.clone();

    let result = task.finish(&clock);

    assert_eq!(
        result,
        Err(ScheduleDomainError::MissingActualStart {
            task_id: task.id()
        })
    );
    assert_eq!(task, before);
}

#[rstest]
fn completion_notice_renders_decomposed_duration() -> eyre::Result<()> {
    let clock = ManualClock::fixed(utc(2026, 3, 14, 9, 5, 0));
    let mut task = pending_task("Write spec", morning_window());
    task.begin(&clock)?;

    clock.advance(Duration::hours(1) + Duration::minutes(5) + Duration::seconds(20));
    let notice = task.finish(&clock)?;

    ensure!(notice.to_string() == "Task completed! Duration: 1h 5m 20s");
    Ok(())
}

#[rstest]
fn elapsed_seconds_derives_from_the_running_clock() -> eyre::Result<()> {
    let clock = ManualClock::fixed(utc(2026, 3, 14, 9, 5, 0));
    let mut task = pending_task("Write spec", morning_window());
    ensure!(task.elapsed_seconds(&clock).is_none());

    task.begin(&clock)?;
    clock.advance(Duration::seconds(42));

    ensure!(task.elapsed_seconds(&clock) == Some(42));
    Ok(())
}
