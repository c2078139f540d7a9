//! Tests for the daily history roll-ups.

use super::helpers::{persisted_task, utc, window};
use crate::schedule::domain::{
    Task, TaskStatus, daily_history, day_key, tasks_on_day, week_history,
};
use chrono::NaiveDate;
use rstest::rstest;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Two completed and one pending task on the 14th, one pending on the 13th.
fn sample_collection() -> Vec<Task> {
    vec![
        persisted_task(
            "Morning review",
            window(utc(2026, 3, 14, 9, 0, 0), utc(2026, 3, 14, 9, 30, 0)),
            TaskStatus::Completed,
            Some(utc(2026, 3, 14, 9, 2, 0)),
            Some(utc(2026, 3, 14, 9, 32, 0)),
            Some(1800),
        ),
        persisted_task(
            "Afternoon write-up",
            window(utc(2026, 3, 14, 14, 0, 0), utc(2026, 3, 14, 15, 0, 0)),
            TaskStatus::Completed,
            Some(utc(2026, 3, 14, 14, 5, 0)),
            Some(utc(2026, 3, 14, 14, 20, 0)),
            Some(900),
        ),
        persisted_task(
            "Stretch goal",
            window(utc(2026, 3, 14, 18, 0, 0), utc(2026, 3, 14, 19, 0, 0)),
            TaskStatus::Pending,
            None,
            None,
            None,
        ),
        persisted_task(
            "Yesterday's errand",
            window(utc(2026, 3, 13, 11, 0, 0), utc(2026, 3, 13, 12, 0, 0)),
            TaskStatus::Pending,
            None,
            None,
            None,
        ),
    ]
}

#[rstest]
fn day_key_buckets_by_planned_start_date() {
    let task = persisted_task(
        "Late task",
        window(utc(2026, 3, 14, 23, 30, 0), utc(2026, 3, 15, 0, 30, 0)),
        TaskStatus::Pending,
        None,
        None,
        None,
    );
    assert_eq!(day_key(&task), date(2026, 3, 14));
}

#[rstest]
fn daily_history_rolls_days_up_newest_first() {
    let history = daily_history(&sample_collection());

    assert_eq!(history.len(), 2);
    let newest = history.first().expect("newest day present");
    assert_eq!(newest.date(), date(2026, 3, 14));
    assert_eq!(newest.total(), 3);
    assert_eq!(newest.completed(), 2);
    assert_eq!(newest.tracked_seconds(), 2700);

    let older = history.get(1).expect("older day present");
    assert_eq!(older.date(), date(2026, 3, 13));
    assert_eq!(older.total(), 1);
    assert_eq!(older.completed(), 0);
    assert_eq!(older.tracked_seconds(), 0);
}

#[rstest]
fn daily_history_of_an_empty_collection_is_empty() {
    assert!(daily_history(&[]).is_empty());
}

#[rstest]
fn week_history_covers_seven_days_including_idle_ones() {
    // 2026-03-09 is the Monday of the sample week.
    let week = week_history(&sample_collection(), date(2026, 3, 9));

    assert_eq!(week.len(), 7);
    let dates: Vec<NaiveDate> = week.iter().map(|day| day.date()).collect();
    assert_eq!(dates.first(), Some(&date(2026, 3, 9)));
    assert_eq!(dates.last(), Some(&date(2026, 3, 15)));

    let saturday = week.get(5).expect("saturday present");
    assert_eq!(saturday.date(), date(2026, 3, 14));
    assert_eq!(saturday.completed(), 2);
    let idle_monday = week.first().expect("monday present");
    assert_eq!(idle_monday.total(), 0);
    assert_eq!(idle_monday.tracked_seconds(), 0);
}

#[rstest]
fn tasks_on_day_filters_and_orders_by_planned_start() {
    let collection = sample_collection();
    let day_tasks = tasks_on_day(&collection, date(2026, 3, 14));

    let names: Vec<&str> = day_tasks
        .iter()
        .map(|task| task.name().as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Morning review", "Afternoon write-up", "Stretch goal"]
    );
}

#[rstest]
fn tasks_on_day_is_empty_for_an_idle_day() {
    assert!(tasks_on_day(&sample_collection(), date(2026, 3, 20)).is_empty());
}
