//! Tests for the one-second elapsed display driver.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use super::helpers::{ManualClock, utc};
use crate::schedule::services::{ElapsedTicker, elapsed_seconds};
use chrono::Duration;
use rstest::rstest;

#[rstest]
fn elapsed_seconds_floors_and_clamps() {
    let started = utc(2026, 3, 14, 9, 5, 0);
    assert_eq!(elapsed_seconds(started, started), 0);
    assert_eq!(
        elapsed_seconds(started, started + Duration::milliseconds(41_900)),
        41
    );
    assert_eq!(
        elapsed_seconds(started, started - Duration::seconds(5)),
        0
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn ticker_publishes_the_running_elapsed_value() {
    let started = utc(2026, 3, 14, 9, 5, 0);
    let clock = Arc::new(ManualClock::fixed(started));
    let ticker = ElapsedTicker::start(started, Arc::clone(&clock));
    let mut feed = ticker.subscribe();

    clock.advance(Duration::seconds(65));
    loop {
        feed.changed().await.expect("ticker feed open");
        if *feed.borrow_and_update() >= 65 {
            break;
        }
    }

    assert_eq!(ticker.elapsed_seconds(), 65);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn ticker_keeps_pace_with_the_clock() {
    let started = utc(2026, 3, 14, 9, 5, 0);
    let clock = Arc::new(ManualClock::fixed(started));
    let ticker = ElapsedTicker::start(started, Arc::clone(&clock));
    let mut feed = ticker.subscribe();

    for expected in 1..=3_i64 {
        clock.set(started + Duration::seconds(expected));
        loop {
            feed.changed().await.expect("ticker feed open");
            if *feed.borrow_and_update() >= expected {
                break;
            }
        }
    }

    assert!(ticker.elapsed_seconds() >= 3);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn dropping_the_ticker_closes_the_feed() {
    let started = utc(2026, 3, 14, 9, 5, 0);
    let clock = Arc::new(ManualClock::fixed(started));
    let ticker = ElapsedTicker::start(started, clock);
    let mut feed = ticker.subscribe();

    drop(ticker);

    // Drain any value published before the abort landed; the feed must then
    // report the sender as gone rather than tick forever.
    let closed = tokio::time::timeout(StdDuration::from_secs(60), async {
        while feed.changed().await.is_ok() {}
    })
    .await;
    assert!(closed.is_ok());
}
