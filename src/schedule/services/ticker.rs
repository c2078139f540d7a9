//! One-second elapsed-time feed for the active task display.
//!
//! The ticker is a pure read-derived clock source: it recomputes the whole
//! seconds elapsed since the task's actual start on a fixed one-second
//! cadence and publishes the value over a watch channel. It owns no
//! persisted state and is torn down by dropping the handle.

use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Returns the whole seconds elapsed from `started_at` to `now`, clamped at
/// zero.
#[must_use]
pub fn elapsed_seconds(started_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - started_at).num_seconds().max(0)
}

/// Repeating one-second driver publishing elapsed whole seconds.
#[must_use = "dropping the ticker stops the elapsed feed"]
#[derive(Debug)]
pub struct ElapsedTicker {
    feed: watch::Receiver<i64>,
    driver: JoinHandle<()>,
}

impl ElapsedTicker {
    /// Starts ticking against the task's actual start instant.
    ///
    /// Must be called within a Tokio runtime; the driver task is aborted
    /// when the ticker is dropped.
    pub fn start<C>(started_at: DateTime<Utc>, clock: Arc<C>) -> Self
    where
        C: Clock + Send + Sync + 'static,
    {
        let (publish, feed) = watch::channel(elapsed_seconds(started_at, clock.utc()));
        let driver = tokio::spawn(async move {
            let mut ticks = interval(Duration::from_secs(1));
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                if publish
                    .send(elapsed_seconds(started_at, clock.utc()))
                    .is_err()
                {
                    break;
                }
            }
        });
        Self { feed, driver }
    }

    /// Returns a receiver observing each published elapsed value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<i64> {
        self.feed.clone()
    }

    /// Returns the most recently published elapsed value.
    #[must_use]
    pub fn elapsed_seconds(&self) -> i64 {
        *self.feed.borrow()
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.driver.abort();
    }
}
