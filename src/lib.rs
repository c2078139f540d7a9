//! Timedeck: personal task-tracking dashboard core.
//!
//! This crate provides the task lifecycle state machine, time-accounting
//! rules, and persistence facade behind a personal task dashboard. Tasks are
//! scheduled with a planned window, priority, and category, move through a
//! Pending → In Progress → Completed lifecycle while actual elapsed time is
//! tracked, and are reviewed through daily roll-ups.
//!
//! # Architecture
//!
//! Timedeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (hosted store, test
//!   doubles)
//!
//! # Modules
//!
//! - [`schedule`]: Task lifecycle, time accounting, and persistence facade
//! - [`session`]: Authenticated identity gating the dashboard
//! - [`timeutil`]: Pure quarter-hour quantization and display formatting

pub mod schedule;
pub mod session;
pub mod timeutil;
