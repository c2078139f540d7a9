//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the task board
//! service.

pub mod store;

pub use store::{TaskPatch, TaskStore, TaskStoreError, TaskStoreResult};
