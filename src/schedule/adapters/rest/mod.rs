//! Hosted-service adapters for task persistence.

mod config;
mod models;
mod store;

pub use config::RestStoreConfig;
pub use models::{NewTaskRow, TaskRow, TaskRowPatch};
pub use store::RestTaskStore;
