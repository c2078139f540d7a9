//! Application services for session management.

mod gate;

pub use gate::{SessionGate, SessionGateError, SessionGateResult};
