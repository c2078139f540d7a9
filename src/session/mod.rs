//! Authenticated session management for Timedeck.
//!
//! The dashboard is only reachable with an established identity. This
//! module defines the auth provider contract, the session-change event
//! stream, and the gate service that keeps a live identity reference for
//! the views. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
