//! Session gate keeping the dashboard behind an authenticated identity.
//!
//! The gate holds the process-wide identity state: it is initialized from
//! the provider's current session and kept in sync by a listener applying
//! session-change events for as long as the gate is alive. Dropping the
//! gate aborts the listener, so no event is ever applied to a torn-down
//! view.

use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::session::{
    domain::{Identity, SessionEvent},
    ports::{AuthProvider, AuthProviderError},
};

/// Errors returned by the session gate.
#[derive(Debug, Clone, Error)]
pub enum SessionGateError {
    /// The auth provider failed.
    #[error(transparent)]
    Provider(#[from] AuthProviderError),

    /// No identity is present; the caller must be sent to sign in.
    #[error("sign-in required")]
    SignInRequired,

    /// The gate's identity lock was poisoned by a panicking accessor.
    #[error("session state lock poisoned")]
    StatePoisoned,
}

/// Result type for session gate operations.
pub type SessionGateResult<T> = Result<T, SessionGateError>;

/// Identity state synchronized with the auth provider.
#[derive(Debug)]
pub struct SessionGate {
    identity: Arc<RwLock<Option<Identity>>>,
    listener: JoinHandle<()>,
}

impl SessionGate {
    /// Attaches to the provider: reads the current session and starts
    /// applying session-change events.
    ///
    /// Must be called within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SessionGateError::Provider`] when the initial session read
    /// fails.
    pub async fn attach<P>(provider: &P) -> SessionGateResult<Self>
    where
        P: AuthProvider + ?Sized,
    {
        // Subscribe before the initial read so no change between the two is
        // lost.
        let mut events = provider.subscribe();
        let identity = Arc::new(RwLock::new(provider.current_session().await?));

        let shared = Arc::clone(&identity);
        let listener = tokio::spawn(async move {
            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                };
                let Ok(mut current) = shared.write() else {
                    break;
                };
                match event {
                    SessionEvent::SignedIn(signed_in)
                    | SessionEvent::TokenRefreshed(signed_in) => *current = Some(signed_in),
                    SessionEvent::SignedOut => *current = None,
                }
            }
        });

        Ok(Self { identity, listener })
    }

    /// Returns the current identity, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionGateError::StatePoisoned`] when the identity lock is
    /// poisoned.
    pub fn identity(&self) -> SessionGateResult<Option<Identity>> {
        Ok(self
            .identity
            .read()
            .map_err(|_| SessionGateError::StatePoisoned)?
            .clone())
    }

    /// Returns the current identity, or [`SessionGateError::SignInRequired`]
    /// while signed out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionGateError::SignInRequired`] when no identity is
    /// present, or [`SessionGateError::StatePoisoned`] when the identity
    /// lock is poisoned.
    pub fn require_identity(&self) -> SessionGateResult<Identity> {
        self.identity()?.ok_or(SessionGateError::SignInRequired)
    }
}

impl Drop for SessionGate {
    fn drop(&mut self) {
        self.listener.abort();
    }
}
