//! Auth provider port supplying session identity and change notifications.

use crate::session::domain::{Credentials, Identity, SessionEvent};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Result type for auth provider operations.
pub type AuthProviderResult<T> = Result<T, AuthProviderError>;

/// Hosted authentication contract.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the currently established identity, if any.
    async fn current_session(&self) -> AuthProviderResult<Option<Identity>>;

    /// Establishes a session from credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::InvalidCredentials`] on any credential
    /// failure; no distinction is made between an unknown user and a wrong
    /// password.
    async fn sign_in(&self, credentials: &Credentials) -> AuthProviderResult<Identity>;

    /// Tears the current session down.
    async fn sign_out(&self) -> AuthProviderResult<()>;

    /// Subscribes to session change notifications (sign-in, sign-out, token
    /// refresh).
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}

/// Errors returned by auth provider implementations.
#[derive(Debug, Clone, Error)]
pub enum AuthProviderError {
    /// The credentials were rejected.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The provider could not be reached or answered abnormally.
    #[error("auth provider unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthProviderError {
    /// Wraps a provider-level failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
