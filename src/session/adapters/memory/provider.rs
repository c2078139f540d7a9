//! In-process auth provider for tests and offline demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tokio::sync::broadcast;

use crate::schedule::domain::UserId;
use crate::session::{
    domain::{Credentials, Identity, SessionEvent},
    ports::{AuthProvider, AuthProviderError, AuthProviderResult},
};

const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    identity: Identity,
}

/// Auth provider backed by a fixed in-memory credential table.
///
/// Sign-in failures are indistinguishable between an unknown email and a
/// wrong password, matching the hosted provider's behaviour.
#[derive(Debug)]
pub struct InMemoryAuthProvider {
    accounts: HashMap<String, Account>,
    session: RwLock<Option<Identity>>,
    events: broadcast::Sender<SessionEvent>,
}

impl InMemoryAuthProvider {
    /// Creates a provider with no registered accounts and no session.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            accounts: HashMap::new(),
            session: RwLock::new(None),
            events,
        }
    }

    /// Registers an account the provider will accept.
    #[must_use]
    pub fn with_account(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        user_id: UserId,
    ) -> Self {
        let email = email.into();
        self.accounts.insert(email.clone(), Account {
            password: password.into(),
            identity: Identity::new(user_id, email),
        });
        self
    }

    /// Re-announces the current identity as a token refresh, when signed in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::Unavailable`] when the session state is
    /// poisoned.
    pub fn refresh_token(&self) -> AuthProviderResult<()> {
        let session = self.session.read().map_err(poisoned)?;
        if let Some(identity) = session.clone() {
            self.emit(SessionEvent::TokenRefreshed(identity));
        }
        Ok(())
    }

    fn emit(&self, event: SessionEvent) {
        // Err only means there are no live subscribers.
        self.events.send(event).ok();
    }
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(err: impl std::fmt::Display) -> AuthProviderError {
    AuthProviderError::unavailable(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn current_session(&self) -> AuthProviderResult<Option<Identity>> {
        Ok(self.session.read().map_err(poisoned)?.clone())
    }

    async fn sign_in(&self, credentials: &Credentials) -> AuthProviderResult<Identity> {
        let identity = self
            .accounts
            .get(credentials.email())
            .filter(|account| account.password == credentials.password())
            .map(|account| account.identity.clone())
            .ok_or(AuthProviderError::InvalidCredentials)?;
        *self.session.write().map_err(poisoned)? = Some(identity.clone());
        self.emit(SessionEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> AuthProviderResult<()> {
        *self.session.write().map_err(poisoned)? = None;
        self.emit(SessionEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
