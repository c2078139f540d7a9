//! Connection settings for the hosted task store.

use serde::Deserialize;
use std::fmt;

/// Connection settings for [`RestTaskStore`](super::RestTaskStore).
///
/// Deserializable from the application's configuration file; the timeout
/// defaults to thirty seconds when unset.
#[derive(Clone, Deserialize)]
pub struct RestStoreConfig {
    /// Service root, e.g. `https://example.supabase.co/rest/v1`.
    pub base_url: String,
    /// API key presented as both the `apikey` and bearer token headers.
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl RestStoreConfig {
    /// Creates a configuration with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// The API key must never land in logs.
impl fmt::Debug for RestStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestStoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
