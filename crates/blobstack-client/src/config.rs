//! Client configuration, driven by environment variables.

use std::fmt;
use std::time::Duration;

use blobstack_model::Credentials;

/// Which error a 401 from a resource operation maps to.
///
/// The backend contract for a stale or superseded token is not pinned down;
/// until it is, the mapping is policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaleTokenPolicy {
    /// Surface as [`StorageError::AuthExpired`](blobstack_model::StorageError::AuthExpired).
    #[default]
    AuthExpired,
    /// Surface as a generic
    /// [`StorageError::UnexpectedStatus`](blobstack_model::StorageError::UnexpectedStatus).
    ClientError,
}

/// Configuration for a BlobStack client.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Identity endpoint URL.
    pub auth_endpoint: String,
    /// Account identifier.
    pub account: String,
    /// User name.
    pub user: String,
    /// Secret API key.
    pub key: String,
    /// Per-exchange timeout in seconds.
    pub timeout_secs: u64,
    /// Classification policy for rejected tokens.
    pub stale_token_policy: StaleTokenPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_endpoint: "http://localhost:8080/auth/v1.0".to_owned(),
            account: "test".to_owned(),
            user: "tester".to_owned(),
            key: "testing".to_owned(),
            timeout_secs: 30,
            stale_token_policy: StaleTokenPolicy::default(),
        }
    }
}

// The key is a secret; keep it out of Debug output.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("auth_endpoint", &self.auth_endpoint)
            .field("account", &self.account)
            .field("user", &self.user)
            .field("key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("stale_token_policy", &self.stale_token_policy)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized: `BLOBSTACK_AUTH_ENDPOINT`, `BLOBSTACK_ACCOUNT`,
    /// `BLOBSTACK_USER`, `BLOBSTACK_KEY`, `BLOBSTACK_TIMEOUT_SECS`,
    /// `BLOBSTACK_STALE_TOKEN_POLICY` (`auth-expired` or `client-error`).
    /// Unset or unparsable variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("BLOBSTACK_AUTH_ENDPOINT") {
            config.auth_endpoint = v;
        }
        if let Ok(v) = std::env::var("BLOBSTACK_ACCOUNT") {
            config.account = v;
        }
        if let Ok(v) = std::env::var("BLOBSTACK_USER") {
            config.user = v;
        }
        if let Ok(v) = std::env::var("BLOBSTACK_KEY") {
            config.key = v;
        }
        if let Ok(v) = std::env::var("BLOBSTACK_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse() {
                config.timeout_secs = secs;
            }
        }
        if let Ok(v) = std::env::var("BLOBSTACK_STALE_TOKEN_POLICY") {
            if v.eq_ignore_ascii_case("client-error") {
                config.stale_token_policy = StaleTokenPolicy::ClientError;
            }
        }

        config
    }

    /// Per-exchange timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The credentials this configuration describes.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.auth_endpoint, &self.account, &self.user, &self.key)
    }
}
