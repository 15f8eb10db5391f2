//! Integration tests against a live BlobStack-compatible storage service.
//!
//! These tests require a running service reachable through the `BLOBSTACK_*`
//! environment variables (defaults target `localhost:8080` with the stock
//! test credentials). They are marked `#[ignore]` so they don't run during
//! normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p blobstack-integration -- --ignored
//! ```
//!
//! Metadata mutations are eventually consistent: the service acknowledges a
//! configure before applying it, so assertions on metadata go through
//! [`wait_for_metadata`], which polls with a short delay.

use std::sync::Once;
use std::time::Duration;

use blobstack_client::{ClientConfig, ResourceClient};
use blobstack_model::ResourceLocator;
use http::HeaderMap;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Configuration for the service under test, from the environment.
#[must_use]
pub fn test_config() -> ClientConfig {
    init_tracing();
    ClientConfig::from_env()
}

/// Create a client and complete the login exchange.
///
/// # Panics
///
/// Panics if the service is unreachable or rejects the configured
/// credentials.
pub async fn logged_in_client() -> ResourceClient {
    let config = test_config();
    let client = ResourceClient::from_config(&config).expect("transport construction");
    client
        .login()
        .await
        .unwrap_or_else(|e| panic!("login against {} failed: {e}", config.auth_endpoint));
    client
}

/// Generate a unique name for a test resource.
///
/// Hex-only suffix, so the result is also usable as a metadata path segment.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string()[..8].to_owned();
    format!("test_{prefix}_{id}")
}

/// Poll a resource's metadata until `key` has the expected presence/value or
/// the attempts run out. Returns whether the expectation was observed.
pub async fn wait_for_metadata(
    client: &ResourceClient,
    locator: &ResourceLocator,
    key: &str,
    expected: Option<&str>,
) -> bool {
    for _ in 0..20 {
        let outcome = client
            .peek(locator, HeaderMap::new())
            .await
            .expect("peek while polling metadata");
        if outcome.metadata().get(key).map(String::as_str) == expected {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    false
}

mod test_account;
mod test_auth;
mod test_container;
mod test_object;
