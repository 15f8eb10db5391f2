//! Token acquisition against the identity endpoint.

use std::sync::Arc;

use blobstack_model::meta::{LOGIN_KEY_HEADER, LOGIN_USER_HEADER, STORAGE_URL_HEADER, TOKEN_HEADER};
use blobstack_model::{Credentials, Session, StorageError, StorageResult};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use tracing::debug;

use crate::config::ClientConfig;
use crate::transport::{HttpTransport, RequestSpec, Transport};

/// Exchanges credentials for a [`Session`] via one round trip to the
/// identity endpoint.
///
/// The authenticator never touches the token store; the caller installs the
/// returned session. Re-authentication is just another `authenticate` call -
/// there is no refresh state machine. A 401 from a resource operation is the
/// caller's cue to authenticate again and retry the original operation at
/// most once.
pub struct Authenticator {
    credentials: Credentials,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Read a header as a string, if present and valid UTF-8.
fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
}

/// Encode one credential component as a header value.
fn credential_value(value: &str) -> StorageResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| StorageError::AuthenticationFailed {
        status: StatusCode::BAD_REQUEST,
        reason: format!("credential is not header-encodable: {e}"),
    })
}

impl Authenticator {
    /// Create an authenticator for the given credentials.
    #[must_use]
    pub fn new(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Create an authenticator from configuration, with the bundled HTTP
    /// transport.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transport`] if the transport cannot be
    /// constructed.
    pub fn from_config(config: &ClientConfig) -> StorageResult<Self> {
        let transport = Arc::new(HttpTransport::new(config.timeout())?);
        Ok(Self::new(config.credentials(), transport))
    }

    /// The credentials this authenticator presents.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Perform the login exchange and return a fresh session.
    ///
    /// # Errors
    ///
    /// - [`StorageError::AuthenticationFailed`] on a non-2xx response, or
    ///   when the 2xx response is missing the token or storage-endpoint
    ///   header.
    /// - [`StorageError::Transport`] on I/O or timeout failure. Not retried
    ///   here; retry policy is a caller concern.
    pub async fn authenticate(&self) -> StorageResult<Session> {
        let mut headers = HeaderMap::new();
        headers.insert(
            LOGIN_USER_HEADER,
            credential_value(&self.credentials.login_user())?,
        );
        headers.insert(LOGIN_KEY_HEADER, credential_value(&self.credentials.key)?);

        let spec = RequestSpec::new(Method::GET, self.credentials.auth_endpoint.clone())
            .with_headers(headers);
        debug!(endpoint = %self.credentials.auth_endpoint, "authenticating");

        let mut response = self.transport.execute(spec).await?;
        let status = response.status();
        let reason = response.reason().to_owned();
        // The login response body carries nothing of interest; release the
        // connection before inspecting the outcome.
        response.drain().await?;

        if !status.is_success() {
            return Err(StorageError::AuthenticationFailed { status, reason });
        }

        let missing = |name: &str| StorageError::AuthenticationFailed {
            status,
            reason: format!("response is missing the {name} header"),
        };
        let token =
            header_str(response.headers(), TOKEN_HEADER).ok_or_else(|| missing(TOKEN_HEADER))?;
        let storage_endpoint = header_str(response.headers(), STORAGE_URL_HEADER)
            .ok_or_else(|| missing(STORAGE_URL_HEADER))?;

        debug!(%storage_endpoint, "authenticated");
        Ok(Session::new(token, storage_endpoint))
    }
}
