//! The resource client: peek, read, and configure against any level of the
//! storage hierarchy.
//!
//! Operations share one shape: resolve the current session, build a request
//! with the token and accept headers, issue it through the transport,
//! classify the status, hand the raw response to the caller's continuation,
//! and drain whatever the continuation left of the body so the connection is
//! always released. No retries happen here; transient failures (including
//! auth expiry) surface to the caller, who decides whether to
//! re-authenticate and retry.
//!
//! `configure` is fire-and-acknowledge: the service applies metadata
//! mutations asynchronously, so a configure followed immediately by a peek
//! may observe the old state. Callers needing confirmation poll with their
//! own delay; there is no wait-for-visibility primitive.

use std::collections::HashMap;
use std::sync::Arc;

use blobstack_model::meta::{MetaEntry, TOKEN_HEADER, collect_metadata};
use blobstack_model::{
    Classification, Credentials, Operation, ResourceLevel, ResourceLocator, Session, StorageError,
    StorageResult, TransportError, classify,
};
use bytes::Bytes;
use futures::FutureExt;
use futures::future::BoxFuture;
use http::{HeaderMap, HeaderValue, StatusCode, header};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::{debug, warn};

use crate::auth::Authenticator;
use crate::config::{ClientConfig, StaleTokenPolicy};
use crate::session::TokenStore;
use crate::transport::{HttpTransport, RequestSpec, ResponseHandle, Transport};

/// Characters escaped inside one URL path segment.
const SEGMENT_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/');

/// The classified result of one resource operation.
///
/// Only [`Classification::Success`] and [`Classification::ExpectedAbsence`]
/// reach callers as an `Outcome`; every other class is a
/// [`StorageError`].
#[derive(Debug)]
pub struct Outcome<T> {
    /// Outcome class for the operation and level.
    pub classification: Classification,
    /// Raw HTTP status behind the classification.
    pub status: StatusCode,
    /// Response headers, carrying resource metadata.
    pub headers: HeaderMap,
    /// Level of the locator the operation addressed.
    pub level: ResourceLevel,
    /// Continuation result.
    pub value: T,
}

impl<T> Outcome<T> {
    /// Whether this outcome is the documented "resource absent" result.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.classification == Classification::ExpectedAbsence
    }

    /// Decoded metadata of this outcome's level, keyed by joined path.
    #[must_use]
    pub fn metadata(&self) -> HashMap<String, String> {
        collect_metadata(self.level, &self.headers)
    }
}

/// No-op continuation for operations whose body is not interesting.
fn discard_body(_resp: &mut ResponseHandle) -> BoxFuture<'_, ()> {
    futures::future::ready(()).boxed()
}

/// Continuation buffering the whole body.
fn buffer_body(resp: &mut ResponseHandle) -> BoxFuture<'_, Result<Bytes, TransportError>> {
    resp.collect_bytes().boxed()
}

/// Client for the three canonical operations against account, container,
/// and object resources.
///
/// Cheap to share: all operations take `&self`, and the token store is safe
/// under concurrent access. The client holds no connection state of its own;
/// that lives behind the [`Transport`].
pub struct ResourceClient {
    transport: Arc<dyn Transport>,
    authenticator: Authenticator,
    store: TokenStore,
    account: String,
    stale_token_policy: StaleTokenPolicy,
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("account", &self.account)
            .field("stale_token_policy", &self.stale_token_policy)
            .field("authenticated", &self.store.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl ResourceClient {
    /// Create a client over the given transport.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Credentials,
        stale_token_policy: StaleTokenPolicy,
    ) -> Self {
        let account = credentials.account.clone();
        let authenticator = Authenticator::new(credentials, Arc::clone(&transport));
        Self {
            transport,
            authenticator,
            store: TokenStore::new(),
            account,
            stale_token_policy,
        }
    }

    /// Create a client from configuration, with the bundled HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transport`] if the transport cannot be
    /// constructed.
    pub fn from_config(config: &ClientConfig) -> StorageResult<Self> {
        let transport = Arc::new(HttpTransport::new(config.timeout())?);
        Ok(Self::new(
            transport,
            config.credentials(),
            config.stale_token_policy,
        ))
    }

    /// The token store holding the current session.
    #[must_use]
    pub fn token_store(&self) -> &TokenStore {
        &self.store
    }

    /// The authenticator for this client's credentials.
    #[must_use]
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Authenticate and install the resulting session.
    ///
    /// Call again to refresh after an [`StorageError::AuthExpired`]; the new
    /// session replaces the old one wholesale.
    ///
    /// # Errors
    ///
    /// Propagates [`Authenticator::authenticate`] failures; the stored
    /// session is left untouched on failure.
    pub async fn login(&self) -> StorageResult<()> {
        let session = self.authenticator.authenticate().await?;
        self.store.set(session);
        Ok(())
    }

    /// Resolve the URL for a locator under the current session.
    fn resource_url(&self, session: &Session, locator: &ResourceLocator) -> String {
        let mut url = session.storage_endpoint.trim_end_matches('/').to_owned();
        push_segment(&mut url, &self.account);
        match locator {
            ResourceLocator::Account => {}
            ResourceLocator::Container { container } => push_segment(&mut url, container),
            ResourceLocator::Object { container, object } => {
                push_segment(&mut url, container);
                push_segment(&mut url, object);
            }
        }
        url
    }

    /// Metadata-only existence/inspection request.
    ///
    /// For containers, absence is a normal outcome
    /// ([`Outcome::is_absent`]); for accounts and objects it is an error.
    ///
    /// # Errors
    ///
    /// [`StorageError::NotAuthenticated`], [`StorageError::AuthExpired`]
    /// (per policy), [`StorageError::UnexpectedStatus`], or
    /// [`StorageError::Transport`].
    pub async fn peek(
        &self,
        locator: &ResourceLocator,
        extra: HeaderMap,
    ) -> StorageResult<Outcome<()>> {
        self.execute(Operation::Peek, locator, extra, discard_body)
            .await
    }

    /// Full-content request with a caller-supplied continuation.
    ///
    /// The continuation receives the raw response handle and may stream the
    /// body; whatever it leaves unread is drained before this returns, so
    /// the transport connection is released on every exit path.
    ///
    /// # Errors
    ///
    /// As [`peek`](Self::peek).
    pub async fn read_with<T, F>(
        &self,
        locator: &ResourceLocator,
        extra: HeaderMap,
        f: F,
    ) -> StorageResult<Outcome<T>>
    where
        T: Send,
        F: for<'a> FnOnce(&'a mut ResponseHandle) -> BoxFuture<'a, T> + Send,
    {
        self.execute(Operation::Read, locator, extra, f).await
    }

    /// Full-content request, buffering the body.
    ///
    /// Convenience over [`read_with`](Self::read_with) for bodies that are
    /// known to be small.
    ///
    /// # Errors
    ///
    /// As [`peek`](Self::peek), plus [`StorageError::Transport`] if the body
    /// stream fails mid-read.
    pub async fn read(
        &self,
        locator: &ResourceLocator,
        extra: HeaderMap,
    ) -> StorageResult<Outcome<Bytes>> {
        let outcome = self.read_with(locator, extra, buffer_body).await?;
        Ok(Outcome {
            classification: outcome.classification,
            status: outcome.status,
            headers: outcome.headers,
            level: outcome.level,
            value: outcome.value?,
        })
    }

    /// Metadata-mutation request.
    ///
    /// Each entry becomes one add or remove meta header, encoded for the
    /// locator's level. The service acknowledges before applying: a
    /// subsequent peek may still observe the previous metadata state.
    ///
    /// # Errors
    ///
    /// As [`peek`](Self::peek), plus [`StorageError::InvalidKey`] if an
    /// entry's path cannot be encoded.
    pub async fn configure(
        &self,
        locator: &ResourceLocator,
        entries: &[MetaEntry],
        extra: HeaderMap,
    ) -> StorageResult<Outcome<()>> {
        let mut headers = extra;
        for entry in entries {
            let (name, value) = entry.to_header(locator.level())?;
            headers.append(name, value);
        }
        self.execute(Operation::Configure, locator, headers, discard_body)
            .await
    }

    /// Shared request/classify/continue/drain pipeline.
    async fn execute<T, F>(
        &self,
        op: Operation,
        locator: &ResourceLocator,
        extra: HeaderMap,
        f: F,
    ) -> StorageResult<Outcome<T>>
    where
        T: Send,
        F: for<'a> FnOnce(&'a mut ResponseHandle) -> BoxFuture<'a, T> + Send,
    {
        let session = self.store.get()?;

        let mut headers = extra;
        // The session token is injected unless the caller supplied one
        // deliberately (e.g. probing with a superseded token).
        if !headers.contains_key(TOKEN_HEADER) {
            let token = HeaderValue::from_str(&session.token).map_err(|e| {
                StorageError::AuthenticationFailed {
                    status: StatusCode::BAD_REQUEST,
                    reason: format!("session token is not header-encodable: {e}"),
                }
            })?;
            headers.insert(TOKEN_HEADER, token);
        }
        if !headers.contains_key(header::ACCEPT) {
            headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
        }

        let url = self.resource_url(&session, locator);
        debug!(op = op.as_str(), level = %locator.level(), %url, "issuing request");

        let spec = RequestSpec::new(op.method(), url).with_headers(headers);
        let mut response = self.transport.execute(spec).await?;
        let status = response.status();
        let classification = classify(op, locator.level(), status);

        match classification {
            Classification::Success | Classification::ExpectedAbsence => {
                let value = f(&mut response).await;
                response.drain().await?;
                Ok(Outcome {
                    classification,
                    status,
                    headers: response.headers().clone(),
                    level: locator.level(),
                    value,
                })
            }
            Classification::AuthExpired => {
                response.drain().await?;
                warn!(op = op.as_str(), %status, "token rejected");
                match self.stale_token_policy {
                    StaleTokenPolicy::AuthExpired => Err(StorageError::AuthExpired),
                    StaleTokenPolicy::ClientError => Err(StorageError::UnexpectedStatus {
                        status,
                        reason: response.reason().to_owned(),
                    }),
                }
            }
            Classification::ClientError | Classification::ServerError => {
                let reason = response.reason().to_owned();
                response.drain().await?;
                warn!(op = op.as_str(), %status, "unexpected status");
                Err(StorageError::UnexpectedStatus { status, reason })
            }
        }
    }
}

/// Append one percent-encoded path segment.
fn push_segment(url: &mut String, segment: &str) {
    url.push('/');
    url.push_str(&utf8_percent_encode(segment, SEGMENT_ESCAPE).to_string());
}
