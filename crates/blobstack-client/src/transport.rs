//! Transport seam: one HTTP exchange per call.
//!
//! The client core depends only on the object-safe [`Transport`] trait, so
//! the actual HTTP machinery stays replaceable (and mockable in tests).
//! [`HttpTransport`] is the bundled implementation over `reqwest`.
//!
//! # Object safety
//!
//! [`Transport`] uses `#[async_trait]` because it must be object-safe for
//! dynamic dispatch (`Arc<dyn Transport>`).

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use blobstack_model::TransportError;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::BoxStream;
use http::{HeaderMap, Method, StatusCode};

/// One HTTP request, built fresh per call and never reused.
pub struct RequestSpec {
    /// HTTP method.
    pub method: Method,
    /// Fully resolved URL.
    pub url: String,
    /// Request headers. Multiple values for the same key keep their order.
    pub headers: HeaderMap,
    /// Optional request body.
    pub body: Option<Bytes>,
}

impl RequestSpec {
    /// Create a spec with no headers and no body.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Replace the header map.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

// Header values can carry credentials, so only names are printed.
impl fmt::Debug for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSpec")
            .field("method", &self.method)
            .field("url", &self.url)
            .field(
                "headers",
                &self.headers.keys().map(http::HeaderName::as_str).collect::<Vec<_>>(),
            )
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .finish()
    }
}

/// Lazily pulled response body chunks.
pub type BodyStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// A raw response: status, headers, and a lazily readable body stream.
///
/// The stream must be consumed to completion before the underlying
/// connection can be reused; the resource client guarantees that by calling
/// [`drain`](Self::drain) on every exit path.
pub struct ResponseHandle {
    status: StatusCode,
    reason: String,
    headers: HeaderMap,
    body: BodyStream,
}

impl ResponseHandle {
    /// Assemble a handle. The reason phrase falls back to the canonical one
    /// when the wire carried none (HTTP/2 has no reason phrase at all).
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: BodyStream) -> Self {
        let reason = status.canonical_reason().unwrap_or("").to_owned();
        Self {
            status,
            reason,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Response headers (multi-valued).
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Pull the next body chunk, or `None` at end of stream.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>, TransportError> {
        self.body.next().await.transpose()
    }

    /// Buffer the remainder of the body into one contiguous allocation.
    pub async fn collect_bytes(&mut self) -> Result<Bytes, TransportError> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }

    /// Consume and discard the remainder of the body, releasing the
    /// underlying connection.
    pub async fn drain(&mut self) -> Result<(), TransportError> {
        while self.chunk().await?.is_some() {}
        Ok(())
    }
}

impl fmt::Debug for ResponseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseHandle")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Performs one HTTP exchange and returns the raw response.
///
/// Implementations must honor a caller-configured timeout; expiry surfaces
/// as [`TransportError::Timeout`], not a distinct kind of failure. No
/// implementation retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request and return a handle to the raw response.
    async fn execute(&self, spec: RequestSpec) -> Result<ResponseHandle, TransportError>;
}

/// The bundled transport over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport whose every exchange is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] if the underlying client cannot be
    /// constructed (e.g. TLS backend initialization failure).
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Io(e.to_string()))?;
        Ok(Self { client })
    }
}

/// Map a reqwest failure onto the transport error taxonomy.
fn map_reqwest_error(e: &reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_decode() {
        TransportError::Protocol(e.to_string())
    } else {
        TransportError::Io(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, spec: RequestSpec) -> Result<ResponseHandle, TransportError> {
        let mut request = self
            .client
            .request(spec.method, &spec.url)
            .headers(spec.headers);
        if let Some(body) = spec.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| map_reqwest_error(&e))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| map_reqwest_error(&e)))
            .boxed();

        Ok(ResponseHandle::new(status, headers, body))
    }
}
