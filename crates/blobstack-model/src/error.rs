//! Error taxonomy for BlobStack.
//!
//! Every failure a caller can observe is one of the [`StorageError`]
//! variants. Nothing is retried or swallowed inside the client; the single
//! absorbed condition is the documented "container absent" outcome, which is
//! a [`Classification::ExpectedAbsence`](crate::Classification) result, not
//! an error.

/// Failure at the transport boundary (connection, I/O, timeout).
///
/// Timeout expiry is a distinct variant for diagnostics but callers should
/// treat every `TransportError` uniformly: the exchange did not complete.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The exchange could not be completed due to an I/O failure.
    #[error("transport I/O failure: {0}")]
    Io(String),

    /// The caller-configured timeout elapsed before a response arrived.
    #[error("transport timeout: {0}")]
    Timeout(String),

    /// The peer produced a response the HTTP layer could not interpret.
    #[error("transport protocol error: {0}")]
    Protocol(String),
}

/// Error type for all BlobStack client operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A meta-header key was malformed at encode time.
    #[error("invalid meta-header key: {0}")]
    InvalidKey(String),

    /// A container or object name violated the locator invariants.
    #[error("invalid resource locator: {0}")]
    InvalidLocator(String),

    /// A resource operation was attempted before any successful
    /// authentication installed a session.
    #[error("not authenticated: no session has been installed")]
    NotAuthenticated,

    /// The identity endpoint rejected the supplied credentials, or its
    /// response was missing the token or storage-endpoint headers.
    #[error("authentication failed: {status} ({reason})")]
    AuthenticationFailed {
        /// HTTP status returned by the identity endpoint.
        status: http::StatusCode,
        /// Reason phrase, or a description of the malformed response.
        reason: String,
    },

    /// A resource operation's token was rejected by the storage endpoint.
    ///
    /// The caller decides whether to re-authenticate and retry the original
    /// operation (at most once); the client never retries on its own.
    #[error("authentication token expired or superseded")]
    AuthExpired,

    /// I/O, connection, or timeout failure at the transport boundary.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response status fell outside the documented acceptable set for
    /// the operation and resource level.
    #[error("unexpected status: {status}")]
    UnexpectedStatus {
        /// The raw HTTP status.
        status: http::StatusCode,
        /// Reason phrase (canonical when the wire carried none).
        reason: String,
    },
}

/// Convenience result type for BlobStack operations.
pub type StorageResult<T> = Result<T, StorageError>;
