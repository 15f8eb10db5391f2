//! Response status classification.
//!
//! Callers branch on a [`Classification`], not on raw status codes, so they
//! stay correct if the service's exact codes evolve within their documented
//! class.

use http::{Method, StatusCode};

use crate::types::ResourceLevel;

/// The three canonical operations against a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Metadata-only existence/inspection request.
    Peek,
    /// Full-content request.
    Read,
    /// Metadata-mutation request.
    Configure,
}

impl Operation {
    /// The HTTP method this operation issues.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Peek => Method::HEAD,
            Self::Read => Method::GET,
            Self::Configure => Method::POST,
        }
    }

    /// Lowercase name for log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Peek => "peek",
            Self::Read => "read",
            Self::Configure => "configure",
        }
    }
}

/// Documented outcome classes for a resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The operation succeeded (2xx).
    Success,
    /// The resource does not exist, and absence is a normal, non-error
    /// outcome for this operation and level (container peek/read).
    ExpectedAbsence,
    /// The token was rejected (401).
    AuthExpired,
    /// A client-side problem outside the acceptable set (other 4xx, and
    /// absence where it is not expected).
    ClientError,
    /// A server-side failure (5xx).
    ServerError,
}

/// Map a raw status to its outcome class for the given operation and level.
///
/// Absence (404) is only an expected outcome when peeking or reading a
/// container; everywhere else it is a [`Classification::ClientError`].
#[must_use]
pub fn classify(op: Operation, level: ResourceLevel, status: StatusCode) -> Classification {
    if status.is_success() {
        return Classification::Success;
    }
    if status == StatusCode::UNAUTHORIZED {
        return Classification::AuthExpired;
    }
    if status == StatusCode::NOT_FOUND
        && level == ResourceLevel::Container
        && matches!(op, Operation::Peek | Operation::Read)
    {
        return Classification::ExpectedAbsence;
    }
    if status.is_server_error() {
        return Classification::ServerError;
    }
    // Remaining 4xx, plus redirects the client never follows.
    Classification::ClientError
}
