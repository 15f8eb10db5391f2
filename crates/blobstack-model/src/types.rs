//! Credentials, sessions, and validated resource locators.

use std::fmt;

use crate::error::StorageError;

/// Path separator reserved for the container/object hierarchy encoding.
///
/// Names containing it would make `{container}/{object}` URLs ambiguous, so
/// locator constructors reject it.
pub const PATH_SEPARATOR: char = '/';

/// Credentials for the identity endpoint.
///
/// Immutable and supplied at construction. The secret key is redacted from
/// the `Debug` output and must never be logged.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct Credentials {
    /// URL of the identity endpoint performing the token exchange.
    pub auth_endpoint: String,
    /// Account identifier within the storage deployment.
    pub account: String,
    /// User name within the account.
    pub user: String,
    /// Secret API key.
    pub key: String,
}

impl Credentials {
    /// Create credentials for the given identity endpoint.
    #[must_use]
    pub fn new(
        auth_endpoint: impl Into<String>,
        account: impl Into<String>,
        user: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            auth_endpoint: auth_endpoint.into(),
            account: account.into(),
            user: user.into(),
            key: key.into(),
        }
    }

    /// The `account:user` pair sent in the login request.
    #[must_use]
    pub fn login_user(&self) -> String {
        format!("{}:{}", self.account, self.user)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_endpoint", &self.auth_endpoint)
            .field("account", &self.account)
            .field("user", &self.user)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// The token + storage-endpoint pair obtained from authentication.
///
/// Owned exclusively by the token store and replaced wholesale on every
/// re-authentication; a `Session` is never partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    /// Opaque, short-lived authentication token.
    pub token: String,
    /// Base URL of the storage endpoint discovered at login.
    pub storage_endpoint: String,
}

impl Session {
    /// Create a session from a token and storage endpoint.
    #[must_use]
    pub fn new(token: impl Into<String>, storage_endpoint: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            storage_endpoint: storage_endpoint.into(),
        }
    }
}

/// The three addressable granularities in the storage hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ResourceLevel {
    /// The account itself.
    Account,
    /// A named container within the account.
    Container,
    /// A named object within a container.
    Object,
}

impl ResourceLevel {
    /// Lowercase name used in header prefixes and log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Container => "container",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ResourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated address for one resource in the hierarchy.
///
/// Container and object names are guaranteed non-empty and free of the
/// hierarchy path separator; construct locators through [`account`],
/// [`container`], and [`object`] to uphold that.
///
/// [`account`]: ResourceLocator::account
/// [`container`]: ResourceLocator::container
/// [`object`]: ResourceLocator::object
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ResourceLocator {
    /// The account root.
    Account,
    /// A container.
    Container {
        /// Container name.
        container: String,
    },
    /// An object within a container.
    Object {
        /// Container name.
        container: String,
        /// Object name.
        object: String,
    },
}

/// Validate one name component of a locator.
fn validate_name(kind: &str, name: &str) -> Result<(), StorageError> {
    if name.is_empty() {
        return Err(StorageError::InvalidLocator(format!(
            "{kind} name must not be empty"
        )));
    }
    if name.contains(PATH_SEPARATOR) {
        return Err(StorageError::InvalidLocator(format!(
            "{kind} name {name:?} must not contain {PATH_SEPARATOR:?}"
        )));
    }
    Ok(())
}

impl ResourceLocator {
    /// Locator for the account root.
    #[must_use]
    pub fn account() -> Self {
        Self::Account
    }

    /// Locator for a container.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidLocator`] if the name is empty or
    /// contains the hierarchy path separator.
    pub fn container(container: impl Into<String>) -> Result<Self, StorageError> {
        let container = container.into();
        validate_name("container", &container)?;
        Ok(Self::Container { container })
    }

    /// Locator for an object.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidLocator`] if either name is empty or
    /// contains the hierarchy path separator.
    pub fn object(
        container: impl Into<String>,
        object: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let container = container.into();
        let object = object.into();
        validate_name("container", &container)?;
        validate_name("object", &object)?;
        Ok(Self::Object { container, object })
    }

    /// The resource level this locator addresses.
    #[must_use]
    pub fn level(&self) -> ResourceLevel {
        match self {
            Self::Account => ResourceLevel::Account,
            Self::Container { .. } => ResourceLevel::Container,
            Self::Object { .. } => ResourceLevel::Object,
        }
    }
}
