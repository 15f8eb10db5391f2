//! Meta-header naming codec.
//!
//! All resource metadata travels as conventionally named HTTP headers:
//! a level-specific prefix (`x-account-meta-`, `x-container-meta-`,
//! `x-object-meta-`), an optional `remove` infix marking deletion
//! directives, and the key's path segments joined with `-`.
//!
//! The whole string convention lives in this module. Everything else in the
//! workspace works with the typed [`MetaHeaderKey`] and never inspects
//! header names directly. The mapping is bijective for well-formed keys:
//! `decode(encode(k)) == k`.

use std::collections::HashMap;

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::error::StorageError;
use crate::types::ResourceLevel;

/// Header carrying the session token on every resource request.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Login request header carrying `account:user`.
pub const LOGIN_USER_HEADER: &str = "x-auth-user";

/// Login request header carrying the secret API key.
pub const LOGIN_KEY_HEADER: &str = "x-auth-key";

/// Login response header carrying the storage endpoint URL.
pub const STORAGE_URL_HEADER: &str = "x-storage-url";

/// Delimiter joining path segments inside a meta-header name.
const SEGMENT_DELIMITER: char = '-';

/// Wire prefix for a given level and removal flag.
fn prefix(level: ResourceLevel, remove: bool) -> &'static str {
    match (level, remove) {
        (ResourceLevel::Account, false) => "x-account-meta-",
        (ResourceLevel::Account, true) => "x-remove-account-meta-",
        (ResourceLevel::Container, false) => "x-container-meta-",
        (ResourceLevel::Container, true) => "x-remove-container-meta-",
        (ResourceLevel::Object, false) => "x-object-meta-",
        (ResourceLevel::Object, true) => "x-remove-object-meta-",
    }
}

/// A namespaced, possibly removal-flagged metadata key.
///
/// Path segments are normalized to ASCII lowercase at construction, matching
/// the case-insensitivity of HTTP header names on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetaHeaderKey {
    /// Which hierarchy level the key belongs to.
    pub level: ResourceLevel,
    /// Whether this key is a removal directive.
    pub remove: bool,
    /// Ordered path segments, lowercase.
    pub path: Vec<String>,
}

impl MetaHeaderKey {
    /// Create a key, normalizing segments to lowercase.
    pub fn new(
        level: ResourceLevel,
        remove: bool,
        path: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            level,
            remove,
            path: path
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// The key's path joined with the wire delimiter, e.g. `book-chapter`.
    #[must_use]
    pub fn joined_path(&self) -> String {
        self.path.join("-")
    }
}

/// Check one path segment for encodability.
fn validate_segment(segment: &str) -> Result<(), StorageError> {
    if segment.is_empty() {
        return Err(StorageError::InvalidKey(
            "path segments must not be empty".to_owned(),
        ));
    }
    if segment.contains(SEGMENT_DELIMITER) {
        return Err(StorageError::InvalidKey(format!(
            "segment {segment:?} contains the delimiter {SEGMENT_DELIMITER:?}"
        )));
    }
    if !segment
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.')
    {
        return Err(StorageError::InvalidKey(format!(
            "segment {segment:?} contains characters not allowed in a header name"
        )));
    }
    Ok(())
}

/// Encode a key into its wire header name.
///
/// Injective per (level, remove): two distinct path sequences never collide,
/// because segments cannot contain the delimiter.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for an empty path, an empty segment,
/// or a segment containing the delimiter or other disallowed characters.
pub fn encode(key: &MetaHeaderKey) -> Result<HeaderName, StorageError> {
    if key.path.is_empty() {
        return Err(StorageError::InvalidKey(
            "meta-header key path must not be empty".to_owned(),
        ));
    }
    for segment in &key.path {
        validate_segment(segment)?;
    }
    let name = format!("{}{}", prefix(key.level, key.remove), key.joined_path());
    HeaderName::try_from(name).map_err(|e| StorageError::InvalidKey(e.to_string()))
}

/// Decode a wire header name back into a key.
///
/// Returns `None` for header names outside the meta-header convention.
#[must_use]
pub fn decode(name: &str) -> Option<MetaHeaderKey> {
    let name = name.to_ascii_lowercase();
    // Remove prefixes first: they are longer and do not share a prefix with
    // the plain forms, but checking them first keeps the intent obvious.
    for level in [
        ResourceLevel::Account,
        ResourceLevel::Container,
        ResourceLevel::Object,
    ] {
        for remove in [true, false] {
            if let Some(rest) = name.strip_prefix(prefix(level, remove)) {
                if rest.is_empty() {
                    return None;
                }
                let path: Vec<String> = rest.split(SEGMENT_DELIMITER).map(ToOwned::to_owned).collect();
                if path.iter().any(String::is_empty) {
                    return None;
                }
                return Some(MetaHeaderKey {
                    level,
                    remove,
                    path,
                });
            }
        }
    }
    None
}

/// A single metadata mutation directive for `configure`.
///
/// The resource level is implied by the locator the directive is applied to;
/// only the path and (for sets) the value are carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaEntry {
    /// Add or overwrite a metadata key.
    Set {
        /// Key path segments.
        path: Vec<String>,
        /// Value to store.
        value: String,
    },
    /// Remove a metadata key. The value is conventionally ignored by the
    /// service; an empty one is sent.
    Remove {
        /// Key path segments.
        path: Vec<String>,
    },
}

impl MetaEntry {
    /// Directive adding or overwriting a key.
    pub fn set(
        path: impl IntoIterator<Item = impl Into<String>>,
        value: impl Into<String>,
    ) -> Self {
        Self::Set {
            path: path.into_iter().map(Into::into).collect(),
            value: value.into(),
        }
    }

    /// Directive removing a key.
    pub fn remove(path: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Remove {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Encode this directive as a (name, value) header pair for `level`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the path is not encodable or
    /// the value is not a valid header value.
    pub fn to_header(
        &self,
        level: ResourceLevel,
    ) -> Result<(HeaderName, HeaderValue), StorageError> {
        let (key, value) = match self {
            Self::Set { path, value } => {
                (MetaHeaderKey::new(level, false, path.clone()), value.as_str())
            }
            Self::Remove { path } => (MetaHeaderKey::new(level, true, path.clone()), ""),
        };
        let name = encode(&key)?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| StorageError::InvalidKey(format!("invalid meta value: {e}")))?;
        Ok((name, value))
    }
}

/// Collect all non-remove meta headers of `level` from a response header
/// map, keyed by the joined path.
#[must_use]
pub fn collect_metadata(level: ResourceLevel, headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let key = decode(name.as_str())?;
            if key.level != level || key.remove {
                return None;
            }
            let value = value.to_str().ok()?;
            Some((key.joined_path(), value.to_owned()))
        })
        .collect()
}
