//! Single-owner storage for the current session.

use std::sync::Arc;

use blobstack_model::{Session, StorageError, StorageResult};
use parking_lot::RwLock;

/// Thread-safe holder of the current [`Session`].
///
/// The session is replaced wholesale on every re-authentication; readers
/// always observe either the previous complete session or the new one, never
/// a partial update.
#[derive(Debug, Default)]
pub struct TokenStore {
    inner: RwLock<Option<Arc<Session>>>,
}

impl TokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current session.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotAuthenticated`] if no session has ever
    /// been installed.
    pub fn get(&self) -> StorageResult<Arc<Session>> {
        self.inner
            .read()
            .clone()
            .ok_or(StorageError::NotAuthenticated)
    }

    /// Install a session, replacing any prior one.
    pub fn set(&self, session: Session) {
        *self.inner.write() = Some(Arc::new(session));
    }

    /// Drop the current session, if any.
    pub fn clear(&self) {
        *self.inner.write() = None;
    }

    /// Whether a session is currently installed.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().is_some()
    }
}
