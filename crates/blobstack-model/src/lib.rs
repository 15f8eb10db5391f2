//! Data model for BlobStack, a client for token-authenticated,
//! header-driven object storage.
//!
//! The storage service exposes a three-level hierarchy (account → container
//! → object) and carries all resource metadata as conventionally named HTTP
//! headers rather than a structured body format. This crate holds everything
//! that can be reasoned about without I/O:
//!
//! - [`types`] - credentials, sessions, and validated resource locators
//! - [`meta`] - the bijective meta-header naming codec
//! - [`classify`] - mapping raw HTTP statuses to operation outcomes
//! - [`error`] - the error taxonomy shared across the workspace

pub mod classify;
pub mod error;
pub mod meta;
pub mod types;

pub use classify::{Classification, Operation, classify};
pub use error::{StorageError, StorageResult, TransportError};
pub use meta::{MetaEntry, MetaHeaderKey, collect_metadata, decode, encode};
pub use types::{Credentials, ResourceLevel, ResourceLocator, Session};
