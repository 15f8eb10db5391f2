//! Token-authenticated client for hierarchical object storage.
//!
//! This crate provides the operational half of BlobStack: authentication,
//! session management, and the three canonical resource operations over the
//! account/container/object hierarchy modeled in `blobstack-model`. It
//! handles:
//!
//! - **Transport** ([`transport`]): The object-safe [`Transport`] seam with
//!   the bundled `reqwest`-backed [`HttpTransport`], plus the streaming
//!   [`ResponseHandle`] every operation flows through.
//!
//! - **Authentication** ([`auth`]): The [`Authenticator`], which exchanges
//!   credentials for a token and storage endpoint in one round trip.
//!
//! - **Sessions** ([`session`]): The [`TokenStore`], a thread-safe holder of
//!   the current session, replaced wholesale on re-authentication.
//!
//! - **Operations** ([`client`]): The [`ResourceClient`] with `peek`, `read`,
//!   `read_with`, and `configure`, classifying every response and draining
//!   every body.
//!
//! - **Configuration** ([`config`]): [`ClientConfig`], loadable from
//!   `BLOBSTACK_*` environment variables.
//!
//! # Usage
//!
//! ```rust,no_run
//! use blobstack_client::{ClientConfig, ResourceClient};
//! use blobstack_model::ResourceLocator;
//! use http::HeaderMap;
//!
//! # async fn run() -> blobstack_model::StorageResult<()> {
//! let client = ResourceClient::from_config(&ClientConfig::from_env())?;
//! client.login().await?;
//!
//! let container = ResourceLocator::container("photos")?;
//! let outcome = client.peek(&container, HeaderMap::new()).await?;
//! if outcome.is_absent() {
//!     println!("no such container");
//! } else {
//!     println!("metadata: {:?}", outcome.metadata());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod session;
pub mod transport;

pub use auth::Authenticator;
pub use client::{Outcome, ResourceClient};
pub use config::{ClientConfig, StaleTokenPolicy};
pub use session::TokenStore;
pub use transport::{BodyStream, HttpTransport, RequestSpec, ResponseHandle, Transport};
