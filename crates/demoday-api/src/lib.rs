//! # Demoday API Clients
//!
//! HTTP clients for the platform's three request/response collaborators:
//!
//! - [`ApiClient`] — the REST backend (users, groups, courses, offers,
//!   access requests, admin invites, system attributes, email). JSON bodies,
//!   bearer-token auth attached per request, non-2xx responses normalized to
//!   [`ApiError::Status`].
//! - [`IdentityClient`] — the external identity provider (password and
//!   custom-token sign-in, token refresh, password-reset email).
//! - [`StorageClient`] — the object store (single-file upload returning a
//!   download URL; avatars, logos, offer documents).
//!
//! All clients are thin: they never swallow errors, never retry, and leave
//! interpretation (toasts, retries, not-found pages) to the application
//! core.

#![forbid(unsafe_code)]

mod client;
mod error;
mod identity;
pub mod resources;
mod storage;

pub use client::{ApiClient, TokenProvider};
pub use error::ApiError;
pub use identity::{IdentityClient, TokenBundle};
pub use storage::StorageClient;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;
