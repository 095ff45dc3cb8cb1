//! # Demoday Client Runtime
//!
//! The runtime half of the client: everything `demoday-app` abstracts
//! behind its `DataBridge` is implemented here over the real collaborator
//! clients.
//!
//! - [`ClientConfig`] — endpoints and logging, from TOML + `DEMODAY_*`
//!   environment overrides;
//! - [`SessionStore`] — the one place tokens live; serves them to the
//!   REST, realtime, and storage clients and broadcasts auth-state
//!   changes;
//! - [`PlatformBridge`] — the production `DataBridge`: collections read
//!   from the realtime database (fetch via query, live via subscription),
//!   mutations go through REST, identity and storage through their own
//!   clients.

#![forbid(unsafe_code)]

mod bridge;
mod config;
mod errors;
mod session_store;
mod sources;

pub use bridge::PlatformBridge;
pub use config::ClientConfig;
pub use session_store::SessionStore;
