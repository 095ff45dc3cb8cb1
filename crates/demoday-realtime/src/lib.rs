//! # Demoday Realtime Client
//!
//! Client for the platform's realtime document database. The database holds
//! the live collections the dashboards render (activities, pledges,
//! notifications, requests, forums) keyed under scope paths such as
//! `groups/<group>/activities`.
//!
//! Three access modes, mirroring what the collaborator offers:
//!
//! - **point reads** — [`RealtimeClient::get`] fetches one node;
//! - **queries** — [`RealtimeClient::query`] fetches a collection ordered
//!   and filtered by a child value;
//! - **subscriptions** — [`RealtimeClient::subscribe`] opens a WebSocket
//!   registration that pushes [`ChangeEvent`]s (insert/update/remove) until
//!   the returned [`LiveSubscription`] is closed or dropped.
//!
//! Reads go over HTTP; only standing subscriptions hold a socket open.

#![forbid(unsafe_code)]

mod client;
mod error;
mod models;
mod query;
mod subscription;

pub use client::{AccessTokenProvider, RealtimeClient};
pub use error::RealtimeError;
pub use models::{ChangeEvent, ChangeKind, ClientFrame, KeyedValue, ServerFrame};
pub use query::{NodePath, Query};
pub use subscription::LiveSubscription;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RealtimeError>;
