//! # Demoday Application Core
//!
//! The headless core of the Demoday client: every dashboard, table, and
//! admin panel a frontend renders is backed by state defined here, and
//! every mutation flows through the workflow functions in this crate.
//!
//! The crate is pure — it never talks to the network. Collaborator access
//! goes through the [`DataBridge`](bridge::DataBridge) trait, implemented
//! by `demoday-client` in production and by `demoday-testkit` in tests
//! (dependency inversion: the runtime depends on the core, never the other
//! way around).
//!
//! ## The list pattern
//!
//! Roughly a dozen collections (activities, pledges, notifications, join
//! requests, access requests, group admins, forum threads, offers,
//! sectors) share one shape, factored into [`store`]:
//!
//! ```text
//! mount ──► fetch ──► loaded ──► attach subscription ──► deltas ──► render
//!                                        │
//! unmount ◄──────── release ◄────────────┘   (guaranteed, also on Drop)
//! ```
//!
//! - [`store::ListState`] — pure loading/loaded/error/pagination state;
//! - [`store::ListenerSet`] — at most one live push registration per
//!   collection key, queued-detach safe;
//! - [`store::ListContainer`] — binds both to one collection's lifetime;
//! - [`store::pager`] — derived pagination/search projection.

#![forbid(unsafe_code)]

pub mod bridge;
pub mod core;
pub mod errors;
pub mod store;
pub mod views;
pub mod workflows;

pub use crate::core::{AppConfig, AppCore, Intent, Screen, SharedApp};
pub use errors::{AppError, ErrorDetail};
