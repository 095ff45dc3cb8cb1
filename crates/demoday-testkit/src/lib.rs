//! # Demoday Testkit
//!
//! In-memory stand-ins for the platform's collaborators plus fixture
//! factories, so `demoday-app` can be exercised end to end — mount, fetch,
//! attach, push deltas, detach — without a network anywhere.
//!
//! - [`MemoryCollection`] — a server-side collection: fetchable snapshot
//!   plus synchronous delta broadcast to registered subscribers, with an
//!   observable live-registration count;
//! - [`StubBridge`] — a full [`DataBridge`](demoday_app::bridge::DataBridge)
//!   over memory collections; mutations round-trip the way the real
//!   backend does (mutate the collection, emit the delta);
//! - [`factories`] — `make_*` fixture builders.

#![forbid(unsafe_code)]

pub mod bridge;
pub mod factories;
pub mod memory;

pub use bridge::StubBridge;
pub use memory::MemoryCollection;
