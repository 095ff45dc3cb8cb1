//! # Listener-Synchronized List State
//!
//! The generic machinery behind every table and list in the client. Each
//! collection is one [`ListContainer`]: its [`ListState`] is filled by an
//! initial fetch, kept current by a push subscription whose lifetime the
//! [`ListenerSet`] pins to the container's own, and projected onto the
//! screen by [`pager`] without ever storing derived rows.

mod collection;
mod container;
mod listeners;
mod liveness;
pub mod pager;

pub use collection::{
    Delta, DeltaKind, DeltaOutcome, Keyed, ListState, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};
pub use container::{CollectionSource, ListContainer, Subscription};
pub use listeners::{
    AttachDecision, CompleteOutcome, DetachOutcome, ListenerSet, SubscriptionHandle,
};
pub use liveness::LivenessToken;
