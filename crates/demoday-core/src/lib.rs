//! Demoday Core - Foundational Types
//!
//! This crate provides the identifier, role, scoping, and time types shared
//! by every other Demoday crate. It contains no I/O and no application
//! logic; everything here is plain data.
//!
//! # Scoping model
//!
//! Every collection the client displays belongs to a group (a university)
//! and may be narrowed further to a course inside that group. [`Scope`]
//! carries that pair and is threaded through queries, subscriptions, and
//! mutations.

#![forbid(unsafe_code)]

/// Typed identifiers for platform entities
pub mod ids;

/// User roles and admin levels
pub mod role;

/// Group/course scoping
pub mod scope;

/// Millisecond timestamps
pub mod time;

pub use ids::{
    ActivityId, CourseId, GroupId, IdParseError, InviteId, NoticeId, OfferId, PledgeId, RequestId,
    SectorId, ThreadId, UserId,
};
pub use role::{AdminLevel, Role};
pub use scope::Scope;
pub use time::TimeStamp;
