//! # View Item Types
//!
//! The per-collection item types the dashboards render, plus the profile
//! form and the toast queue. Each list item implements
//! [`Keyed`](crate::store::Keyed) (stable key for delta merging) and
//! [`Searchable`](crate::store::pager::Searchable) (the case-insensitive
//! substring predicate every search box uses).
//!
//! These are view types, not wire DTOs: the bridge implementation maps
//! collaborator payloads into them, resolving display names along the way.

pub mod activities;
pub mod admins;
pub mod forums;
pub mod notices;
pub mod offers;
pub mod pledges;
pub mod profile;
pub mod requests;
pub mod resources;
pub mod sectors;
pub mod toasts;

pub use activities::{Activity, ActivityKind};
pub use admins::{AdminInvite, GroupAdmin, InviteStatus};
pub use forums::ForumThread;
pub use notices::{unread_count, Notice, NoticeKind};
pub use offers::{Offer, OfferStatus};
pub use pledges::{total_committed, Pledge, PledgeStatus};
pub use profile::{
    validate_display_name, DisplayNameError, FieldError, ProfileForm, ProfileUpdate, UserProfile,
    MAX_BIO_LENGTH, MAX_DISPLAY_NAME_LENGTH, MIN_DISPLAY_NAME_LENGTH,
};
pub use requests::{AccessRequest, JoinRequest, RequestStatus};
pub use resources::ResourcePage;
pub use sectors::Sector;
pub use toasts::{Toast, ToastLevel, ToastQueue, DEFAULT_TOAST_TICKS, MAX_PENDING_TOASTS};
