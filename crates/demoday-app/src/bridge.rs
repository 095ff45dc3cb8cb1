//! # DataBridge: Abstract Collaborator Operations
//!
//! The application core never talks to the network itself. Everything that
//! needs a collaborator — REST backend, realtime database, identity
//! provider, object storage — goes through [`DataBridge`], so the core
//! stays pure and testable (dependency inversion: `demoday-client`
//! implements the bridge in production, `demoday-testkit` in tests).
//!
//! ```text
//! demoday-app (pure)        demoday-client (runtime)
//! ┌────────────────┐        ┌──────────────────────┐
//! │ AppCore        │        │ PlatformBridge       │
//! │  ┌───────────┐ │        │   implements         │
//! │  │ DataBridge│◄├────────│   DataBridge over    │
//! │  └───────────┘ │        │   api + realtime     │
//! └────────────────┘        └──────────────────────┘
//! ```
//!
//! Collection reads come back as [`CollectionSource`]s (fetch + subscribe
//! pairs the generic container drives); mutations are fire-and-confirm —
//! their effect on the lists arrives through the push subscriptions, so
//! the server stream stays the single writer after load.

use crate::{
    core::session::{AuthEvent, Session},
    errors::AppError,
    store::CollectionSource,
    views::{
        AccessRequest, Activity, AdminInvite, ForumThread, GroupAdmin, JoinRequest, Notice, Offer,
        Pledge, ProfileUpdate, ResourcePage, Sector, UserProfile,
    },
};
use async_trait::async_trait;
use demoday_core::{CourseId, InviteId, NoticeId, RequestId, Scope, SectorId, UserId};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Shared handle to the runtime's bridge implementation.
pub type SharedBridge = Arc<dyn DataBridge>;

/// Abstract collaborator operations the app core is written against.
#[async_trait]
pub trait DataBridge: Send + Sync {
    // ─── Collection sources ──────────────────────────────────

    /// The activity feed of a scope.
    fn activities(&self, scope: &Scope) -> Box<dyn CollectionSource<Activity>>;

    /// Pledges visible inside a scope.
    fn pledges(&self, scope: &Scope) -> Box<dyn CollectionSource<Pledge>>;

    /// The signed-in user's notifications.
    fn notices(&self, user: UserId) -> Box<dyn CollectionSource<Notice>>;

    /// Course join requests raised inside a scope.
    fn join_requests(&self, scope: &Scope) -> Box<dyn CollectionSource<JoinRequest>>;

    /// Access requests raised against a scope.
    fn access_requests(&self, scope: &Scope) -> Box<dyn CollectionSource<AccessRequest>>;

    /// Admins of a group.
    fn group_admins(&self, scope: &Scope) -> Box<dyn CollectionSource<GroupAdmin>>;

    /// Standing course-admin invites of a group.
    fn admin_invites(&self, scope: &Scope) -> Box<dyn CollectionSource<AdminInvite>>;

    /// Forum threads of a scope.
    fn forum_threads(&self, scope: &Scope) -> Box<dyn CollectionSource<ForumThread>>;

    /// Offers showcased inside a scope.
    fn offers(&self, scope: &Scope) -> Box<dyn CollectionSource<Offer>>;

    /// The platform-wide sector taxonomy.
    fn sectors(&self) -> Box<dyn CollectionSource<Sector>>;

    // ─── Mutations ───────────────────────────────────────────

    /// Resolve an access request. The list updates via its subscription.
    async fn respond_access_request(&self, id: RequestId, approve: bool) -> Result<(), AppError>;

    /// Resolve a course join request.
    async fn respond_join_request(&self, id: RequestId, approve: bool) -> Result<(), AppError>;

    /// Invite someone by email to administer a course.
    async fn invite_course_admin(&self, email: &str, course: CourseId) -> Result<(), AppError>;

    /// Revoke a pending course-admin invite.
    async fn revoke_admin_invite(&self, id: InviteId) -> Result<(), AppError>;

    /// Add a sector to the taxonomy.
    async fn create_sector(&self, name: &str) -> Result<(), AppError>;

    /// Rename a sector.
    async fn rename_sector(&self, id: SectorId, name: &str) -> Result<(), AppError>;

    /// Remove a sector (fails while offers still reference it).
    async fn delete_sector(&self, id: SectorId) -> Result<(), AppError>;

    /// Create a course under the caller's group.
    async fn create_course(&self, name: &str) -> Result<(), AppError>;

    /// Mark one notification read.
    async fn mark_notice_read(&self, id: NoticeId) -> Result<(), AppError>;

    /// Save profile fields; returns the stored profile.
    async fn update_profile(
        &self,
        user: UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AppError>;

    /// Upload an avatar image; returns its download URL.
    async fn upload_avatar(
        &self,
        user: UserId,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError>;

    /// The admin-curated resource pages.
    async fn fetch_resource_pages(&self) -> Result<Vec<ResourcePage>, AppError>;

    /// Create or replace a resource page.
    async fn save_resource_page(&self, page: &ResourcePage) -> Result<(), AppError>;

    // ─── Identity ────────────────────────────────────────────

    /// Exchange credentials for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AppError>;

    /// End the current session with the identity provider.
    async fn sign_out(&self) -> Result<(), AppError>;

    /// Ask the identity provider to email a password-reset link.
    async fn send_password_reset(&self, email: &str) -> Result<(), AppError>;

    /// Auth-state-changed notifications (token refresh, remote sign-out).
    fn subscribe_auth(&self) -> broadcast::Receiver<AuthEvent>;
}
