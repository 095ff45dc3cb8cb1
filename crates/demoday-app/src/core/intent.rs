//! # Screens and Intents
//!
//! [`Screen`] is the navigation state; [`Intent`] enumerates every user
//! action a frontend can dispatch. Frontends build intents from input
//! events and hand them to [`workflows::dispatch`](crate::workflows::dispatch);
//! they never mutate core state directly.

use demoday_core::{CourseId, InviteId, NoticeId, OfferId, RequestId, SectorId};

/// Where the user is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// Sign-in / password-reset screen
    #[default]
    SignIn,
    /// Activity feed, pledges, notification panel
    Dashboard,
    /// The offer showcase
    Offers,
    /// One offer, full detail
    OfferDetail(OfferId),
    /// Profile view and edit form
    Profile,
    /// Scope discussion forum
    Forum,
    /// Admin-curated resource pages
    Resources,
    /// Admin: sector taxonomy
    AdminSectors,
    /// Admin: join and access requests
    AdminRequests,
    /// Admin: group admins and course-admin invites
    AdminInvites,
    /// Generic not-found page (absent resource or no access — the page
    /// does not say which)
    NotFound,
}

/// Names one of the listener-synchronized collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionId {
    Activities,
    Pledges,
    Notices,
    JoinRequests,
    AccessRequests,
    GroupAdmins,
    AdminInvites,
    ForumThreads,
    Offers,
    Sectors,
}

/// A user action.
#[derive(Debug, Clone)]
pub enum Intent {
    /// Go to a screen (releasing the lists of the one being left)
    Navigate(Screen),
    /// Manual retry/refresh of one collection
    Refresh(CollectionId),
    /// Jump to a page of one collection
    SetPage { collection: CollectionId, page: usize },
    /// Change a collection's page size
    SetPageSize { collection: CollectionId, size: usize },
    /// Type into a collection's search box
    SetSearch { collection: CollectionId, text: String },
    /// Clear a collection's search box
    ClearSearch(CollectionId),

    /// Submit the sign-in form
    SignIn { email: String, password: String },
    /// Sign out and drop all state
    SignOut,
    /// Request a password-reset email
    SendPasswordReset { email: String },

    /// Save the profile edit form
    SaveProfile,
    /// Upload a new avatar for the signed-in user
    UploadAvatar {
        bytes: Vec<u8>,
        content_type: String,
    },

    /// Approve or deny an access request
    RespondAccessRequest { id: RequestId, approve: bool },
    /// Approve or deny a course join request
    RespondJoinRequest { id: RequestId, approve: bool },
    /// Invite someone to administer a course
    InviteCourseAdmin { email: String, course: CourseId },
    /// Revoke a pending course-admin invite
    RevokeAdminInvite(InviteId),
    /// Add a sector
    CreateSector { name: String },
    /// Rename a sector
    RenameSector { id: SectorId, name: String },
    /// Delete a sector
    DeleteSector(SectorId),
    /// Create a course under the caller's group
    CreateCourse { name: String },
    /// Mark a notification read
    MarkNoticeRead(NoticeId),

    /// Advance toast timers one UI tick
    TickToasts,
    /// Dismiss a toast by queue index
    DismissToast(usize),
}
