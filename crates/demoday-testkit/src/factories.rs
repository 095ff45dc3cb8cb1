//! Fixture factories
//!
//! `make_*` builders for view items and sessions. Values are plausible
//! rather than exhaustive; tests override what they assert on.

use demoday_app::{
    core::Session,
    views::{
        AccessRequest, Activity, ActivityKind, AdminInvite, ForumThread, GroupAdmin, InviteStatus,
        JoinRequest, Notice, NoticeKind, Offer, OfferStatus, Pledge, PledgeStatus, RequestStatus,
        ResourcePage, Sector, UserProfile,
    },
};
use demoday_core::{
    ActivityId, AdminLevel, CourseId, GroupId, InviteId, NoticeId, OfferId, PledgeId, RequestId,
    Role, Scope, SectorId, ThreadId, TimeStamp, UserId,
};

/// A group-admin profile in a fresh group scope.
pub fn make_admin_profile() -> UserProfile {
    UserProfile {
        id: UserId::new(),
        email: "admin@example.edu".to_string(),
        display_name: "Grace Hopper".to_string(),
        role: Role::Admin,
        admin_level: Some(AdminLevel::Group),
        scope: Scope::group(GroupId::new()),
        sector_id: None,
        bio: None,
        photo_url: None,
        website: None,
    }
}

/// A session for the given profile.
pub fn make_session(user: UserProfile) -> Session {
    Session {
        user,
        token: "test-token".to_string(),
        issued_at: TimeStamp::from_millis(1_000),
    }
}

/// An activity feed row.
pub fn make_activity(n: u64, actor: &str, subject: &str) -> Activity {
    Activity {
        id: ActivityId::new(),
        kind: ActivityKind::OfferPublished,
        actor_name: actor.to_string(),
        subject: subject.to_string(),
        occurred_at: TimeStamp::from_millis(n),
    }
}

/// A pledge row.
pub fn make_pledge(investor: &str, amount: u64, status: PledgeStatus) -> Pledge {
    Pledge {
        id: PledgeId::new(),
        offer_id: OfferId::new(),
        offer_title: "Solar Kiln".to_string(),
        investor_id: UserId::new(),
        investor_name: investor.to_string(),
        amount,
        status,
        pledged_at: TimeStamp::from_millis(0),
    }
}

/// A notification.
pub fn make_notice(title: &str, read: bool) -> Notice {
    Notice {
        id: NoticeId::new(),
        kind: NoticeKind::System,
        title: title.to_string(),
        body: String::new(),
        read,
        created_at: TimeStamp::from_millis(0),
    }
}

/// A pending access request.
pub fn make_access_request(user_name: &str) -> AccessRequest {
    AccessRequest {
        id: RequestId::new(),
        user_id: UserId::new(),
        user_name: user_name.to_string(),
        user_email: format!("{}@example.edu", user_name.to_lowercase().replace(' ', ".")),
        course_id: None,
        message: None,
        status: RequestStatus::Pending,
        created_at: TimeStamp::from_millis(0),
    }
}

/// A pending course join request.
pub fn make_join_request(user_name: &str, course_name: &str) -> JoinRequest {
    JoinRequest {
        id: RequestId::new(),
        user_id: UserId::new(),
        user_name: user_name.to_string(),
        user_email: format!("{}@example.edu", user_name.to_lowercase().replace(' ', ".")),
        course_id: CourseId::new(),
        course_name: course_name.to_string(),
        status: RequestStatus::Pending,
        created_at: TimeStamp::from_millis(0),
    }
}

/// A group admin row.
pub fn make_group_admin(name: &str, level: AdminLevel) -> GroupAdmin {
    GroupAdmin {
        user_id: UserId::new(),
        display_name: name.to_string(),
        email: format!("{}@example.edu", name.to_lowercase().replace(' ', ".")),
        level,
        since: TimeStamp::from_millis(0),
    }
}

/// A pending course-admin invite.
pub fn make_admin_invite(email: &str, course_name: &str) -> AdminInvite {
    AdminInvite {
        id: InviteId::new(),
        email: email.to_string(),
        course_name: course_name.to_string(),
        invited_by_name: "Grace Hopper".to_string(),
        status: InviteStatus::Pending,
        created_at: TimeStamp::from_millis(0),
    }
}

/// A forum thread row.
pub fn make_forum_thread(title: &str) -> ForumThread {
    ForumThread {
        id: ThreadId::new(),
        title: title.to_string(),
        author_name: "Ada".to_string(),
        reply_count: 0,
        pinned: false,
        last_post_at: TimeStamp::from_millis(0),
    }
}

/// A published offer.
pub fn make_offer(title: &str, target: u64, raised: u64) -> Offer {
    Offer {
        id: OfferId::new(),
        title: title.to_string(),
        summary: "A promising venture".to_string(),
        sector_name: "Climate".to_string(),
        issuer_id: UserId::new(),
        issuer_name: "Ada".to_string(),
        target_amount: target,
        raised_amount: raised,
        status: OfferStatus::Published,
        updated_at: TimeStamp::from_millis(0),
    }
}

/// A sector row.
pub fn make_sector(name: &str, ordinal: u32) -> Sector {
    Sector {
        id: SectorId::new(),
        name: name.to_string(),
        ordinal,
    }
}

/// A resource page.
pub fn make_resource_page(slug: &str, title: &str) -> ResourcePage {
    ResourcePage {
        slug: slug.to_string(),
        title: title.to_string(),
        body: "# Welcome".to_string(),
        updated_at: TimeStamp::from_millis(0),
    }
}
