//! # Group Admin and Invite Items

use crate::store::{pager::contains, pager::Searchable, Keyed};
use demoday_core::{AdminLevel, InviteId, TimeStamp, UserId};
use serde::{Deserialize, Serialize};

/// A user holding admin rights inside the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAdmin {
    pub user_id: UserId,
    pub display_name: String,
    pub email: String,
    pub level: AdminLevel,
    pub since: TimeStamp,
}

impl Keyed for GroupAdmin {
    fn key(&self) -> String {
        self.user_id.uuid().to_string()
    }
}

impl Searchable for GroupAdmin {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.display_name, needle) || contains(&self.email, needle)
    }
}

/// Where a course-admin invite stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
    Revoked,
}

/// A standing course-admin invite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminInvite {
    pub id: InviteId,
    pub email: String,
    pub course_name: String,
    pub invited_by_name: String,
    pub status: InviteStatus,
    pub created_at: TimeStamp,
}

impl Keyed for AdminInvite {
    fn key(&self) -> String {
        self.id.uuid().to_string()
    }
}

impl Searchable for AdminInvite {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.email, needle) || contains(&self.course_name, needle)
    }
}
