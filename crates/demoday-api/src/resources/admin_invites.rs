//! Course-admin invites
//!
//! Group administrators invite colleagues by email to administer one
//! course; the invite is a standing record until accepted or revoked.

use crate::{client::ApiClient, Result};
use demoday_core::{CourseId, GroupId, InviteId, TimeStamp, UserId};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Where an invite stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    #[default]
    Pending,
    Accepted,
    Revoked,
}

/// A course-admin invite as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiAdminInvite {
    pub id: InviteId,
    pub email: String,
    pub group_id: GroupId,
    pub course_id: CourseId,
    pub invited_by: UserId,
    pub status: InviteStatus,
    pub created_at: TimeStamp,
}

/// Payload for creating an invite.
#[derive(Debug, Clone, Serialize)]
pub struct NewAdminInvite {
    pub email: String,
    pub group_id: GroupId,
    pub course_id: CourseId,
}

/// Handle for the `admin-invites` routes.
pub struct AdminInvites<'a> {
    pub(crate) client: &'a ApiClient,
}

impl AdminInvites<'_> {
    /// Invites issued inside a group.
    pub async fn list(&self, group: GroupId) -> Result<Vec<ApiAdminInvite>> {
        self.client
            .get_json(&format!("admin-invites?group={}", group.uuid()))
            .await
    }

    /// Issue an invite. The backend sends the invite email.
    pub async fn create(&self, invite: &NewAdminInvite) -> Result<ApiAdminInvite> {
        self.client
            .send_json(Method::POST, "admin-invites", invite)
            .await
    }

    /// Revoke a pending invite.
    pub async fn revoke(&self, id: InviteId) -> Result<ApiAdminInvite> {
        self.client
            .send_json(
                Method::PUT,
                &format!("admin-invites/{}/revoke", id.uuid()),
                &serde_json::json!({}),
            )
            .await
    }
}
