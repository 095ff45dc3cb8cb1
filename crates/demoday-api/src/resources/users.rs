//! User accounts and profiles

use crate::{client::ApiClient, Result};
use demoday_core::{AdminLevel, CourseId, GroupId, NoticeId, Role, Scope, SectorId, TimeStamp, UserId};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// A platform user as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    /// Present only for administrators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_level: Option<AdminLevel>,
    pub group_id: GroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,
    /// Issuers and investors classify themselves by sector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector_id: Option<SectorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub created_at: TimeStamp,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_id: Option<SectorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Handle for the `users` routes.
pub struct Users<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Users<'_> {
    /// Users visible inside a scope.
    pub async fn list(&self, scope: &Scope) -> Result<Vec<ApiUser>> {
        self.client
            .get_json(&format!("users{}", super::scope_query(scope)))
            .await
    }

    /// One user by id.
    pub async fn get(&self, id: UserId) -> Result<ApiUser> {
        self.client.get_json(&format!("users/{}", id.uuid())).await
    }

    /// Patch a user's profile fields.
    pub async fn update(&self, id: UserId, update: &UpdateUser) -> Result<ApiUser> {
        self.client
            .send_json(Method::PATCH, &format!("users/{}", id.uuid()), update)
            .await
    }

    /// Remove a user account.
    pub async fn delete(&self, id: UserId) -> Result<()> {
        self.client.delete(&format!("users/{}", id.uuid())).await
    }

    /// Mark one of the user's notifications read.
    pub async fn mark_notice_read(&self, user: UserId, notice: NoticeId) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .send_json(
                Method::PUT,
                &format!("users/{}/notices/{}/read", user.uuid(), notice.uuid()),
                &serde_json::json!({}),
            )
            .await?;
        Ok(())
    }
}
