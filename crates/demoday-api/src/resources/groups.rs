//! Group (university) tenants

use crate::{client::ApiClient, Result};
use demoday_core::{GroupId, TimeStamp};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// A group tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiGroup {
    pub id: GroupId,
    pub name: String,
    /// URL-safe short name used in invite links
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub created_at: TimeStamp,
}

/// Payload for creating a group.
#[derive(Debug, Clone, Serialize)]
pub struct NewGroup {
    pub name: String,
    pub slug: String,
}

/// Partial group update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Handle for the `groups` routes.
pub struct Groups<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Groups<'_> {
    /// Every group the caller can see (admins see all, others their own).
    pub async fn list(&self) -> Result<Vec<ApiGroup>> {
        self.client.get_json("groups").await
    }

    /// One group by id.
    pub async fn get(&self, id: GroupId) -> Result<ApiGroup> {
        self.client.get_json(&format!("groups/{}", id.uuid())).await
    }

    /// Create a group tenant.
    pub async fn create(&self, group: &NewGroup) -> Result<ApiGroup> {
        self.client.send_json(Method::POST, "groups", group).await
    }

    /// Patch a group.
    pub async fn update(&self, id: GroupId, update: &UpdateGroup) -> Result<ApiGroup> {
        self.client
            .send_json(Method::PATCH, &format!("groups/{}", id.uuid()), update)
            .await
    }

    /// Remove a group and its course hierarchy.
    pub async fn delete(&self, id: GroupId) -> Result<()> {
        self.client.delete(&format!("groups/{}", id.uuid())).await
    }
}
