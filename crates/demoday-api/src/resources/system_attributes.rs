//! System attributes: sectors and resource pages
//!
//! Platform-wide lookup data administrators curate: the sector taxonomy
//! offers are classified under, and the editable resource pages shown to
//! signed-in users.

use crate::{client::ApiClient, Result};
use demoday_core::{SectorId, TimeStamp, UserId};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// A sector in the classification taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSector {
    pub id: SectorId,
    pub name: String,
    /// Display position in pickers
    pub ordinal: u32,
}

/// An admin-editable resource page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResourcePage {
    /// Stable page slug, e.g. `getting-started`
    pub slug: String,
    pub title: String,
    /// Markdown body
    pub body: String,
    pub updated_by: UserId,
    pub updated_at: TimeStamp,
}

/// Handle for the `system-attributes` routes.
pub struct SystemAttributes<'a> {
    pub(crate) client: &'a ApiClient,
}

impl SystemAttributes<'_> {
    /// The full sector taxonomy, in ordinal order.
    pub async fn sectors(&self) -> Result<Vec<ApiSector>> {
        self.client.get_json("system-attributes/sectors").await
    }

    /// Add a sector at the end of the taxonomy.
    pub async fn create_sector(&self, name: &str) -> Result<ApiSector> {
        self.client
            .send_json(
                Method::POST,
                "system-attributes/sectors",
                &serde_json::json!({ "name": name }),
            )
            .await
    }

    /// Rename a sector.
    pub async fn rename_sector(&self, id: SectorId, name: &str) -> Result<ApiSector> {
        self.client
            .send_json(
                Method::PATCH,
                &format!("system-attributes/sectors/{}", id.uuid()),
                &serde_json::json!({ "name": name }),
            )
            .await
    }

    /// Remove a sector. Fails with 409 while offers still reference it.
    pub async fn delete_sector(&self, id: SectorId) -> Result<()> {
        self.client
            .delete(&format!("system-attributes/sectors/{}", id.uuid()))
            .await
    }

    /// Every resource page.
    pub async fn resource_pages(&self) -> Result<Vec<ApiResourcePage>> {
        self.client.get_json("system-attributes/resource-pages").await
    }

    /// Create or replace a resource page by slug.
    pub async fn save_resource_page(&self, page: &ApiResourcePage) -> Result<ApiResourcePage> {
        self.client
            .send_json(
                Method::PUT,
                &format!("system-attributes/resource-pages/{}", page.slug),
                page,
            )
            .await
    }
}
