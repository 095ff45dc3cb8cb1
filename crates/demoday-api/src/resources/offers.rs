//! Investment offers (showcased projects)

use crate::{client::ApiClient, Result};
use demoday_core::{CourseId, GroupId, OfferId, Scope, SectorId, TimeStamp, UserId};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Lifecycle of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    /// Visible only to the issuer
    #[default]
    Draft,
    /// Visible in the scope's showcase
    Published,
    /// No longer accepting pledges
    Closed,
}

/// An investment offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiOffer {
    pub id: OfferId,
    pub group_id: GroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,
    pub issuer_id: UserId,
    pub title: String,
    pub summary: String,
    pub sector_id: SectorId,
    /// Funding target in whole currency units
    pub target_amount: u64,
    /// Sum of pledges so far
    pub raised_amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    pub status: OfferStatus,
    pub created_at: TimeStamp,
    pub updated_at: TimeStamp,
}

/// Payload for creating an offer.
#[derive(Debug, Clone, Serialize)]
pub struct NewOffer {
    pub title: String,
    pub summary: String,
    pub sector_id: SectorId,
    pub target_amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,
}

/// Partial offer update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOffer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector_id: Option<SectorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OfferStatus>,
}

/// Handle for the `offers` routes.
pub struct Offers<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Offers<'_> {
    /// Offers visible inside a scope.
    pub async fn list(&self, scope: &Scope) -> Result<Vec<ApiOffer>> {
        self.client
            .get_json(&format!("offers{}", super::scope_query(scope)))
            .await
    }

    /// One offer by id.
    pub async fn get(&self, id: OfferId) -> Result<ApiOffer> {
        self.client.get_json(&format!("offers/{}", id.uuid())).await
    }

    /// Create an offer in the caller's scope.
    pub async fn create(&self, offer: &NewOffer) -> Result<ApiOffer> {
        self.client.send_json(Method::POST, "offers", offer).await
    }

    /// Patch an offer.
    pub async fn update(&self, id: OfferId, update: &UpdateOffer) -> Result<ApiOffer> {
        self.client
            .send_json(Method::PATCH, &format!("offers/{}", id.uuid()), update)
            .await
    }

    /// Remove an offer.
    pub async fn delete(&self, id: OfferId) -> Result<()> {
        self.client.delete(&format!("offers/{}", id.uuid())).await
    }
}
