//! # Offer List Items

use crate::store::{pager::contains, pager::Searchable, Keyed};
use demoday_core::{OfferId, TimeStamp, UserId};
use serde::{Deserialize, Serialize};

/// Lifecycle of an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    /// Visible only to its issuer
    #[default]
    Draft,
    /// Live in the showcase
    Published,
    /// No longer accepting pledges
    Closed,
}

/// One showcased offer as the dashboards list it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    pub summary: String,
    pub sector_name: String,
    pub issuer_id: UserId,
    pub issuer_name: String,
    pub target_amount: u64,
    pub raised_amount: u64,
    pub status: OfferStatus,
    pub updated_at: TimeStamp,
}

impl Offer {
    /// Funding progress in percent, capped at 100.
    pub fn funding_percent(&self) -> u8 {
        if self.target_amount == 0 {
            return 0;
        }
        ((self.raised_amount * 100 / self.target_amount).min(100)) as u8
    }

    /// Whether investors can still pledge.
    pub fn accepts_pledges(&self) -> bool {
        self.status == OfferStatus::Published
    }
}

impl Keyed for Offer {
    fn key(&self) -> String {
        self.id.uuid().to_string()
    }
}

impl Searchable for Offer {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.title, needle)
            || contains(&self.summary, needle)
            || contains(&self.sector_name, needle)
            || contains(&self.issuer_name, needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_offer(target: u64, raised: u64) -> Offer {
        Offer {
            id: OfferId::new(),
            title: "Solar Kiln".to_string(),
            summary: "Dry lumber with sunshine".to_string(),
            sector_name: "Climate".to_string(),
            issuer_id: UserId::new(),
            issuer_name: "Ada".to_string(),
            target_amount: target,
            raised_amount: raised,
            status: OfferStatus::Published,
            updated_at: TimeStamp::from_millis(0),
        }
    }

    #[test]
    fn test_funding_percent_caps_at_100() {
        assert_eq!(make_offer(1000, 250).funding_percent(), 25);
        assert_eq!(make_offer(1000, 5000).funding_percent(), 100);
        assert_eq!(make_offer(0, 5000).funding_percent(), 0);
    }
}
