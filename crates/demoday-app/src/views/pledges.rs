//! # Pledge List Items

use crate::store::{pager::contains, pager::Searchable, Keyed};
use demoday_core::{OfferId, PledgeId, TimeStamp, UserId};
use serde::{Deserialize, Serialize};

/// Lifecycle of a pledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PledgeStatus {
    /// Standing commitment
    #[default]
    Pledged,
    /// Withdrawn by the investor before settlement
    Withdrawn,
    /// Paid out at close
    Settled,
}

/// One investor commitment against an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pledge {
    pub id: PledgeId,
    pub offer_id: OfferId,
    pub offer_title: String,
    pub investor_id: UserId,
    pub investor_name: String,
    /// Whole currency units
    pub amount: u64,
    pub status: PledgeStatus,
    pub pledged_at: TimeStamp,
}

impl Keyed for Pledge {
    fn key(&self) -> String {
        self.id.uuid().to_string()
    }
}

impl Searchable for Pledge {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.investor_name, needle) || contains(&self.offer_title, needle)
    }
}

/// Sum of standing and settled pledges (withdrawn ones don't count).
pub fn total_committed(pledges: &[Pledge]) -> u64 {
    pledges
        .iter()
        .filter(|p| p.status != PledgeStatus::Withdrawn)
        .map(|p| p.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pledge(amount: u64, status: PledgeStatus) -> Pledge {
        Pledge {
            id: PledgeId::new(),
            offer_id: OfferId::new(),
            offer_title: "Test Offer".to_string(),
            investor_id: UserId::new(),
            investor_name: "Investor".to_string(),
            amount,
            status,
            pledged_at: TimeStamp::from_millis(0),
        }
    }

    #[test]
    fn test_total_skips_withdrawn() {
        let pledges = vec![
            make_pledge(100, PledgeStatus::Pledged),
            make_pledge(50, PledgeStatus::Withdrawn),
            make_pledge(25, PledgeStatus::Settled),
        ];
        assert_eq!(total_committed(&pledges), 125);
    }
}
