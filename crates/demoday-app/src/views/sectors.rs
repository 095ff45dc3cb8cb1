//! # Sector Taxonomy Items

use crate::store::{pager::contains, pager::Searchable, Keyed};
use demoday_core::SectorId;
use serde::{Deserialize, Serialize};

/// One sector in the classification taxonomy offers pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: SectorId,
    pub name: String,
    /// Display position in pickers
    pub ordinal: u32,
}

impl Keyed for Sector {
    fn key(&self) -> String {
        self.id.uuid().to_string()
    }
}

impl Searchable for Sector {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.name, needle)
    }
}
