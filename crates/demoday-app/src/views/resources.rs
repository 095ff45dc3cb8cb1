//! # Resource Page Items
//!
//! Admin-curated help/content pages shown to signed-in users. Keyed by
//! slug rather than a generated id so links stay stable across edits.

use crate::store::{pager::contains, pager::Searchable, Keyed};
use demoday_core::TimeStamp;
use serde::{Deserialize, Serialize};

/// One editable resource page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePage {
    /// Stable slug, e.g. `getting-started`
    pub slug: String,
    pub title: String,
    /// Markdown body
    pub body: String,
    pub updated_at: TimeStamp,
}

impl Keyed for ResourcePage {
    fn key(&self) -> String {
        self.slug.clone()
    }
}

impl Searchable for ResourcePage {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.title, needle) || contains(&self.body, needle)
    }
}
