//! # Forum Thread Items

use crate::store::{pager::contains, pager::Searchable, Keyed};
use demoday_core::{ThreadId, TimeStamp};
use serde::{Deserialize, Serialize};

/// One thread in a scope's discussion forum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumThread {
    pub id: ThreadId,
    pub title: String,
    pub author_name: String,
    pub reply_count: u32,
    /// Pinned threads sort above the rest regardless of activity
    pub pinned: bool,
    pub last_post_at: TimeStamp,
}

impl Keyed for ForumThread {
    fn key(&self) -> String {
        self.id.uuid().to_string()
    }
}

impl Searchable for ForumThread {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.title, needle) || contains(&self.author_name, needle)
    }
}
