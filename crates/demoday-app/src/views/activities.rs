//! # Activity Feed Items

use crate::store::{pager::contains, pager::Searchable, Keyed};
use demoday_core::{ActivityId, TimeStamp};
use serde::{Deserialize, Serialize};

/// What an activity entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// An issuer published an offer
    OfferPublished,
    /// An investor pledged against an offer
    PledgeMade,
    /// A user joined the scope
    UserJoined,
    /// An administrator resolved an access or join request
    RequestResolved,
    /// A forum thread got a new post
    ForumPost,
}

/// One row of a scope's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub kind: ActivityKind,
    /// Display name of whoever acted
    pub actor_name: String,
    /// What was acted on (offer title, thread title, …)
    pub subject: String,
    pub occurred_at: TimeStamp,
}

impl Keyed for Activity {
    fn key(&self) -> String {
        self.id.uuid().to_string()
    }
}

impl Searchable for Activity {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.actor_name, needle) || contains(&self.subject, needle)
    }
}
