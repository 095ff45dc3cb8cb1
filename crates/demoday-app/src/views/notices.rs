//! # Notification Panel Items

use crate::store::{pager::contains, pager::Searchable, Keyed};
use demoday_core::{NoticeId, TimeStamp};
use serde::{Deserialize, Serialize};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// An investor pledged against one of the user's offers
    PledgeReceived,
    /// The user's access request was approved
    RequestApproved,
    /// The user's access request was denied
    RequestDenied,
    /// The user was invited to administer a course
    AdminInvite,
    /// Platform announcement
    System,
}

/// One notification delivered to the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: TimeStamp,
}

impl Keyed for Notice {
    fn key(&self) -> String {
        self.id.uuid().to_string()
    }
}

impl Searchable for Notice {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.title, needle) || contains(&self.body, needle)
    }
}

/// Badge count for the notification bell. Computed, never stored.
pub fn unread_count(notices: &[Notice]) -> usize {
    notices.iter().filter(|n| !n.read).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_notice(read: bool) -> Notice {
        Notice {
            id: NoticeId::new(),
            kind: NoticeKind::System,
            title: "Maintenance".to_string(),
            body: "Saturday 02:00".to_string(),
            read,
            created_at: TimeStamp::from_millis(0),
        }
    }

    #[test]
    fn test_unread_count_is_computed() {
        let notices = vec![make_notice(false), make_notice(true), make_notice(false)];
        assert_eq!(unread_count(&notices), 2);
    }
}
