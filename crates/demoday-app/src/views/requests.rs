//! # Join and Access Request Items
//!
//! Two request flavors share one status lifecycle: join requests target a
//! course inside the caller's group; access requests come from users not
//! yet inside the scope at all.

use crate::store::{pager::contains, pager::Searchable, Keyed};
use demoday_core::{CourseId, RequestId, TimeStamp, UserId};
use serde::{Deserialize, Serialize};

/// Where a request stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

/// A member asking into a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub id: RequestId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub course_id: CourseId,
    pub course_name: String,
    pub status: RequestStatus,
    pub created_at: TimeStamp,
}

impl Keyed for JoinRequest {
    fn key(&self) -> String {
        self.id.uuid().to_string()
    }
}

impl Searchable for JoinRequest {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.user_name, needle)
            || contains(&self.user_email, needle)
            || contains(&self.course_name, needle)
    }
}

/// An outsider asking into the scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessRequest {
    pub id: RequestId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    /// Set when the request targets one course rather than the group
    pub course_id: Option<CourseId>,
    /// Free-form plea from the requester
    pub message: Option<String>,
    pub status: RequestStatus,
    pub created_at: TimeStamp,
}

impl Keyed for AccessRequest {
    fn key(&self) -> String {
        self.id.uuid().to_string()
    }
}

impl Searchable for AccessRequest {
    fn matches_query(&self, needle: &str) -> bool {
        contains(&self.user_name, needle) || contains(&self.user_email, needle)
    }
}

/// Pending entries first, newest within each band. The order admin tables
/// present requests in, applied at fetch time.
pub fn triage_order(a: &AccessRequest, b: &AccessRequest) -> std::cmp::Ordering {
    let band = |r: &AccessRequest| match r.status {
        RequestStatus::Pending => 0u8,
        _ => 1,
    };
    band(a)
        .cmp(&band(b))
        .then(b.created_at.cmp(&a.created_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request(status: RequestStatus, at: u64) -> AccessRequest {
        AccessRequest {
            id: RequestId::new(),
            user_id: UserId::new(),
            user_name: "Requester".to_string(),
            user_email: "r@example.edu".to_string(),
            course_id: None,
            message: None,
            status,
            created_at: TimeStamp::from_millis(at),
        }
    }

    #[test]
    fn test_triage_puts_pending_first_newest_leading() {
        let mut requests = vec![
            make_request(RequestStatus::Approved, 300),
            make_request(RequestStatus::Pending, 100),
            make_request(RequestStatus::Pending, 200),
        ];
        requests.sort_by(triage_order);
        assert_eq!(requests[0].status, RequestStatus::Pending);
        assert_eq!(requests[0].created_at.as_millis(), 200);
        assert_eq!(requests[1].created_at.as_millis(), 100);
        assert_eq!(requests[2].status, RequestStatus::Approved);
    }
}
