//! Access requests against a scope
//!
//! Raised by users who want into a group or course they are not yet part
//! of; resolved by the scope's administrators.

use crate::{client::ApiClient, Result};
use demoday_core::{CourseId, GroupId, RequestId, Scope, TimeStamp, UserId};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Where an access request stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

/// An administrator's answer to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Approve,
    Deny,
}

/// An access request as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiAccessRequest {
    pub id: RequestId,
    pub user_id: UserId,
    pub user_email: String,
    pub user_name: String,
    pub group_id: GroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: RequestStatus,
    pub created_at: TimeStamp,
}

/// Handle for the `access-requests` routes.
pub struct AccessRequests<'a> {
    pub(crate) client: &'a ApiClient,
}

impl AccessRequests<'_> {
    /// Requests raised against a scope.
    pub async fn list(&self, scope: &Scope) -> Result<Vec<ApiAccessRequest>> {
        self.client
            .get_json(&format!("access-requests{}", super::scope_query(scope)))
            .await
    }

    /// Raise a request for the calling user.
    pub async fn create(&self, scope: &Scope, message: Option<&str>) -> Result<ApiAccessRequest> {
        self.client
            .send_json(
                Method::POST,
                "access-requests",
                &serde_json::json!({
                    "group_id": scope.group,
                    "course_id": scope.course,
                    "message": message,
                }),
            )
            .await
    }

    /// Resolve a pending request.
    pub async fn respond(
        &self,
        id: RequestId,
        decision: RequestDecision,
    ) -> Result<ApiAccessRequest> {
        self.client
            .send_json(
                Method::PUT,
                &format!("access-requests/{}/decision", id.uuid()),
                &serde_json::json!({ "decision": decision }),
            )
            .await
    }
}
