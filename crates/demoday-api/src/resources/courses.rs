//! Course sub-scopes within a group

use crate::{client::ApiClient, Result};
use demoday_core::{CourseId, GroupId, TimeStamp};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// A course inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCourse {
    pub id: CourseId,
    pub group_id: GroupId,
    pub name: String,
    pub created_at: TimeStamp,
}

/// Payload for creating a course.
#[derive(Debug, Clone, Serialize)]
pub struct NewCourse {
    pub group_id: GroupId,
    pub name: String,
}

/// Handle for the `courses` routes.
pub struct Courses<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Courses<'_> {
    /// Courses of one group.
    pub async fn list(&self, group: GroupId) -> Result<Vec<ApiCourse>> {
        self.client
            .get_json(&format!("courses?group={}", group.uuid()))
            .await
    }

    /// Create a course under a group.
    pub async fn create(&self, course: &NewCourse) -> Result<ApiCourse> {
        self.client.send_json(Method::POST, "courses", course).await
    }

    /// Rename a course.
    pub async fn rename(&self, id: CourseId, name: &str) -> Result<ApiCourse> {
        self.client
            .send_json(
                Method::PATCH,
                &format!("courses/{}", id.uuid()),
                &serde_json::json!({ "name": name }),
            )
            .await
    }

    /// Remove a course sub-scope.
    pub async fn delete(&self, id: CourseId) -> Result<()> {
        self.client.delete(&format!("courses/{}", id.uuid())).await
    }
}
