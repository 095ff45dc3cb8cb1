//! Typed resource routes of the REST backend
//!
//! One module per resource, each exposing a borrow-handle struct created by
//! the accessors on [`ApiClient`](crate::ApiClient) plus its wire DTOs.
//! Route shapes are plain REST: `GET` list/retrieve, `POST` create,
//! `PUT`/`PATCH` update, `DELETE` remove.

mod access_requests;
mod admin_invites;
mod courses;
mod email;
mod groups;
mod offers;
mod system_attributes;
mod users;

pub use access_requests::{AccessRequests, ApiAccessRequest, RequestDecision, RequestStatus};
pub use admin_invites::{AdminInvites, ApiAdminInvite, InviteStatus, NewAdminInvite};
pub use courses::{ApiCourse, Courses, NewCourse};
pub use email::{Email, OutboundEmail};
pub use groups::{ApiGroup, Groups, NewGroup, UpdateGroup};
pub use offers::{ApiOffer, NewOffer, OfferStatus, Offers, UpdateOffer};
pub use system_attributes::{ApiResourcePage, ApiSector, SystemAttributes};
pub use users::{ApiUser, UpdateUser, Users};

use demoday_core::Scope;

/// Render the `?group=…&course=…` suffix shared by scoped list routes.
pub(crate) fn scope_query(scope: &Scope) -> String {
    match scope.course {
        Some(course) => format!("?group={}&course={}", scope.group.uuid(), course.uuid()),
        None => format!("?group={}", scope.group.uuid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demoday_core::{CourseId, GroupId};
    use uuid::Uuid;

    #[test]
    fn test_scope_query_with_and_without_course() {
        let group = GroupId::from_uuid(Uuid::nil());
        let course = CourseId::from_uuid(Uuid::nil());

        assert_eq!(
            scope_query(&Scope::group(group)),
            format!("?group={}", Uuid::nil())
        );
        assert_eq!(
            scope_query(&Scope::course(group, course)),
            format!("?group={}&course={}", Uuid::nil(), Uuid::nil())
        );
    }
}
