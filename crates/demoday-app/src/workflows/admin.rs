//! # Administration Workflows
//!
//! Sector taxonomy, request triage, course-admin invites, and the
//! group/course hierarchy. Every mutation is fire-and-confirm: the call
//! goes upstream, the outcome is toasted, and the affected lists update
//! through their own push subscriptions (the server stream is the single
//! writer after load).

use crate::{
    bridge::SharedBridge,
    core::SharedApp,
    errors::AppError,
    views::Toast,
};
use demoday_core::{CourseId, InviteId, RequestId, SectorId};

async fn toast_outcome(
    app: &SharedApp,
    result: Result<(), AppError>,
    success: &str,
) -> Result<(), AppError> {
    let mut core = app.write().await;
    match &result {
        Ok(()) => core.toasts.push(Toast::success(success)),
        Err(error) => core.toasts.push(Toast::from_error(error)),
    }
    result
}

/// Approve or deny an access request.
pub async fn respond_access_request(
    app: &SharedApp,
    bridge: &SharedBridge,
    id: RequestId,
    approve: bool,
) -> Result<(), AppError> {
    let result = bridge.respond_access_request(id, approve).await;
    let message = if approve {
        "Access request approved"
    } else {
        "Access request denied"
    };
    toast_outcome(app, result, message).await
}

/// Approve or deny a course join request.
pub async fn respond_join_request(
    app: &SharedApp,
    bridge: &SharedBridge,
    id: RequestId,
    approve: bool,
) -> Result<(), AppError> {
    let result = bridge.respond_join_request(id, approve).await;
    let message = if approve {
        "Join request approved"
    } else {
        "Join request denied"
    };
    toast_outcome(app, result, message).await
}

/// Invite someone by email to administer a course.
pub async fn invite_course_admin(
    app: &SharedApp,
    bridge: &SharedBridge,
    email: &str,
    course: CourseId,
) -> Result<(), AppError> {
    let email = email.trim();
    if !email.contains('@') {
        return Err(AppError::validation("email", "enter a valid email address"));
    }
    let result = bridge.invite_course_admin(email, course).await;
    toast_outcome(app, result, "Invite sent").await
}

/// Revoke a pending course-admin invite.
pub async fn revoke_admin_invite(
    app: &SharedApp,
    bridge: &SharedBridge,
    id: InviteId,
) -> Result<(), AppError> {
    let result = bridge.revoke_admin_invite(id).await;
    toast_outcome(app, result, "Invite revoked").await
}

/// Add a sector to the taxonomy.
pub async fn create_sector(
    app: &SharedApp,
    bridge: &SharedBridge,
    name: &str,
) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "sector name is required"));
    }
    let result = bridge.create_sector(name).await;
    toast_outcome(app, result, "Sector added").await
}

/// Rename a sector.
pub async fn rename_sector(
    app: &SharedApp,
    bridge: &SharedBridge,
    id: SectorId,
    name: &str,
) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "sector name is required"));
    }
    let result = bridge.rename_sector(id, name).await;
    toast_outcome(app, result, "Sector renamed").await
}

/// Remove a sector. The backend refuses while offers reference it; that
/// arrives as a server error and is toasted, not special-cased here.
pub async fn delete_sector(
    app: &SharedApp,
    bridge: &SharedBridge,
    id: SectorId,
) -> Result<(), AppError> {
    let result = bridge.delete_sector(id).await;
    toast_outcome(app, result, "Sector removed").await
}

/// Create a course under the caller's group.
pub async fn create_course(
    app: &SharedApp,
    bridge: &SharedBridge,
    name: &str,
) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "course name is required"));
    }
    let result = bridge.create_course(name).await;
    toast_outcome(app, result, "Course created").await
}
