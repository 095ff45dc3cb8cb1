//! # Profile Workflows

use crate::{
    bridge::SharedBridge,
    core::{SessionState, SharedApp},
    errors::AppError,
    views::{ProfileForm, Toast},
};

/// Validate and save the profile edit form.
///
/// Validation failures stay inline on the form (`field_errors`); nothing
/// is sent upstream until the form passes.
pub async fn save_profile(app: &SharedApp, bridge: &SharedBridge) -> Result<(), AppError> {
    let (user_id, update) = {
        let mut core = app.write().await;
        let Some(user) = core.session.user() else {
            return Err(AppError::internal("profile", "no active session"));
        };
        let user_id = user.id;
        if !core.profile_form.validate() {
            return Err(AppError::validation(
                "profile",
                "fix the highlighted fields",
            ));
        }
        (user_id, core.profile_form.to_update())
    };

    match bridge.update_profile(user_id, &update).await {
        Ok(profile) => {
            let mut core = app.write().await;
            if let SessionState::SignedIn(session) = &mut core.session {
                session.user = profile.clone();
            }
            core.profile_form = ProfileForm::from_profile(&profile);
            core.toasts.push(Toast::success("Profile saved"));
            Ok(())
        }
        Err(error) => {
            let mut core = app.write().await;
            core.toasts.push(Toast::from_error(&error));
            Err(error)
        }
    }
}

/// Upload a new avatar and point the edit form at its URL.
///
/// The URL only reaches the stored profile on the next
/// [`save_profile`]; until then the form is dirty.
pub async fn upload_avatar(
    app: &SharedApp,
    bridge: &SharedBridge,
    bytes: Vec<u8>,
    content_type: &str,
) -> Result<(), AppError> {
    let user_id = {
        let core = app.read().await;
        match core.session.user() {
            Some(user) => user.id,
            None => return Err(AppError::internal("profile", "no active session")),
        }
    };

    match bridge.upload_avatar(user_id, bytes, content_type).await {
        Ok(url) => {
            let mut core = app.write().await;
            core.profile_form.edit(|form| form.photo_url = Some(url));
            core.toasts.push(Toast::success("Photo updated"));
            Ok(())
        }
        Err(error) => {
            let mut core = app.write().await;
            core.toasts.push(Toast::new(
                error.toast_level(),
                format!("Could not save photo: {error}"),
            ));
            Err(error)
        }
    }
}
