//! # Session Workflows
//!
//! Sign-in, sign-out, password reset, and the auth-event watcher that
//! keeps the session current when the identity provider refreshes or
//! revokes tokens out from under us.

use crate::{
    bridge::SharedBridge,
    core::{AuthEvent, Screen, SessionState, SharedApp},
    errors::AppError,
    views::{ProfileForm, Toast},
};
use tokio::sync::broadcast;

/// Exchange credentials for a session and land on the dashboard.
pub async fn sign_in(
    app: &SharedApp,
    bridge: &SharedBridge,
    email: &str,
    password: &str,
) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation("email", "email is required"));
    }
    if password.is_empty() {
        return Err(AppError::validation("password", "password is required"));
    }

    {
        let mut core = app.write().await;
        core.session = SessionState::Authenticating;
    }

    match bridge.sign_in(email.trim(), password).await {
        Ok(session) => {
            tracing::info!(user = %session.user.id, "signed in");
            let mut core = app.write().await;
            core.profile_form = ProfileForm::from_profile(&session.user);
            core.session = SessionState::SignedIn(session);
            core.screen = Screen::Dashboard;
            Ok(())
        }
        Err(error) => {
            let mut core = app.write().await;
            core.session = SessionState::SignedOut;
            core.toasts.push(Toast::from_error(&error));
            Err(error)
        }
    }
}

/// End the session. Local state is dropped even if the provider call
/// fails — a half-signed-out client is worse than a stale server session.
pub async fn sign_out(app: &SharedApp, bridge: &SharedBridge) -> Result<(), AppError> {
    let result = bridge.sign_out().await;
    let mut core = app.write().await;
    core.reset_for_sign_out();
    result
}

/// Ask the identity provider for a password-reset email.
pub async fn send_password_reset(
    app: &SharedApp,
    bridge: &SharedBridge,
    email: &str,
) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation("email", "email is required"));
    }
    match bridge.send_password_reset(email.trim()).await {
        Ok(()) => {
            let mut core = app.write().await;
            core.toasts.push(Toast::success("Password reset email sent"));
            Ok(())
        }
        Err(error) => {
            let mut core = app.write().await;
            core.toasts.push(Toast::from_error(&error));
            Err(error)
        }
    }
}

/// Apply auth-state-changed notifications until the bridge goes away.
///
/// Spawn this once at startup:
/// `tokio::spawn(watch_auth(app.clone(), bridge.clone()))`.
pub async fn watch_auth(app: SharedApp, bridge: SharedBridge) {
    let mut events = bridge.subscribe_auth();
    loop {
        match events.recv().await {
            Ok(AuthEvent::SignedOut) => {
                tracing::info!("session ended by identity provider");
                let mut core = app.write().await;
                core.reset_for_sign_out();
            }
            Ok(AuthEvent::SignedIn(session)) => {
                let mut core = app.write().await;
                core.profile_form = ProfileForm::from_profile(&session.user);
                core.session = SessionState::SignedIn(session);
            }
            Ok(event @ AuthEvent::TokenRefreshed { .. }) => {
                let mut core = app.write().await;
                core.session.apply_event(event);
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "auth event stream lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
