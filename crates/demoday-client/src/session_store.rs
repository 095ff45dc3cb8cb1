//! Session/token store
//!
//! The single place credentials live. The REST, realtime, and storage
//! clients all pull the current token from here per request, so a refresh
//! reaches every collaborator at once; auth-state changes fan out to the
//! app core through a broadcast channel.

use async_trait::async_trait;
use demoday_app::core::AuthEvent;
use demoday_core::{Scope, UserId};
use parking_lot::RwLock;
use tokio::sync::broadcast;

const AUTH_EVENT_CAPACITY: usize = 16;

#[derive(Clone)]
struct Credentials {
    access_token: String,
    refresh_token: String,
    user: UserId,
    /// Known once the platform profile has loaded
    scope: Option<Scope>,
}

/// Shared token and scope state for the signed-in session.
pub struct SessionStore {
    credentials: RwLock<Option<Credentials>>,
    auth_tx: broadcast::Sender<AuthEvent>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// An empty (signed-out) store.
    pub fn new() -> Self {
        let (auth_tx, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self {
            credentials: RwLock::new(None),
            auth_tx,
        }
    }

    /// Install the tokens minted at sign-in. The scope arrives separately
    /// once the platform profile has been fetched with these tokens.
    pub fn set_session(&self, access_token: String, refresh_token: String, user: UserId) {
        *self.credentials.write() = Some(Credentials {
            access_token,
            refresh_token,
            user,
            scope: None,
        });
    }

    /// Record the signed-in scope once the profile is known.
    pub fn set_scope(&self, scope: Scope) {
        if let Some(credentials) = self.credentials.write().as_mut() {
            credentials.scope = Some(scope);
        }
    }

    /// Replace the access token after a refresh and notify the core.
    pub fn replace_access_token(&self, access_token: String) {
        if let Some(credentials) = self.credentials.write().as_mut() {
            credentials.access_token = access_token.clone();
        }
        let _ = self.auth_tx.send(AuthEvent::TokenRefreshed {
            token: access_token,
        });
    }

    /// Drop the session (sign-out or revocation) and notify the core.
    pub fn clear(&self) {
        *self.credentials.write() = None;
        let _ = self.auth_tx.send(AuthEvent::SignedOut);
    }

    /// The refresh token, if a session is active.
    pub fn refresh_token(&self) -> Option<String> {
        self.credentials
            .read()
            .as_ref()
            .map(|c| c.refresh_token.clone())
    }

    /// The signed-in scope, if the profile has loaded.
    pub fn scope(&self) -> Option<Scope> {
        self.credentials.read().as_ref().and_then(|c| c.scope)
    }

    /// The signed-in user id, if any.
    pub fn user_id(&self) -> Option<UserId> {
        self.credentials.read().as_ref().map(|c| c.user)
    }

    /// Current access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.credentials
            .read()
            .as_ref()
            .map(|c| c.access_token.clone())
    }

    /// Subscribe to auth-state changes.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_tx.subscribe()
    }

    /// Push an auth event to subscribers.
    pub fn emit(&self, event: AuthEvent) {
        let _ = self.auth_tx.send(event);
    }
}

#[async_trait]
impl demoday_api::TokenProvider for SessionStore {
    async fn bearer_token(&self) -> Option<String> {
        self.access_token()
    }
}

#[async_trait]
impl demoday_realtime::AccessTokenProvider for SessionStore {
    async fn access_token(&self) -> Option<String> {
        SessionStore::access_token(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demoday_core::{GroupId, UserId};

    #[test]
    fn test_refresh_updates_token_and_broadcasts() {
        let store = SessionStore::new();
        let mut events = store.subscribe();
        store.set_session("tok-1".to_string(), "refresh-1".to_string(), UserId::new());
        store.set_scope(Scope::group(GroupId::new()));

        store.replace_access_token("tok-2".to_string());
        assert_eq!(store.access_token().as_deref(), Some("tok-2"));
        assert!(matches!(
            events.try_recv(),
            Ok(AuthEvent::TokenRefreshed { token }) if token == "tok-2"
        ));
    }

    #[test]
    fn test_clear_broadcasts_sign_out() {
        let store = SessionStore::new();
        let mut events = store.subscribe();
        store.set_session("tok".to_string(), "refresh".to_string(), UserId::new());
        store.set_scope(Scope::group(GroupId::new()));
        store.clear();
        assert!(store.access_token().is_none());
        assert!(matches!(events.try_recv(), Ok(AuthEvent::SignedOut)));
    }
}
