//! # Session State
//!
//! Who is signed in, with what token, in which scope. The identity
//! provider owns the truth; this is the client's view of it, kept current
//! by [`AuthEvent`]s the bridge pushes (token refresh, remote sign-out).

use crate::views::UserProfile;
use demoday_core::{Role, Scope, TimeStamp};

/// One authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The signed-in user
    pub user: UserProfile,
    /// Identity-provider-issued bearer token
    pub token: String,
    /// When the token was issued
    pub issued_at: TimeStamp,
}

/// The client's authentication state.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// No session; only the sign-in screen is reachable
    #[default]
    SignedOut,
    /// A sign-in round trip is in flight
    Authenticating,
    /// A session is active
    SignedIn(Session),
}

/// Auth-state-changed notifications from the identity layer.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// A session became active (sign-in, restored session)
    SignedIn(Session),
    /// The bearer token was refreshed in place
    TokenRefreshed { token: String },
    /// The session ended (explicit sign-out, revocation, expiry)
    SignedOut,
}

impl SessionState {
    /// Whether a session is active.
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            _ => None,
        }
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        self.session().map(|s| &s.user)
    }

    /// The signed-in user's scope, if any.
    pub fn scope(&self) -> Option<Scope> {
        self.user().map(|u| u.scope)
    }

    /// The signed-in user's role, if any.
    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    /// Apply an auth-state-changed notification.
    pub fn apply_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(session) => *self = Self::SignedIn(session),
            AuthEvent::TokenRefreshed { token } => {
                if let Self::SignedIn(session) = self {
                    session.token = token;
                    session.issued_at = TimeStamp::now();
                }
            }
            AuthEvent::SignedOut => *self = Self::SignedOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demoday_core::{GroupId, UserId};

    fn make_session() -> Session {
        Session {
            user: UserProfile {
                id: UserId::new(),
                email: "ada@example.edu".to_string(),
                display_name: "Ada".to_string(),
                role: Role::Admin,
                admin_level: Some(demoday_core::AdminLevel::Group),
                scope: Scope::group(GroupId::new()),
                sector_id: None,
                bio: None,
                photo_url: None,
                website: None,
            },
            token: "tok-1".to_string(),
            issued_at: TimeStamp::from_millis(1),
        }
    }

    #[test]
    fn test_refresh_only_applies_while_signed_in() {
        let mut state = SessionState::SignedOut;
        state.apply_event(AuthEvent::TokenRefreshed {
            token: "tok-2".to_string(),
        });
        assert!(!state.is_signed_in());

        state.apply_event(AuthEvent::SignedIn(make_session()));
        state.apply_event(AuthEvent::TokenRefreshed {
            token: "tok-2".to_string(),
        });
        assert_eq!(state.session().map(|s| s.token.as_str()), Some("tok-2"));
    }

    #[test]
    fn test_remote_sign_out_clears_session() {
        let mut state = SessionState::SignedIn(make_session());
        state.apply_event(AuthEvent::SignedOut);
        assert!(state.session().is_none());
        assert!(state.scope().is_none());
    }
}
