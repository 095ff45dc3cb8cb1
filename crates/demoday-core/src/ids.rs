//! Core identifier types used across the Demoday platform
//!
//! Each identifier wraps a [`Uuid`] and renders with a short prefix
//! (`user-…`, `group-…`) so log lines and keys stay unambiguous. Parsing
//! accepts both the prefixed and the bare UUID form, which is what the REST
//! and realtime collaborators send.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Error returned when an identifier string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} id: {value}")]
pub struct IdParseError {
    /// The identifier kind that failed to parse (e.g. "user")
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the inner UUID.
            pub fn uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bare = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(bare).map(Self).map_err(|_| IdParseError {
                    kind: $prefix,
                    value: s.to_string(),
                })
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifies a platform user (issuer, investor, or administrator).
    UserId,
    "user"
);

define_id!(
    /// Identifies a group (university tenant).
    GroupId,
    "group"
);

define_id!(
    /// Identifies a course sub-scope within a group.
    CourseId,
    "course"
);

define_id!(
    /// Identifies an investment offer (a showcased project).
    OfferId,
    "offer"
);

define_id!(
    /// Identifies a sector (system attribute used to classify offers).
    SectorId,
    "sector"
);

define_id!(
    /// Identifies an access request raised against a scope.
    RequestId,
    "request"
);

define_id!(
    /// Identifies a course-admin invite.
    InviteId,
    "invite"
);

define_id!(
    /// Identifies a notification delivered to a user.
    NoticeId,
    "notice"
);

define_id!(
    /// Identifies a pledge made by an investor against an offer.
    PledgeId,
    "pledge"
);

define_id!(
    /// Identifies an activity entry in a scope's feed.
    ActivityId,
    "activity"
);

define_id!(
    /// Identifies a forum thread.
    ThreadId,
    "thread"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_prefix() {
        let id = UserId::from_uuid(Uuid::nil());
        assert_eq!(id.to_string(), format!("user-{}", Uuid::nil()));
    }

    #[test]
    fn test_parse_accepts_prefixed_and_bare() {
        let bare = Uuid::nil().to_string();
        let prefixed = format!("group-{bare}");
        assert_eq!(
            bare.parse::<GroupId>().map(|id| id.uuid()),
            Ok(Uuid::nil())
        );
        assert_eq!(
            prefixed.parse::<GroupId>().map(|id| id.uuid()),
            Ok(Uuid::nil())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<OfferId>().unwrap_err();
        assert_eq!(err.kind, "offer");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = SectorId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", Uuid::nil()));
        let back: SectorId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
