//! User roles and administrator levels

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a user signed up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Lists offers for a venture they represent
    Issuer,
    /// Browses offers and makes pledges
    #[default]
    Investor,
    /// Manages a group or course scope
    Admin,
}

/// How far an administrator's authority reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdminLevel {
    /// Administers the whole group (university)
    Group,
    /// Administers a single course inside the group
    #[default]
    Course,
}

impl Role {
    /// Whether this role may manage sectors, invites, and access requests.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Issuer => write!(f, "issuer"),
            Self::Investor => write!(f, "investor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => write!(f, "group"),
            Self::Course => write!(f, "course"),
        }
    }
}
