//! # Profile View and Edit Form
//!
//! The signed-in user's profile plus the edit-form state behind the
//! profile screen. Validation runs client-side before any request; field
//! errors render inline, never as toasts.

use demoday_core::{AdminLevel, Role, Scope, SectorId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest display name accepted.
pub const MIN_DISPLAY_NAME_LENGTH: usize = 2;

/// Longest display name accepted.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;

/// Longest bio accepted.
pub const MAX_BIO_LENGTH: usize = 500;

/// The signed-in user as screens render them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    /// Present only for administrators
    pub admin_level: Option<AdminLevel>,
    pub scope: Scope,
    pub sector_id: Option<SectorId>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub website: Option<String>,
}

/// Why a display name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayNameError {
    #[error("display name must be at least {MIN_DISPLAY_NAME_LENGTH} characters")]
    TooShort,
    #[error("display name must be at most {MAX_DISPLAY_NAME_LENGTH} characters")]
    TooLong,
    #[error("display name cannot be only whitespace")]
    Blank,
}

/// Validate a display name against the platform rules.
pub fn validate_display_name(name: &str) -> Result<(), DisplayNameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DisplayNameError::Blank);
    }
    let len = trimmed.chars().count();
    if len < MIN_DISPLAY_NAME_LENGTH {
        return Err(DisplayNameError::TooShort);
    }
    if len > MAX_DISPLAY_NAME_LENGTH {
        return Err(DisplayNameError::TooLong);
    }
    Ok(())
}

/// An inline validation message tied to one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// The profile edit payload the bridge sends upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub sector_id: Option<SectorId>,
    pub photo_url: Option<String>,
}

/// Edit-form state for the profile screen.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub display_name: String,
    pub bio: String,
    pub website: String,
    pub sector_id: Option<SectorId>,
    pub photo_url: Option<String>,
    /// Inline errors from the last [`validate`](Self::validate) pass
    pub field_errors: Vec<FieldError>,
    /// Whether the form differs from the profile it was loaded from
    pub dirty: bool,
}

impl ProfileForm {
    /// Prefill from the current profile.
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            display_name: profile.display_name.clone(),
            bio: profile.bio.clone().unwrap_or_default(),
            website: profile.website.clone().unwrap_or_default(),
            sector_id: profile.sector_id,
            photo_url: profile.photo_url.clone(),
            field_errors: Vec::new(),
            dirty: false,
        }
    }

    /// Record an edit to one field.
    pub fn edit(&mut self, apply: impl FnOnce(&mut Self)) {
        apply(self);
        self.dirty = true;
    }

    /// Run client-side validation; returns whether the form may be saved.
    pub fn validate(&mut self) -> bool {
        self.field_errors.clear();

        if let Err(e) = validate_display_name(&self.display_name) {
            self.field_errors.push(FieldError {
                field: "display_name",
                message: e.to_string(),
            });
        }
        if self.bio.chars().count() > MAX_BIO_LENGTH {
            self.field_errors.push(FieldError {
                field: "bio",
                message: format!("bio must be at most {MAX_BIO_LENGTH} characters"),
            });
        }
        let website = self.website.trim();
        if !website.is_empty() && !(website.starts_with("http://") || website.starts_with("https://"))
        {
            self.field_errors.push(FieldError {
                field: "website",
                message: "website must start with http:// or https://".to_string(),
            });
        }

        self.field_errors.is_empty()
    }

    /// The update payload for a validated form.
    pub fn to_update(&self) -> ProfileUpdate {
        let clean = |s: &str| {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(t.to_string())
            }
        };
        ProfileUpdate {
            display_name: Some(self.display_name.trim().to_string()),
            bio: clean(&self.bio),
            website: clean(&self.website),
            sector_id: self.sector_id,
            photo_url: self.photo_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demoday_core::GroupId;

    fn make_profile() -> UserProfile {
        UserProfile {
            id: UserId::new(),
            email: "ada@example.edu".to_string(),
            display_name: "Ada".to_string(),
            role: Role::Issuer,
            admin_level: None,
            scope: Scope::group(GroupId::new()),
            sector_id: None,
            bio: None,
            photo_url: None,
            website: None,
        }
    }

    #[test]
    fn test_display_name_rules() {
        assert_eq!(validate_display_name("  "), Err(DisplayNameError::Blank));
        assert_eq!(validate_display_name("A"), Err(DisplayNameError::TooShort));
        assert_eq!(
            validate_display_name(&"x".repeat(MAX_DISPLAY_NAME_LENGTH + 1)),
            Err(DisplayNameError::TooLong)
        );
        assert_eq!(validate_display_name("Ada Lovelace"), Ok(()));
    }

    #[test]
    fn test_form_validation_collects_field_errors() {
        let mut form = ProfileForm::from_profile(&make_profile());
        form.edit(|f| {
            f.display_name = "A".to_string();
            f.website = "example.edu".to_string();
        });

        assert!(!form.validate());
        let fields: Vec<_> = form.field_errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["display_name", "website"]);

        form.edit(|f| {
            f.display_name = "Ada L".to_string();
            f.website = "https://example.edu".to_string();
        });
        assert!(form.validate());
        assert!(form.field_errors.is_empty());
    }

    #[test]
    fn test_update_payload_trims_and_drops_empties() {
        let mut form = ProfileForm::from_profile(&make_profile());
        form.edit(|f| {
            f.display_name = "  Ada  ".to_string();
            f.bio = "   ".to_string();
        });
        let update = form.to_update();
        assert_eq!(update.display_name.as_deref(), Some("Ada"));
        assert_eq!(update.bio, None);
    }
}
