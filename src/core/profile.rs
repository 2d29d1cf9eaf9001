//! # User Profile
//!
//! The signed-in identity and the one rule that guards editing it: a handle
//! may not be changed to a reserved name.

use std::fmt;

use crate::core::i18n::Translations;

/// Handles nobody may switch to. Checked at save time only.
pub const RESERVED_HANDLES: [&str; 4] = ["admin", "pavel", "durov", "root"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub bio: String,
    pub avatar: String,
    pub phone: String,
    pub email: String,
}

impl UserProfile {
    /// The profile held while nobody is signed in.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    UsernameTaken,
}

impl ProfileError {
    pub fn message(self, t: &Translations) -> &'static str {
        match self {
            ProfileError::UsernameTaken => t.username_taken,
        }
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::UsernameTaken => write!(f, "username is already taken"),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Reject a candidate whose handle is reserved, unless the user already owns it.
pub fn check_handle(current: &UserProfile, candidate: &UserProfile) -> Result<(), ProfileError> {
    let lowered = candidate.handle.to_lowercase();
    if RESERVED_HANDLES.contains(&lowered.as_str()) && candidate.handle != current.handle {
        return Err(ProfileError::UsernameTaken);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(handle: &str) -> UserProfile {
        UserProfile {
            id: "user_test".to_string(),
            name: "Test".to_string(),
            handle: handle.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_reserved_handle_rejected() {
        let current = profile("alexj");
        assert_eq!(
            check_handle(&current, &profile("admin")),
            Err(ProfileError::UsernameTaken)
        );
    }

    #[test]
    fn test_reserved_check_ignores_case() {
        let current = profile("alexj");
        assert_eq!(
            check_handle(&current, &profile("ROOT")),
            Err(ProfileError::UsernameTaken)
        );
    }

    #[test]
    fn test_own_reserved_handle_allowed() {
        let current = profile("durov");
        let mut candidate = profile("durov");
        candidate.bio = "Still here.".to_string();
        assert_eq!(check_handle(&current, &candidate), Ok(()));
    }

    #[test]
    fn test_unreserved_handle_allowed() {
        assert_eq!(check_handle(&profile("alexj"), &profile("alex_new")), Ok(()));
    }

    #[test]
    fn test_default_profile_is_empty() {
        assert!(UserProfile::default().is_empty());
        assert!(!profile("x").is_empty());
    }
}
