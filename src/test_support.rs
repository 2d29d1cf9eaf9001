//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::core::auth::MockIdentityProvider;
use crate::core::profile::UserProfile;
use crate::core::settings::{AppSettings, Language};
use crate::core::state::App;

/// The profile stored for `alex@example.com`.
pub fn alex() -> UserProfile {
    UserProfile {
        id: "user_alex".to_string(),
        name: "Alex Johnson".to_string(),
        handle: "alexj".to_string(),
        bio: "Building the future.".to_string(),
        avatar: "https://picsum.photos/id/65/100/100".to_string(),
        phone: "+1 234 567 89 00".to_string(),
        email: "alex@example.com".to_string(),
    }
}

/// Creates a signed-out test App with an instant mock provider and English strings.
pub fn test_app() -> App {
    let settings = AppSettings {
        language: Language::En,
        ..Default::default()
    };
    App::new(Arc::new(MockIdentityProvider::instant()), settings)
}

/// Creates a test App already signed in as Alex.
pub fn signed_in_app() -> App {
    let mut app = test_app();
    app.sign_in(alex());
    app
}
