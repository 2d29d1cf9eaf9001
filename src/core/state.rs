//! # Application State
//!
//! Core business state for Luminary. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── identity: Arc<dyn IdentityProvider>  // sign-in / registration backend
//! ├── is_authenticated: bool               // login screen vs. main interface
//! ├── user: UserProfile                    // empty while signed out
//! ├── auth_stage: AuthStage                // SignIn | Register | Verification
//! ├── auth_error: Option<AuthError>        // inline login form error
//! ├── is_loading: bool                     // auth request in flight
//! ├── request_id: u64                      // id of the in-flight request
//! ├── chats: Vec<Chat>                     // pinned first
//! ├── histories: HashMap<id, Vec<Message>> // opened conversations
//! ├── active_chat_id: Option<String>
//! ├── search_query: String
//! ├── settings: AppSettings
//! ├── settings_open: bool
//! ├── profile_error: Option<ProfileError>
//! └── status_message: String
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::core::auth::{AuthError, IdentityProvider, Registration};
use crate::core::chats::{self, Chat, Message};
use crate::core::i18n::Translations;
use crate::core::profile::{self, ProfileError, UserProfile};
use crate::core::settings::{AppSettings, SettingsPatch};

/// Where the login screen currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStage {
    SignIn,
    Register,
    /// Waiting for the one-time code sent to the registration email.
    Verification(Registration),
}

pub struct App {
    pub identity: Arc<dyn IdentityProvider>,
    pub is_authenticated: bool,
    pub user: UserProfile,
    pub auth_stage: AuthStage,
    pub auth_error: Option<AuthError>,
    pub is_loading: bool,
    /// Bumped for every spawned auth request; stale completions are dropped.
    pub request_id: u64,
    pub chats: Vec<Chat>,
    pub histories: HashMap<String, Vec<Message>>,
    pub active_chat_id: Option<String>,
    pub search_query: String,
    pub settings: AppSettings,
    pub settings_open: bool,
    pub profile_error: Option<ProfileError>,
    pub status_message: String,
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

impl App {
    pub fn new(identity: Arc<dyn IdentityProvider>, settings: AppSettings) -> Self {
        let mut chats = chats::seed_chats(now_ms());
        chats::sort_pinned_first(&mut chats);
        Self {
            identity,
            is_authenticated: false,
            user: UserProfile::default(),
            auth_stage: AuthStage::SignIn,
            auth_error: None,
            is_loading: false,
            request_id: 0,
            chats,
            histories: HashMap::new(),
            active_chat_id: None,
            search_query: String::new(),
            settings,
            settings_open: false,
            profile_error: None,
            status_message: String::new(),
        }
    }

    /// UI strings for the current language.
    pub fn t(&self) -> &'static Translations {
        self.settings.strings()
    }

    /// Chats matching the current search query.
    pub fn visible_chats(&self) -> Vec<&Chat> {
        chats::filter_chats(&self.chats, &self.search_query)
    }

    pub fn active_chat(&self) -> Option<&Chat> {
        let id = self.active_chat_id.as_deref()?;
        self.chats.iter().find(|c| c.id == id)
    }

    /// Messages of the active conversation (empty when none is open).
    pub fn active_history(&self) -> &[Message] {
        self.active_chat_id
            .as_deref()
            .and_then(|id| self.histories.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of unread counters across all chats.
    pub fn unread_total(&self) -> u32 {
        self.chats.iter().map(|c| c.unread_count).sum()
    }

    pub fn sign_in(&mut self, profile: UserProfile) {
        info!("Signed in as {} ({})", profile.handle, profile.id);
        self.user = profile;
        self.is_authenticated = true;
        self.auth_error = None;
        self.auth_stage = AuthStage::SignIn;
    }

    pub fn logout(&mut self) {
        info!("Signed out {}", self.user.id);
        self.is_authenticated = false;
        self.active_chat_id = None;
        self.settings_open = false;
        self.profile_error = None;
        self.user = UserProfile::default();
        self.auth_stage = AuthStage::SignIn;
        self.auth_error = None;
    }

    /// Open a chat, seeding its history on first visit. Unknown ids are ignored.
    pub fn select_chat(&mut self, id: &str) -> bool {
        let Some(chat) = self.chats.iter().find(|c| c.id == id) else {
            return false;
        };
        if !self.histories.contains_key(id) {
            let seeded = vec![chats::greeting(chat, now_ms())];
            self.histories.insert(id.to_string(), seeded);
        }
        self.active_chat_id = Some(id.to_string());
        true
    }

    /// Append a locally composed message to the active chat.
    ///
    /// No-op (returns `false`) without an active chat or when `text` is blank.
    pub fn send_message(&mut self, text: String) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let Some(id) = self.active_chat_id.clone() else {
            return false;
        };
        let Some(chat) = self.chats.iter_mut().find(|c| c.id == id) else {
            return false;
        };

        let message = Message::outgoing(text, now_ms());
        chat.last_message = Some(message.clone());
        chat.unread_count = 0;
        self.histories.entry(id).or_default().push(message);
        true
    }

    /// Flip a chat's pin and restore pinned-first ordering.
    pub fn toggle_pin(&mut self, id: &str) -> bool {
        let Some(chat) = self.chats.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        chat.is_pinned = !chat.is_pinned;
        chats::sort_pinned_first(&mut self.chats);
        true
    }

    /// Replace the profile wholesale unless the new handle is reserved.
    pub fn save_profile(&mut self, candidate: UserProfile) -> Result<(), ProfileError> {
        profile::check_handle(&self.user, &candidate)?;
        self.user = candidate;
        Ok(())
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.settings.merge(patch);
    }
}

#[cfg(test)]
mod tests {
    use crate::core::chats::DeliveryStatus;
    use crate::core::settings::Theme;
    use crate::test_support::{alex, signed_in_app, test_app};

    use super::*;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(!app.is_authenticated);
        assert!(app.user.is_empty());
        assert_eq!(app.auth_stage, AuthStage::SignIn);
        assert!(!app.is_loading);
        assert!(app.active_chat_id.is_none());
        assert_eq!(app.chats.len(), 4);
    }

    #[test]
    fn test_pinned_chats_come_first() {
        let app = test_app();
        assert!(app.chats[0].is_pinned);
        assert_eq!(app.chats[0].name, "Designers Hub");
    }

    #[test]
    fn test_visible_chats_identity_on_empty_query() {
        let app = test_app();
        let visible = app.visible_chats();
        assert_eq!(visible.len(), app.chats.len());
        assert!(visible.iter().zip(&app.chats).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_select_chat_seeds_history_once() {
        let mut app = signed_in_app();
        assert!(app.select_chat("1"));
        assert_eq!(app.active_history().len(), 1);
        assert!(app.send_message("hello".to_string()));
        app.select_chat("2");
        app.select_chat("1");
        assert_eq!(app.active_history().len(), 2);
    }

    #[test]
    fn test_select_unknown_chat_ignored() {
        let mut app = signed_in_app();
        assert!(!app.select_chat("missing"));
        assert!(app.active_chat_id.is_none());
    }

    #[test]
    fn test_send_updates_chat_summary() {
        let mut app = signed_in_app();
        app.select_chat("2");
        assert!(app.send_message("New palette is live".to_string()));

        let chat = app.active_chat().unwrap();
        assert_eq!(chat.unread_count, 0);
        let last = chat.last_message.as_ref().unwrap();
        assert_eq!(last.text, "New palette is live");
        assert_eq!(last.status, DeliveryStatus::Sent);
        assert!(last.is_own());
        assert_eq!(app.active_history().last(), Some(last));
    }

    #[test]
    fn test_send_whitespace_is_noop() {
        let mut app = signed_in_app();
        app.select_chat("1");
        let before = app.chats.clone();
        assert!(!app.send_message("  ".to_string()));
        assert_eq!(app.chats, before);
        assert_eq!(app.active_history().len(), 1);
    }

    #[test]
    fn test_send_without_active_chat_is_noop() {
        let mut app = signed_in_app();
        let before = app.chats.clone();
        assert!(!app.send_message("hello".to_string()));
        assert_eq!(app.chats, before);
    }

    #[test]
    fn test_send_keeps_text_as_typed() {
        let mut app = signed_in_app();
        app.select_chat("1");
        app.send_message("  padded  ".to_string());
        let chat = app.active_chat().unwrap();
        assert_eq!(chat.last_message.as_ref().unwrap().text, "  padded  ");
    }

    #[test]
    fn test_toggle_pin_reorders() {
        let mut app = test_app();
        assert!(app.toggle_pin("4"));
        let order: Vec<&str> = app.chats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["2", "4", "1", "3"]);

        app.toggle_pin("2");
        let order: Vec<&str> = app.chats.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["4", "2", "1", "3"]);
    }

    #[test]
    fn test_save_profile_reserved_handle() {
        let mut app = signed_in_app();
        let mut candidate = app.user.clone();
        candidate.handle = "admin".to_string();
        assert_eq!(app.save_profile(candidate), Err(ProfileError::UsernameTaken));
        assert_eq!(app.user, alex());
    }

    #[test]
    fn test_save_profile_replaces_wholesale() {
        let mut app = signed_in_app();
        let mut candidate = app.user.clone();
        candidate.name = "Alexander".to_string();
        candidate.bio = "Shipping things.".to_string();
        assert_eq!(app.save_profile(candidate.clone()), Ok(()));
        assert_eq!(app.user, candidate);
    }

    #[test]
    fn test_logout_resets_session() {
        let mut app = signed_in_app();
        app.select_chat("1");
        app.settings_open = true;
        app.logout();
        assert!(!app.is_authenticated);
        assert!(app.user.is_empty());
        assert!(app.active_chat_id.is_none());
        assert!(!app.settings_open);
    }

    #[test]
    fn test_update_settings_merges() {
        let mut app = test_app();
        app.update_settings(SettingsPatch {
            theme: Some(Theme::Dark),
            ..Default::default()
        });
        assert_eq!(app.settings.theme, Theme::Dark);
        assert_eq!(app.settings.font_size, 14);
    }

    #[test]
    fn test_unread_total() {
        let app = test_app();
        assert_eq!(app.unread_total(), 2 + 45 + 3);
    }
}
