//! # Actions
//!
//! Everything that can happen in Luminary becomes an `Action`.
//! User submits the login form? That's `Action::SubmitLogin { .. }`.
//! The identity provider answers? That's `Action::LoginCompleted { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state and returns an `Effect` describing the I/O the adapter should perform.
//! No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::core::auth::{AuthError, Registration};
use crate::core::profile::UserProfile;
use crate::core::settings::SettingsPatch;
use crate::core::state::{App, AuthStage};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Login screen
    ToggleAuthMode,
    SubmitLogin { email: String, password: String },
    SubmitRegistration { name: String, email: String },
    SubmitCode(String),
    BackToRegistration,
    ResendCode,
    CancelAuth,

    // Identity provider completions
    LoginCompleted {
        request_id: u64,
        result: Result<UserProfile, AuthError>,
    },
    AvailabilityChecked {
        request_id: u64,
        registration: Registration,
        result: Result<(), AuthError>,
    },
    VerificationCompleted {
        request_id: u64,
        result: Result<UserProfile, AuthError>,
    },

    // Main screen
    SetSearchQuery(String),
    SelectChat(String),
    CloseChat,
    SendMessage(String),
    TogglePin(String),

    // Settings overlay
    OpenSettings,
    CloseSettings,
    UpdateSettings(SettingsPatch),
    SaveProfile(UserProfile),
    Logout,

    Quit,
}

/// Side effects requested by `update()`, performed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    SpawnLogin {
        request_id: u64,
        email: String,
        password: String,
    },
    SpawnAvailabilityCheck {
        request_id: u64,
        registration: Registration,
    },
    SpawnVerification {
        request_id: u64,
        registration: Registration,
        code: String,
    },
    /// Abort whatever auth request is in flight.
    AbortAuth,
}

/// Mark a new auth request as in flight and return its id.
fn begin_request(app: &mut App) -> u64 {
    app.request_id += 1;
    app.is_loading = true;
    app.auth_error = None;
    app.request_id
}

/// Clear the loading flag if `request_id` is current. Returns `false` for stale ones.
fn finish_request(app: &mut App, request_id: u64) -> bool {
    if !app.is_loading || request_id != app.request_id {
        debug!("Dropping stale auth completion #{}", request_id);
        return false;
    }
    app.is_loading = false;
    true
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ToggleAuthMode => {
            if app.is_loading {
                return Effect::None;
            }
            app.auth_stage = match app.auth_stage {
                AuthStage::SignIn => AuthStage::Register,
                AuthStage::Register | AuthStage::Verification(_) => AuthStage::SignIn,
            };
            app.auth_error = None;
            app.status_message.clear();
            Effect::None
        }
        Action::SubmitLogin { email, password } => {
            if app.is_loading || app.auth_stage != AuthStage::SignIn {
                return Effect::None;
            }
            let request_id = begin_request(app);
            Effect::SpawnLogin {
                request_id,
                email,
                password,
            }
        }
        Action::SubmitRegistration { name, email } => {
            if app.is_loading || app.auth_stage != AuthStage::Register {
                return Effect::None;
            }
            let request_id = begin_request(app);
            Effect::SpawnAvailabilityCheck {
                request_id,
                registration: Registration::new(&name, &email),
            }
        }
        Action::SubmitCode(code) => {
            if app.is_loading {
                return Effect::None;
            }
            let AuthStage::Verification(registration) = &app.auth_stage else {
                return Effect::None;
            };
            let registration = registration.clone();
            let request_id = begin_request(app);
            Effect::SpawnVerification {
                request_id,
                registration,
                code,
            }
        }
        Action::BackToRegistration => {
            if !app.is_loading && matches!(app.auth_stage, AuthStage::Verification(_)) {
                app.auth_stage = AuthStage::Register;
                app.auth_error = None;
            }
            Effect::None
        }
        Action::ResendCode => {
            if matches!(app.auth_stage, AuthStage::Verification(_)) {
                app.status_message = app.t().code_resent.to_string();
            }
            Effect::None
        }
        Action::CancelAuth => {
            if !app.is_loading {
                return Effect::None;
            }
            info!("Auth request #{} cancelled", app.request_id);
            app.is_loading = false;
            app.status_message = app.t().cancelled.to_string();
            Effect::AbortAuth
        }
        Action::LoginCompleted { request_id, result } => {
            if finish_request(app, request_id) {
                match result {
                    Ok(profile) => app.sign_in(profile),
                    Err(e) => {
                        debug!("Login rejected: {}", e);
                        app.auth_error = Some(e);
                    }
                }
            }
            Effect::None
        }
        Action::AvailabilityChecked {
            request_id,
            registration,
            result,
        } => {
            if finish_request(app, request_id) {
                match result {
                    Ok(()) => {
                        info!("Registration pending verification for {}", registration.email);
                        app.auth_stage = AuthStage::Verification(registration);
                    }
                    Err(e) => {
                        debug!("Registration rejected: {}", e);
                        app.auth_error = Some(e);
                    }
                }
            }
            Effect::None
        }
        Action::VerificationCompleted { request_id, result } => {
            if finish_request(app, request_id) {
                match result {
                    Ok(profile) => app.sign_in(profile),
                    Err(e) => {
                        debug!("Verification rejected: {}", e);
                        app.auth_error = Some(e);
                    }
                }
            }
            Effect::None
        }
        Action::SetSearchQuery(query) => {
            app.search_query = query;
            Effect::None
        }
        Action::SelectChat(id) => {
            app.select_chat(&id);
            Effect::None
        }
        Action::CloseChat => {
            app.active_chat_id = None;
            Effect::None
        }
        Action::SendMessage(text) => {
            if app.send_message(text) {
                debug!("Message appended to chat {:?}", app.active_chat_id);
            }
            Effect::None
        }
        Action::TogglePin(id) => {
            app.toggle_pin(&id);
            Effect::None
        }
        Action::OpenSettings => {
            app.settings_open = true;
            app.profile_error = None;
            Effect::None
        }
        Action::CloseSettings => {
            app.settings_open = false;
            app.profile_error = None;
            Effect::None
        }
        Action::UpdateSettings(patch) => {
            debug!("Settings patch: {:?}", patch);
            app.update_settings(patch);
            Effect::None
        }
        Action::SaveProfile(candidate) => {
            match app.save_profile(candidate) {
                Ok(()) => {
                    app.profile_error = None;
                    app.status_message = app.t().profile_saved.to_string();
                }
                Err(e) => app.profile_error = Some(e),
            }
            Effect::None
        }
        Action::Logout => {
            app.logout();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
