//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values and performs the
//! `Effect`s that `update()` asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (auth request in flight, animations on): draws every ~80ms
//!   so the spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resizes or
//!   completions from background tasks.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::auth::{IdentityProvider, MockIdentityProvider};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    Composer, ComposerEvent, ConversationState, LoginFormState, SettingsPanelState, SidebarEvent,
    SidebarState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Palette;

/// Which main-screen widget receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ChatList,
    Search,
    Composer,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub login: LoginFormState,
    pub sidebar: SidebarState,
    pub conversation: ConversationState,
    pub composer: Composer,
    /// Settings overlay (None = hidden)
    pub settings_panel: Option<SettingsPanelState>,
    pub focus: Focus,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            login: LoginFormState::new(),
            sidebar: SidebarState::new(),
            conversation: ConversationState::new(),
            composer: Composer::new(
                app.t().write_message.to_string(),
                Palette::for_theme(app.settings.theme),
            ),
            settings_panel: None,
            focus: Focus::ChatList,
        }
    }

    /// Follow state changes the core made on its own (sign-in, logout, stage changes).
    pub fn sync(&mut self, app: &App) {
        self.login.sync(&app.auth_stage);
        if !app.settings_open {
            self.settings_panel = None;
        }
        if app.is_authenticated {
            self.sidebar.follow(&app.visible_chats());
        }
        if (!app.is_authenticated || app.active_chat_id.is_none()) && self.focus == Focus::Composer
        {
            self.focus = Focus::ChatList;
        }
    }
}

/// Route one terminal event to the focused component. Returns the resulting
/// `Action`, if any; presentation-only changes are applied to `tui` directly.
pub fn dispatch(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    if !app.is_authenticated {
        return tui
            .login
            .handle_event(event, &app.auth_stage, app.is_loading);
    }

    // When the settings overlay is open, route all events to it
    if let Some(panel) = tui.settings_panel.as_mut() {
        let action = panel.handle_event(event, &app.user, &app.settings);
        match action {
            Some(Action::CloseSettings) => tui.settings_panel = None,
            Some(Action::Logout) => {
                tui.settings_panel = None;
                tui.login.clear();
                tui.composer.field.clear();
                tui.focus = Focus::ChatList;
            }
            _ => {}
        }
        return action;
    }

    match event {
        TuiEvent::OpenSettings => {
            tui.settings_panel = Some(SettingsPanelState::new(&app.user, &app.settings));
            return Some(Action::OpenSettings);
        }
        TuiEvent::FocusSearch => {
            tui.focus = Focus::Search;
            return None;
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.conversation.handle_event(event);
            return None;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Search => match tui.sidebar.handle_search_event(event)? {
            SidebarEvent::QueryChanged(query) => Some(Action::SetSearchQuery(query)),
            SidebarEvent::LeaveSearch => {
                tui.focus = Focus::ChatList;
                None
            }
            _ => None,
        },
        Focus::ChatList => {
            if matches!(event, TuiEvent::Escape) && app.active_chat_id.is_some() {
                return Some(Action::CloseChat);
            }
            // Typing with a chat open jumps straight into the composer
            if matches!(event, TuiEvent::InputChar(_) | TuiEvent::Paste(_))
                && app.active_chat_id.is_some()
            {
                tui.focus = Focus::Composer;
                tui.composer.handle_event(event);
                return None;
            }
            let visible = app.visible_chats();
            match tui.sidebar.handle_list_event(event, &visible)? {
                SidebarEvent::Open(id) => {
                    if app.active_chat_id.as_deref() != Some(id.as_str()) {
                        tui.conversation.reset();
                        tui.composer.field.clear();
                    }
                    tui.focus = Focus::Composer;
                    Some(Action::SelectChat(id))
                }
                SidebarEvent::TogglePin(id) => Some(Action::TogglePin(id)),
                _ => None,
            }
        }
        Focus::Composer => {
            if matches!(event, TuiEvent::Escape) {
                tui.focus = Focus::ChatList;
                return None;
            }
            if matches!(event, TuiEvent::TogglePin) {
                return app.active_chat_id.clone().map(Action::TogglePin);
            }
            match tui.composer.handle_event(event)? {
                ComposerEvent::Send(text) => {
                    tui.conversation.stick_to_bottom = true;
                    Some(Action::SendMessage(text))
                }
                ComposerEvent::ContentChanged => None,
            }
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter from Enter; terminals
        // without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the identity backend with the configured latencies.
pub fn build_identity(config: &ResolvedConfig) -> Arc<dyn IdentityProvider> {
    Arc::new(MockIdentityProvider::new(
        config.login_delay,
        config.verify_delay,
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let identity = build_identity(&config);
    info!("Identity provider: {}", identity.name());
    let mut app = App::new(identity, config.settings);
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handle for the in-flight auth request (Esc cancels)
    let mut auth_task: Option<AbortHandle> = None;

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        tui.sync(&app);
        let animating = app.is_loading && app.settings.animations;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Short timeout while a request is in flight so its completion lands quickly
        let timeout = if app.is_loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            tui.sync(&app);
            if let Some(action) = dispatch(&app, &mut tui, &event)
                && apply(&mut app, action, &tx, &mut auth_task)
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle completions from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, action, &tx, &mut auth_task) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    if let Some(handle) = auth_task.take() {
        handle.abort();
    }
    ratatui::restore();
    info!("Luminary shut down");
    Ok(())
}

/// Run `update` and perform the effect. Returns `true` when the app should quit.
fn apply(
    app: &mut App,
    action: Action,
    tx: &mpsc::Sender<Action>,
    auth_task: &mut Option<AbortHandle>,
) -> bool {
    match update(app, action) {
        Effect::Quit => return true,
        Effect::AbortAuth => {
            if let Some(handle) = auth_task.take() {
                handle.abort();
            }
        }
        Effect::None => {}
        effect => {
            *auth_task = spawn_auth(app.identity.clone(), effect, tx.clone());
        }
    }
    false
}

/// Spawn the identity call an effect asks for. The completion comes back over
/// `tx` tagged with the effect's request id.
fn spawn_auth(
    identity: Arc<dyn IdentityProvider>,
    effect: Effect,
    tx: mpsc::Sender<Action>,
) -> Option<AbortHandle> {
    let handle = match effect {
        Effect::SpawnLogin {
            request_id,
            email,
            password,
        } => {
            info!("Spawning login request #{}", request_id);
            tokio::spawn(async move {
                let result = identity.authenticate(&email, &password).await;
                if tx.send(Action::LoginCompleted { request_id, result }).is_err() {
                    warn!("Failed to send login result #{}: receiver dropped", request_id);
                }
            })
        }
        Effect::SpawnAvailabilityCheck {
            request_id,
            registration,
        } => {
            info!("Spawning availability check #{}", request_id);
            tokio::spawn(async move {
                let result = identity.check_availability(&registration.email).await;
                let action = Action::AvailabilityChecked {
                    request_id,
                    registration,
                    result,
                };
                if tx.send(action).is_err() {
                    warn!("Failed to send availability result #{}: receiver dropped", request_id);
                }
            })
        }
        Effect::SpawnVerification {
            request_id,
            registration,
            code,
        } => {
            info!("Spawning verification request #{}", request_id);
            tokio::spawn(async move {
                let result = identity.verify(&registration, &code).await;
                if tx
                    .send(Action::VerificationCompleted { request_id, result })
                    .is_err()
                {
                    warn!("Failed to send verification result #{}: receiver dropped", request_id);
                }
            })
        }
        Effect::None | Effect::Quit | Effect::AbortAuth => return None,
    };
    Some(handle.abort_handle())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::VERIFICATION_CODE;
    use crate::core::state::AuthStage;
    use crate::test_support::{signed_in_app, test_app};

    /// Feed events through dispatch + update the way the loop does.
    fn drive(app: &mut App, tui: &mut TuiState, events: &[TuiEvent]) -> Vec<Effect> {
        let mut effects = Vec::new();
        for event in events {
            tui.sync(app);
            if let Some(action) = dispatch(app, tui, event) {
                effects.push(update(app, action));
            }
        }
        effects
    }

    fn typed(text: &str) -> Vec<TuiEvent> {
        text.chars().map(TuiEvent::InputChar).collect()
    }

    #[test]
    fn test_login_form_spawns_login() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        let mut events = typed("alex@example.com");
        events.push(TuiEvent::NextField);
        events.extend(typed("password"));
        events.push(TuiEvent::Submit);

        let effects = drive(&mut app, &mut tui, &events);
        assert!(matches!(
            effects.last(),
            Some(Effect::SpawnLogin { email, password, .. })
                if email == "alex@example.com" && password == "password"
        ));
        assert!(app.is_loading);
    }

    #[test]
    fn test_escape_while_loading_aborts() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        let mut events = typed("a@b.c");
        events.push(TuiEvent::NextField);
        events.extend(typed("x"));
        events.push(TuiEvent::Submit);
        events.push(TuiEvent::Escape);

        let effects = drive(&mut app, &mut tui, &events);
        assert_eq!(effects.last(), Some(&Effect::AbortAuth));
        assert!(!app.is_loading);
    }

    #[test]
    fn test_open_chat_and_send() {
        let mut app = signed_in_app();
        let mut tui = TuiState::new(&app);
        // Pinned "Designers Hub" is first; move to Pavel Durov
        let mut events = vec![TuiEvent::CursorDown, TuiEvent::Submit];
        events.extend(typed("hi"));
        events.push(TuiEvent::Submit);

        drive(&mut app, &mut tui, &events);
        assert_eq!(app.active_chat_id.as_deref(), Some("1"));
        assert_eq!(app.active_history().last().map(|m| m.text.as_str()), Some("hi"));
        assert_eq!(tui.focus, Focus::Composer);
        assert!(tui.composer.field.text().is_empty());
    }

    #[test]
    fn test_search_filters_chats() {
        let mut app = signed_in_app();
        let mut tui = TuiState::new(&app);
        let mut events = vec![TuiEvent::FocusSearch];
        events.extend(typed("xj"));
        events.push(TuiEvent::Submit);

        drive(&mut app, &mut tui, &events);
        assert_eq!(app.search_query, "xj");
        let ids: Vec<&str> = app.visible_chats().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["4"]);
        assert_eq!(tui.focus, Focus::ChatList);
    }

    #[test]
    fn test_pin_toggle_twice_restores_order() {
        let mut app = signed_in_app();
        let mut tui = TuiState::new(&app);
        let before: Vec<(String, bool)> = app
            .chats
            .iter()
            .map(|c| (c.id.clone(), c.is_pinned))
            .collect();

        drive(
            &mut app,
            &mut tui,
            &[TuiEvent::CursorDown, TuiEvent::CursorDown, TuiEvent::CursorDown],
        );
        assert_eq!(app.visible_chats()[tui.sidebar.selected].id, "4");

        drive(&mut app, &mut tui, &[TuiEvent::TogglePin]);
        assert!(app.chats.iter().any(|c| c.id == "4" && c.is_pinned));
        tui.sync(&app);
        assert_eq!(app.visible_chats()[tui.sidebar.selected].id, "4");

        drive(&mut app, &mut tui, &[TuiEvent::TogglePin]);
        let after: Vec<(String, bool)> = app
            .chats
            .iter()
            .map(|c| (c.id.clone(), c.is_pinned))
            .collect();
        assert_eq!(after, before);
    }

    #[test]
    fn test_highlight_survives_search() {
        let mut app = signed_in_app();
        let mut tui = TuiState::new(&app);
        drive(&mut app, &mut tui, &[TuiEvent::CursorDown]);
        assert_eq!(app.visible_chats()[tui.sidebar.selected].id, "1");

        let mut events = vec![TuiEvent::FocusSearch];
        events.extend(typed("durov"));
        drive(&mut app, &mut tui, &events);
        tui.sync(&app);
        assert_eq!(tui.sidebar.selected, 0);
        assert_eq!(app.visible_chats()[tui.sidebar.selected].id, "1");
    }

    #[test]
    fn test_escape_closes_chat_from_list() {
        let mut app = signed_in_app();
        let mut tui = TuiState::new(&app);
        drive(
            &mut app,
            &mut tui,
            &[TuiEvent::Submit, TuiEvent::Escape, TuiEvent::Escape],
        );
        assert_eq!(app.active_chat_id, None);
    }

    #[test]
    fn test_settings_logout_returns_to_login() {
        let mut app = signed_in_app();
        let mut tui = TuiState::new(&app);
        let mut events = vec![TuiEvent::OpenSettings];
        events.extend(std::iter::repeat_n(TuiEvent::CursorDown, 20));
        events.push(TuiEvent::Submit);

        drive(&mut app, &mut tui, &events);
        assert!(!app.is_authenticated);
        assert!(tui.settings_panel.is_none());
        assert_eq!(app.auth_stage, AuthStage::SignIn);
    }

    #[test]
    fn test_force_quit_everywhere() {
        let app = test_app();
        let mut tui = TuiState::new(&app);
        assert_eq!(dispatch(&app, &mut tui, &TuiEvent::ForceQuit), Some(Action::Quit));
    }

    #[tokio::test]
    async fn test_spawned_login_reports_back() {
        let mut app = test_app();
        let (tx, rx) = mpsc::channel();
        let mut auth_task = None;
        let action = Action::SubmitLogin {
            email: "durov@telegram.org".to_string(),
            password: "123".to_string(),
        };
        assert!(!apply(&mut app, action, &tx, &mut auth_task));
        assert!(auth_task.is_some());

        // The mock answers immediately; give the task a chance to run
        let completion = loop {
            if let Ok(action) = rx.try_recv() {
                break action;
            }
            tokio::task::yield_now().await;
        };
        apply(&mut app, completion, &tx, &mut auth_task);
        assert!(app.is_authenticated);
        assert_eq!(app.user.handle, "durov");
    }

    #[tokio::test]
    async fn test_registration_through_verification() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        let (tx, rx) = mpsc::channel();
        let mut auth_task = None;

        let mut events = vec![TuiEvent::ToggleAuthMode];
        events.extend(typed("Sam"));
        events.push(TuiEvent::NextField);
        events.extend(typed("sam@example.com"));
        events.push(TuiEvent::NextField);
        events.extend(typed("pw"));
        events.push(TuiEvent::Submit);

        for event in &events {
            tui.sync(&app);
            if let Some(action) = dispatch(&app, &mut tui, event) {
                apply(&mut app, action, &tx, &mut auth_task);
            }
        }
        let checked = loop {
            if let Ok(action) = rx.try_recv() {
                break action;
            }
            tokio::task::yield_now().await;
        };
        apply(&mut app, checked, &tx, &mut auth_task);
        assert!(matches!(app.auth_stage, AuthStage::Verification(_)));

        tui.sync(&app);
        let mut events = typed(VERIFICATION_CODE);
        events.push(TuiEvent::Submit);
        for event in &events {
            if let Some(action) = dispatch(&app, &mut tui, event) {
                apply(&mut app, action, &tx, &mut auth_task);
            }
        }
        let verified = loop {
            if let Ok(action) = rx.try_recv() {
                break action;
            }
            tokio::task::yield_now().await;
        };
        apply(&mut app, verified, &tx, &mut auth_task);
        assert!(app.is_authenticated);
        assert_eq!(app.user.name, "Sam");
        assert_eq!(app.user.email, "sam@example.com");
    }
}
