//! # Login Component
//!
//! Sign-in, registration and code verification in one centered card.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `LoginFormState` lives in `TuiState` and owns the field buffers
//! - `LoginForm` is created each frame with borrowed state and `App` props
//!
//! The core only knows the current `AuthStage`; what the user has typed so far
//! stays here until it is submitted as an `Action`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::auth::{VERIFICATION_CODE, VERIFICATION_CODE_LEN};
use crate::core::state::{App, AuthStage};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldView, TextField};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const CARD_WIDTH: u16 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Name,
    Email,
    Password,
    Code,
}

/// Input fields shown for a given stage, in focus order.
pub fn fields_for(stage: &AuthStage) -> &'static [FieldKind] {
    match stage {
        AuthStage::SignIn => &[FieldKind::Email, FieldKind::Password],
        AuthStage::Register => &[FieldKind::Name, FieldKind::Email, FieldKind::Password],
        AuthStage::Verification(_) => &[FieldKind::Code],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageKind {
    SignIn,
    Register,
    Verification,
}

impl From<&AuthStage> for StageKind {
    fn from(stage: &AuthStage) -> Self {
        match stage {
            AuthStage::SignIn => StageKind::SignIn,
            AuthStage::Register => StageKind::Register,
            AuthStage::Verification(_) => StageKind::Verification,
        }
    }
}

/// Persistent state for the login screen.
pub struct LoginFormState {
    pub name: TextField,
    pub email: TextField,
    pub password: TextField,
    pub code: TextField,
    /// Index into `fields_for(stage)`
    pub focus: usize,
    stage: StageKind,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFormState {
    pub fn new() -> Self {
        Self {
            name: TextField::new(),
            email: TextField::new(),
            password: TextField::masked(),
            code: TextField::digits(VERIFICATION_CODE_LEN),
            focus: 0,
            stage: StageKind::SignIn,
        }
    }

    /// Follow stage changes made by the core: focus jumps back to the first field.
    pub fn sync(&mut self, stage: &AuthStage) {
        let kind = StageKind::from(stage);
        if kind != self.stage {
            self.stage = kind;
            self.focus = 0;
            if kind == StageKind::Verification {
                self.code.clear();
            }
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.password.clear();
        self.code.clear();
        self.focus = 0;
    }

    pub fn field(&self, kind: FieldKind) -> &TextField {
        match kind {
            FieldKind::Name => &self.name,
            FieldKind::Email => &self.email,
            FieldKind::Password => &self.password,
            FieldKind::Code => &self.code,
        }
    }

    fn field_mut(&mut self, kind: FieldKind) -> &mut TextField {
        match kind {
            FieldKind::Name => &mut self.name,
            FieldKind::Email => &mut self.email,
            FieldKind::Password => &mut self.password,
            FieldKind::Code => &mut self.code,
        }
    }

    /// Build the submit action, or move focus to the first empty field.
    fn submit(&mut self, stage: &AuthStage) -> Option<Action> {
        let fields = fields_for(stage);
        if let Some(empty) = fields
            .iter()
            .position(|&kind| match kind {
                FieldKind::Password => self.password.text().is_empty(),
                _ => self.field(kind).text().trim().is_empty(),
            })
        {
            self.focus = empty;
            return None;
        }
        match stage {
            AuthStage::SignIn => Some(Action::SubmitLogin {
                email: self.email.text().to_string(),
                password: self.password.text().to_string(),
            }),
            AuthStage::Register => Some(Action::SubmitRegistration {
                name: self.name.text().to_string(),
                email: self.email.text().to_string(),
            }),
            AuthStage::Verification(_) => Some(Action::SubmitCode(self.code.text().to_string())),
        }
    }

    /// Translate a key event into an `Action` for the current stage.
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        stage: &AuthStage,
        is_loading: bool,
    ) -> Option<Action> {
        let fields = fields_for(stage);
        match event {
            TuiEvent::Escape if is_loading => Some(Action::CancelAuth),
            TuiEvent::Escape => {
                matches!(stage, AuthStage::Verification(_)).then_some(Action::BackToRegistration)
            }
            // Everything below edits or submits the form
            _ if is_loading => None,
            TuiEvent::ToggleAuthMode => {
                self.clear();
                Some(Action::ToggleAuthMode)
            }
            TuiEvent::ResendCode => Some(Action::ResendCode),
            TuiEvent::NextField | TuiEvent::CursorDown => {
                self.focus = (self.focus + 1) % fields.len();
                None
            }
            TuiEvent::PrevField | TuiEvent::CursorUp => {
                self.focus = (self.focus + fields.len() - 1) % fields.len();
                None
            }
            TuiEvent::Submit => self.submit(stage),
            _ => {
                let kind = fields[self.focus.min(fields.len() - 1)];
                self.field_mut(kind).handle_event(event);
                None
            }
        }
    }
}

/// Transient render wrapper for the login screen.
pub struct LoginForm<'a> {
    state: &'a LoginFormState,
    app: &'a App,
    palette: &'a Palette,
    spinner_frame: usize,
}

impl<'a> LoginForm<'a> {
    pub fn new(
        state: &'a LoginFormState,
        app: &'a App,
        palette: &'a Palette,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            app,
            palette,
            spinner_frame,
        }
    }

    fn spinner(&self) -> &'static str {
        let frame = if self.app.settings.animations {
            self.spinner_frame
        } else {
            0
        };
        SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
    }

    fn field_title(&self, kind: FieldKind) -> &'static str {
        let t = self.app.t();
        match kind {
            FieldKind::Name => t.name,
            FieldKind::Email => t.email,
            FieldKind::Password => t.password,
            FieldKind::Code => t.verify_code,
        }
    }

    fn header_lines(&self) -> Vec<Line<'a>> {
        let t = self.app.t();
        let (title, subtitle) = match &self.app.auth_stage {
            AuthStage::SignIn => (t.login_title, t.login_subtitle.to_string()),
            AuthStage::Register => (t.register_title, t.register_subtitle.to_string()),
            AuthStage::Verification(registration) => (
                t.verify_title,
                format!("{} {}", t.verify_subtitle, registration.email),
            ),
        };
        vec![
            Line::from(Span::styled(
                title,
                self.palette.accent().add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(subtitle, self.palette.muted())).centered(),
        ]
    }

    fn footer_lines(&self) -> Vec<Line<'a>> {
        let t = self.app.t();
        let mut lines = Vec::new();

        if let Some(error) = self.app.auth_error {
            lines.push(Line::from(Span::styled(error.message(t), self.palette.error())).centered());
        } else if !self.app.status_message.is_empty() {
            lines.push(
                Line::from(Span::styled(
                    self.app.status_message.clone(),
                    self.palette.muted(),
                ))
                .centered(),
            );
        } else {
            lines.push(Line::default());
        }

        let button = match &self.app.auth_stage {
            AuthStage::SignIn => t.sign_in,
            AuthStage::Register => t.sign_up,
            AuthStage::Verification(_) => t.confirm,
        };
        let action_line = if self.app.is_loading {
            Line::from(vec![
                Span::styled(format!("{} ", self.spinner()), self.palette.accent()),
                Span::styled(format!("{}...  Esc", t.please_wait), self.palette.muted()),
            ])
        } else {
            Line::from(Span::styled(format!("[ {} ]", button), self.palette.selected()))
        };
        lines.push(action_line.centered());
        lines.push(Line::default());

        let hints = match &self.app.auth_stage {
            AuthStage::SignIn => vec![
                format!("{} Ctrl+N {}", t.need_account, t.sign_up),
                "alex@example.com / password".to_string(),
            ],
            AuthStage::Register => vec![format!("{} Ctrl+N {}", t.have_account, t.sign_in)],
            AuthStage::Verification(_) => vec![
                format!("Ctrl+R {}  ·  Esc {}", t.resend, t.back),
                format!("{}: {}", t.verify_code, VERIFICATION_CODE),
            ],
        };
        lines.extend(
            hints
                .into_iter()
                .map(|hint| Line::from(Span::styled(hint, self.palette.muted())).centered()),
        );
        lines
    }
}

impl Component for LoginForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let fields = fields_for(&self.app.auth_stage);
        let header = self.header_lines();
        let footer = self.footer_lines();

        let width = CARD_WIDTH.min(area.width);
        let height = (header.len() + 1 + fields.len() * 3 + footer.len()) as u16 + 2;
        let card = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height: height.min(area.height),
        };

        frame.render_widget(Clear, card);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.accent())
            .title(Line::from(" Luminary ").centered())
            .style(self.palette.base());
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let mut constraints = vec![Constraint::Length(header.len() as u16 + 1)];
        constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);

        let has_error = self.app.auth_error.is_some();
        for (i, &kind) in fields.iter().enumerate() {
            let mut view = FieldView {
                field: self.state.field(kind),
                title: self.field_title(kind),
                placeholder: "",
                focused: i == self.state.focus && !self.app.is_loading,
                has_error: has_error && i == self.state.focus,
                palette: self.palette,
            };
            view.render(frame, rows[i + 1]);
        }

        frame.render_widget(
            Paragraph::new(footer).wrap(Wrap { trim: true }),
            rows[fields.len() + 1],
        );
    }
}
