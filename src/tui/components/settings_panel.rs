//! # Settings Panel Component
//!
//! Overlay for editing the profile and appearance settings. Opened with
//! Ctrl+O, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SettingsPanelState` lives in `TuiState` while the overlay is open
//! - `SettingsPanel` is created each frame with borrowed state and `App` props
//!
//! Profile edits are only applied on Save; appearance rows apply immediately.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::action::Action;
use crate::core::profile::UserProfile;
use crate::core::settings::{
    AppSettings, FONT_SIZE_MAX, FONT_SIZE_MIN, SettingsPatch, step_font_size,
};
use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::TextField;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Width of the label column
const LABEL_WIDTH: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Name,
    Handle,
    Bio,
    Save,
    DarkMode,
    FontSize,
    Language,
    Notifications,
    Animations,
    Wallpaper,
    Logout,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 11] = [
        SettingsRow::Name,
        SettingsRow::Handle,
        SettingsRow::Bio,
        SettingsRow::Save,
        SettingsRow::DarkMode,
        SettingsRow::FontSize,
        SettingsRow::Language,
        SettingsRow::Notifications,
        SettingsRow::Animations,
        SettingsRow::Wallpaper,
        SettingsRow::Logout,
    ];

    fn is_text(self) -> bool {
        matches!(
            self,
            SettingsRow::Name | SettingsRow::Handle | SettingsRow::Bio | SettingsRow::Wallpaper
        )
    }
}

/// Persistent state for the settings overlay.
pub struct SettingsPanelState {
    pub name: TextField,
    pub handle: TextField,
    pub bio: TextField,
    pub wallpaper: TextField,
    pub selected: usize,
}

impl SettingsPanelState {
    /// Pre-fill the editable rows from the current profile and settings.
    pub fn new(user: &UserProfile, settings: &AppSettings) -> Self {
        Self {
            name: TextField::new().with_text(&user.name),
            handle: TextField::new().with_text(&user.handle),
            bio: TextField::new().with_text(&user.bio),
            wallpaper: TextField::new().with_text(&settings.wallpaper),
            selected: 0,
        }
    }

    pub fn row(&self) -> SettingsRow {
        SettingsRow::ALL[self.selected.min(SettingsRow::ALL.len() - 1)]
    }

    fn text_field(&self, row: SettingsRow) -> Option<&TextField> {
        match row {
            SettingsRow::Name => Some(&self.name),
            SettingsRow::Handle => Some(&self.handle),
            SettingsRow::Bio => Some(&self.bio),
            SettingsRow::Wallpaper => Some(&self.wallpaper),
            _ => None,
        }
    }

    fn text_field_mut(&mut self, row: SettingsRow) -> Option<&mut TextField> {
        match row {
            SettingsRow::Name => Some(&mut self.name),
            SettingsRow::Handle => Some(&mut self.handle),
            SettingsRow::Bio => Some(&mut self.bio),
            SettingsRow::Wallpaper => Some(&mut self.wallpaper),
            _ => None,
        }
    }

    /// The current profile with the edited name, handle and bio.
    pub fn candidate(&self, user: &UserProfile) -> UserProfile {
        UserProfile {
            name: self.name.text().trim().to_string(),
            handle: self.handle.text().trim().trim_start_matches('@').to_string(),
            bio: self.bio.text().to_string(),
            ..user.clone()
        }
    }

    /// Translate a key event into an `Action`.
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        user: &UserProfile,
        settings: &AppSettings,
    ) -> Option<Action> {
        let row = self.row();
        let last = SettingsRow::ALL.len() - 1;
        let update = |patch: SettingsPatch| Some(Action::UpdateSettings(patch));

        match (row, event) {
            (_, TuiEvent::Escape) => Some(Action::CloseSettings),
            (_, TuiEvent::CursorUp | TuiEvent::PrevField) => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            (_, TuiEvent::CursorDown | TuiEvent::NextField) => {
                self.selected = (self.selected + 1).min(last);
                None
            }

            (
                SettingsRow::Name | SettingsRow::Handle | SettingsRow::Bio | SettingsRow::Save,
                TuiEvent::Submit,
            ) => Some(Action::SaveProfile(self.candidate(user))),
            (SettingsRow::Wallpaper, TuiEvent::Submit) => update(SettingsPatch {
                wallpaper: Some(self.wallpaper.text().trim().to_string()),
                ..Default::default()
            }),
            (text_row, _) if text_row.is_text() => {
                if let Some(field) = self.text_field_mut(text_row) {
                    field.handle_event(event);
                }
                None
            }

            (SettingsRow::DarkMode, TuiEvent::Submit | TuiEvent::InputChar(' ')) => {
                update(SettingsPatch {
                    theme: Some(settings.theme.toggled()),
                    ..Default::default()
                })
            }
            (SettingsRow::FontSize, TuiEvent::CursorLeft | TuiEvent::InputChar('-')) => {
                update(SettingsPatch {
                    font_size: Some(step_font_size(settings.font_size, -1)),
                    ..Default::default()
                })
            }
            (SettingsRow::FontSize, TuiEvent::CursorRight | TuiEvent::InputChar('+')) => {
                update(SettingsPatch {
                    font_size: Some(step_font_size(settings.font_size, 1)),
                    ..Default::default()
                })
            }
            (
                SettingsRow::Language,
                TuiEvent::Submit
                | TuiEvent::InputChar(' ')
                | TuiEvent::CursorLeft
                | TuiEvent::CursorRight,
            ) => update(SettingsPatch {
                language: Some(settings.language.next()),
                ..Default::default()
            }),
            (SettingsRow::Notifications, TuiEvent::Submit | TuiEvent::InputChar(' ')) => {
                update(SettingsPatch {
                    notifications: Some(!settings.notifications),
                    ..Default::default()
                })
            }
            (SettingsRow::Animations, TuiEvent::Submit | TuiEvent::InputChar(' ')) => {
                update(SettingsPatch {
                    animations: Some(!settings.animations),
                    ..Default::default()
                })
            }
            (SettingsRow::Logout, TuiEvent::Submit) => Some(Action::Logout),
            _ => None,
        }
    }
}

/// Transient render wrapper for the settings overlay.
pub struct SettingsPanel<'a> {
    state: &'a SettingsPanelState,
    app: &'a App,
    palette: &'a Palette,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(state: &'a SettingsPanelState, app: &'a App, palette: &'a Palette) -> Self {
        Self {
            state,
            app,
            palette,
        }
    }

    fn toggle(on: bool) -> String {
        if on { "[✓]" } else { "[ ]" }.to_string()
    }

    fn font_slider(size: u8) -> String {
        let steps = usize::from(FONT_SIZE_MAX - FONT_SIZE_MIN);
        let pos = usize::from(size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX) - FONT_SIZE_MIN);
        format!(
            "◀ {}●{} ▶ {}",
            "━".repeat(pos),
            "─".repeat(steps - pos),
            size
        )
    }

    fn label(&self, row: SettingsRow) -> &'static str {
        let t = self.app.t();
        match row {
            SettingsRow::Name => t.name,
            SettingsRow::Handle => t.username,
            SettingsRow::Bio => t.bio,
            SettingsRow::Save => "",
            SettingsRow::DarkMode => t.dark_mode,
            SettingsRow::FontSize => t.font_size,
            SettingsRow::Language => t.language,
            SettingsRow::Notifications => t.notifications,
            SettingsRow::Animations => t.animations,
            SettingsRow::Wallpaper => t.wallpaper,
            SettingsRow::Logout => "",
        }
    }

    fn value(&self, row: SettingsRow) -> String {
        let settings = &self.app.settings;
        let t = self.app.t();
        match row {
            SettingsRow::Save => format!("[ {} ]", t.save),
            SettingsRow::Logout => format!("[ {} ]", t.logout),
            SettingsRow::DarkMode => Self::toggle(settings.theme.is_dark()),
            SettingsRow::FontSize => Self::font_slider(settings.font_size),
            SettingsRow::Language => format!("◀ {} ▶", settings.language.label()),
            SettingsRow::Notifications => Self::toggle(settings.notifications),
            SettingsRow::Animations => Self::toggle(settings.animations),
            text_row => self
                .state
                .text_field(text_row)
                .map(|f| f.text().to_string())
                .unwrap_or_default(),
        }
    }

    fn row_line(&self, row: SettingsRow) -> Line<'static> {
        let selected = self.state.row() == row;
        let label_style = if selected {
            self.palette.accent()
        } else {
            Style::default().fg(self.palette.text)
        };
        let value_style = match row {
            SettingsRow::Save | SettingsRow::Logout if selected => self.palette.selected(),
            SettingsRow::Logout => Style::default().fg(self.palette.error),
            _ if selected => Style::default()
                .fg(self.palette.text)
                .add_modifier(Modifier::UNDERLINED),
            _ => Style::default().fg(self.palette.text),
        };
        let marker = if selected { "› " } else { "  " };
        Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(
                format!("{:<width$}", self.label(row), width = LABEL_WIDTH as usize - 2),
                label_style,
            ),
            Span::styled(self.value(row), value_style),
        ])
    }

    fn section(&self, title: &'static str) -> Line<'static> {
        Line::from(Span::styled(
            title,
            self.palette.muted().add_modifier(Modifier::BOLD),
        ))
    }
}

impl Component for SettingsPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 80, area);
        frame.render_widget(Clear, overlay);

        let t = self.app.t();
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.palette.accent())
            .title(format!(" {} ", t.settings))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" ↑↓ Select  ←→ Adjust  Enter Apply  Esc Back ").centered())
            .padding(Padding::horizontal(1))
            .style(self.palette.base());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let user = &self.app.user;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    user.name.clone(),
                    Style::default()
                        .fg(self.palette.text)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  @{}  {}", user.handle, user.email), self.palette.muted()),
            ]),
            Line::default(),
            self.section(t.edit_profile),
        ];

        // Line index of every row, for cursor placement
        let mut row_lines = Vec::with_capacity(SettingsRow::ALL.len());
        for row in SettingsRow::ALL {
            if row == SettingsRow::DarkMode {
                let error = match self.app.profile_error {
                    Some(e) => Line::from(Span::styled(e.message(t), self.palette.error())),
                    None => Line::default(),
                };
                lines.push(error);
                lines.push(self.section(t.appearance));
            }
            if row == SettingsRow::Logout {
                lines.push(Line::default());
            }
            row_lines.push(lines.len() as u16);
            lines.push(self.row_line(row));
        }

        let content = inner;
        frame.render_widget(Paragraph::new(lines), content);

        let row = self.state.row();
        if let Some(field) = self.state.text_field(row)
            && row.is_text()
        {
            let line = row_lines[self.state.selected.min(row_lines.len() - 1)];
            let x = content.x + LABEL_WIDTH + field.text()[..field.cursor()].width() as u16;
            let y = content.y + line;
            if x < content.x + content.width && y < content.y + content.height {
                frame.set_cursor_position((x, y));
            }
        }
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{Language, Theme};
    use crate::test_support::{alex, signed_in_app};
    use crate::tui::theme::LIGHT;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn panel() -> SettingsPanelState {
        SettingsPanelState::new(&alex(), &AppSettings::default())
    }

    fn select(state: &mut SettingsPanelState, row: SettingsRow) {
        state.selected = SettingsRow::ALL.iter().position(|r| *r == row).unwrap();
    }

    #[test]
    fn test_prefilled_from_profile() {
        let state = panel();
        assert_eq!(state.handle.text(), "alexj");
        assert_eq!(state.candidate(&alex()), alex());
    }

    #[test]
    fn test_edit_and_save_profile() {
        let mut state = panel();
        let settings = AppSettings::default();
        select(&mut state, SettingsRow::Handle);
        state.handle.set("@alex_new");
        let action = state.handle_event(&TuiEvent::Submit, &alex(), &settings);
        let Some(Action::SaveProfile(candidate)) = action else {
            panic!("expected SaveProfile, got {:?}", action);
        };
        assert_eq!(candidate.handle, "alex_new");
        assert_eq!(candidate.email, "alex@example.com");
    }

    #[test]
    fn test_space_types_in_text_rows() {
        let mut state = panel();
        let settings = AppSettings::default();
        select(&mut state, SettingsRow::Bio);
        state.bio.clear();
        state.handle_event(&TuiEvent::InputChar('a'), &alex(), &settings);
        state.handle_event(&TuiEvent::InputChar(' '), &alex(), &settings);
        state.handle_event(&TuiEvent::InputChar('b'), &alex(), &settings);
        assert_eq!(state.bio.text(), "a b");
    }

    #[test]
    fn test_appearance_rows_emit_patches() {
        let mut state = panel();
        let settings = AppSettings::default();

        select(&mut state, SettingsRow::DarkMode);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar(' '), &alex(), &settings),
            Some(Action::UpdateSettings(SettingsPatch {
                theme: Some(Theme::Dark),
                ..Default::default()
            }))
        );

        select(&mut state, SettingsRow::FontSize);
        assert_eq!(
            state.handle_event(&TuiEvent::CursorRight, &alex(), &settings),
            Some(Action::UpdateSettings(SettingsPatch {
                font_size: Some(settings.font_size + 1),
                ..Default::default()
            }))
        );

        select(&mut state, SettingsRow::Language);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &alex(), &settings),
            Some(Action::UpdateSettings(SettingsPatch {
                language: Some(Language::En),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_font_size_clamped_at_max() {
        let mut state = panel();
        let settings = AppSettings {
            font_size: FONT_SIZE_MAX,
            ..Default::default()
        };
        select(&mut state, SettingsRow::FontSize);
        assert_eq!(
            state.handle_event(&TuiEvent::CursorRight, &alex(), &settings),
            Some(Action::UpdateSettings(SettingsPatch {
                font_size: Some(FONT_SIZE_MAX),
                ..Default::default()
            }))
        );
    }

    #[test]
    fn test_navigation_and_logout() {
        let mut state = panel();
        let settings = AppSettings::default();
        for _ in 0..20 {
            state.handle_event(&TuiEvent::CursorDown, &alex(), &settings);
        }
        assert_eq!(state.row(), SettingsRow::Logout);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &alex(), &settings),
            Some(Action::Logout)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Escape, &alex(), &settings),
            Some(Action::CloseSettings)
        );
    }

    #[test]
    fn test_render_shows_profile_error() {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = signed_in_app();
        app.profile_error = Some(crate::core::profile::ProfileError::UsernameTaken);
        let state = SettingsPanelState::new(&app.user, &app.settings);

        terminal
            .draw(|f| SettingsPanel::new(&state, &app, &LIGHT).render(f, f.area()))
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Settings"));
        assert!(text.contains("This username is already taken"));
        assert!(text.contains("alexj"));
    }
}
