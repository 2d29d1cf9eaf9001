//! Color palettes for the light and dark themes.

use ratatui::style::{Color, Modifier, Style};

use crate::core::settings::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub own_bubble: Color,
    pub own_text: Color,
    pub other_bubble: Color,
    pub other_text: Color,
    pub online: Color,
    pub error: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

pub const LIGHT: Palette = Palette {
    background: Color::White,
    text: Color::Black,
    muted: Color::DarkGray,
    border: Color::Gray,
    accent: Color::Blue,
    own_bubble: Color::Blue,
    own_text: Color::White,
    other_bubble: Color::Gray,
    other_text: Color::Black,
    online: Color::Green,
    error: Color::Red,
    selection_bg: Color::Blue,
    selection_fg: Color::White,
};

pub const DARK: Palette = Palette {
    background: Color::Rgb(15, 23, 42),
    text: Color::White,
    muted: Color::Gray,
    border: Color::DarkGray,
    accent: Color::LightBlue,
    own_bubble: Color::Rgb(37, 99, 235),
    own_text: Color::White,
    other_bubble: Color::Rgb(30, 41, 59),
    other_text: Color::Rgb(241, 245, 249),
    online: Color::LightGreen,
    error: Color::LightRed,
    selection_bg: Color::Rgb(59, 130, 246),
    selection_fg: Color::White,
};

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}
