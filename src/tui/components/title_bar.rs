//! # TitleBar Component
//!
//! Top status bar: app name, signed-in user, unread total and status messages.
//!
//! ## Conditional Formatting
//!
//! 1. **Signed in, notifications on**: `"Luminary · Alex Johnson (@alexj) · 50 unread | Profile saved"`
//! 2. **Notifications off**: the unread segment is dropped
//! 3. **Signed out**: `"Luminary"` plus the status message, if any
//!
//! TitleBar is purely presentational. Every field is a prop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct TitleBar<'a> {
    /// "Name (@handle)", empty while signed out
    pub user_label: String,
    /// Total unread count; `None` hides it (notifications off)
    pub unread: Option<u32>,
    /// Localized "unread" label
    pub unread_label: &'a str,
    pub status_message: &'a str,
    pub palette: &'a Palette,
}

impl TitleBar<'_> {
    pub fn text(&self) -> String {
        let mut title = String::from("Luminary");
        if !self.user_label.is_empty() {
            title.push_str(" · ");
            title.push_str(&self.user_label);
        }
        if let Some(count) = self.unread.filter(|c| *c > 0) {
            title.push_str(&format!(" · {} {}", count, self.unread_label));
        }
        if !self.status_message.is_empty() {
            title.push_str(" | ");
            title.push_str(self.status_message);
        }
        title
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default()
            .fg(self.palette.selection_fg)
            .bg(self.palette.accent);
        frame.render_widget(Line::from(Span::raw(self.text())).style(style), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::LIGHT;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn bar<'a>(unread: Option<u32>, status: &'a str) -> TitleBar<'a> {
        TitleBar {
            user_label: "Alex Johnson (@alexj)".to_string(),
            unread,
            unread_label: "unread",
            status_message: status,
            palette: &LIGHT,
        }
    }

    #[test]
    fn test_title_with_unread_and_status() {
        assert_eq!(
            bar(Some(50), "Profile saved").text(),
            "Luminary · Alex Johnson (@alexj) · 50 unread | Profile saved"
        );
    }

    #[test]
    fn test_unread_hidden_when_disabled_or_zero() {
        assert!(!bar(None, "").text().contains("unread"));
        assert!(!bar(Some(0), "").text().contains("unread"));
        assert!(!bar(None, "").text().contains('|'));
    }

    #[test]
    fn test_signed_out_title() {
        let mut title_bar = bar(None, "");
        title_bar.user_label.clear();
        assert_eq!(title_bar.text(), "Luminary");
    }

    #[test]
    fn test_render_to_buffer() {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut title_bar = bar(Some(3), "");

        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Luminary"));
        assert!(text.contains("3 unread"));
    }
}
