//! # Composer Component
//!
//! Multi-line message input at the bottom of the conversation view.
//!
//! ## Responsibilities
//!
//! - Capture text input (Enter sends, Shift+Enter / Ctrl+J inserts a newline)
//! - Grow with its content up to `MAX_VISIBLE_LINES`, then scroll internally
//! - Show the localized placeholder while empty
//!
//! The buffer is internal state; the placeholder and palette are props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Border (2) + padding (2) consumed horizontally by the bordered block
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
const MAX_VISIBLE_LINES: u16 = 5;

/// High-level events emitted by the Composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerEvent {
    /// User pressed Enter with non-blank text
    Send(String),
    ContentChanged,
}

pub struct Composer {
    pub field: TextField,
    /// Placeholder text (Prop)
    pub placeholder: String,
    /// Colors (Prop)
    pub palette: Palette,
    /// Whether keyboard focus is here (Prop)
    pub focused: bool,
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wrapped lines of `text`, keeping the empty line a trailing newline starts.
fn wrapped_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }
    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

impl Composer {
    pub fn new(placeholder: String, palette: Palette) -> Self {
        Self {
            field: TextField::multiline(),
            placeholder,
            palette,
            focused: false,
        }
    }

    /// Required height for the current buffer, clamped to the viewport limit.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let width = content_width.saturating_sub(HORIZONTAL_OVERHEAD);
        let lines = wrapped_lines(self.field.text(), width).len() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Cursor row/column within the wrapped text.
    fn cursor_position(&self, width: u16) -> (u16, u16) {
        let before = &self.field.text()[..self.field.cursor()];
        let lines = wrapped_lines(before, width);
        let row = lines.len().saturating_sub(1) as u16;
        let col = lines.last().map(|l| l.width() as u16).unwrap_or(0);
        (row, col)
    }
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            self.palette.accent()
        } else {
            Style::default().fg(self.palette.border)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(ratatui::widgets::Padding::horizontal(1));
        let inner = block.inner(area);

        if self.field.text().is_empty() {
            let placeholder = Paragraph::new(self.placeholder.as_str())
                .style(self.palette.muted())
                .block(block);
            frame.render_widget(placeholder, area);
            if self.focused && inner.width > 0 && inner.height > 0 {
                frame.set_cursor_position((inner.x, inner.y));
            }
            return;
        }

        let lines = wrapped_lines(self.field.text(), inner.width);
        let (row, col) = self.cursor_position(inner.width);
        // Keep the cursor row inside the visible window
        let visible = inner.height.max(1);
        let scroll = row.saturating_sub(visible - 1);
        let start = scroll as usize;
        let end = (start + visible as usize).min(lines.len());

        let paragraph = Paragraph::new(lines[start..end].join("\n"))
            .style(Style::default().fg(self.palette.text))
            .block(block);
        frame.render_widget(paragraph, area);

        if self.focused && inner.width > 0 {
            let x = inner.x + col.min(inner.width - 1);
            let y = inner.y + (row - scroll);
            frame.set_cursor_position((x, y));
        }
    }
}

impl EventHandler for Composer {
    type Event = ComposerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match self.field.handle_event(event)? {
            FieldEvent::Submit => {
                if self.field.text().trim().is_empty() {
                    return None;
                }
                Some(ComposerEvent::Send(self.field.take()))
            }
            FieldEvent::Changed => Some(ComposerEvent::ContentChanged),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::LIGHT;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn composer() -> Composer {
        Composer::new("Write a message".to_string(), LIGHT)
    }

    #[test]
    fn test_send_clears_buffer() {
        let mut c = composer();
        c.field.set("hello");
        assert_eq!(
            c.handle_event(&TuiEvent::Submit),
            Some(ComposerEvent::Send("hello".to_string()))
        );
        assert!(c.field.text().is_empty());
    }

    #[test]
    fn test_blank_submit_ignored() {
        let mut c = composer();
        c.field.set("   ");
        assert_eq!(c.handle_event(&TuiEvent::Submit), None);
        assert_eq!(c.field.text(), "   ");
    }

    #[test]
    fn test_height_grows_and_caps() {
        let mut c = composer();
        assert_eq!(c.calculate_height(40), 3);
        c.field.set("a\nb\nc");
        assert_eq!(c.calculate_height(40), 5);
        c.field.set("1\n2\n3\n4\n5\n6\n7\n8");
        assert_eq!(c.calculate_height(40), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn test_trailing_newline_adds_line() {
        assert_eq!(wrapped_lines("abc\n", 20).len(), 2);
        assert_eq!(wrapped_lines("", 20).len(), 1);
    }

    #[test]
    fn test_render_shows_placeholder() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut c = composer();

        terminal.draw(|f| c.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(text.contains("Write a message"));
    }
}
