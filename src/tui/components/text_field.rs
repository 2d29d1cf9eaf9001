//! # TextField Component
//!
//! Editable text buffer with a byte-offset cursor. Used for every form field
//! (email, password, code, profile fields, search) and, in multiline mode, as
//! the buffer behind the message composer.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TextField` lives in the owning form's state
//! - `FieldView` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

const MASK_CHAR: char = '•';

/// High-level events emitted by a TextField
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Changed,
    Submit,
}

#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub buffer: String,
    /// Byte offset in `buffer` (always on a char boundary)
    cursor: usize,
    /// Render as bullets (passwords)
    pub masked: bool,
    /// Drop anything that isn't an ASCII digit
    pub digits_only: bool,
    /// Maximum number of chars accepted
    pub max_chars: Option<usize>,
    /// Accept newlines (composer)
    pub multiline: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    /// Numeric field capped at `max_chars` digits.
    pub fn digits(max_chars: usize) -> Self {
        Self {
            digits_only: true,
            max_chars: Some(max_chars),
            ..Self::default()
        }
    }

    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.set(text);
        self
    }

    pub fn set(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Take the buffer, leaving the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// What the user sees: bullets for masked fields.
    pub fn display_text(&self) -> String {
        if self.masked {
            MASK_CHAR.to_string().repeat(self.buffer.chars().count())
        } else {
            self.buffer.clone()
        }
    }

    /// Display columns before the cursor on its line.
    pub fn cursor_column(&self) -> u16 {
        let before = &self.buffer[..self.cursor];
        let line = before.rsplit('\n').next().unwrap_or("");
        if self.masked {
            line.chars().count() as u16
        } else {
            line.width() as u16
        }
    }

    fn accepts(&self, c: char) -> bool {
        if c == '\n' {
            return self.multiline;
        }
        if c.is_control() {
            return false;
        }
        if self.digits_only && !c.is_ascii_digit() {
            return false;
        }
        self.max_chars
            .is_none_or(|max| self.buffer.chars().count() < max)
    }

    fn insert(&mut self, c: char) -> bool {
        if !self.accepts(c) {
            return false;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(*c).then_some(FieldEvent::Changed),
            TuiEvent::Newline => self.insert('\n').then_some(FieldEvent::Changed),
            TuiEvent::Paste(text) => {
                let mut changed = false;
                for c in text.chars() {
                    // Single-line fields flatten pasted newlines into spaces
                    let c = if c == '\n' && !self.multiline { ' ' } else { c };
                    changed |= self.insert(c);
                }
                changed.then_some(FieldEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(FieldEvent::Changed)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(FieldEvent::Changed)
            }
            TuiEvent::CursorLeft => {
                (self.cursor > 0).then(|| {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                FieldEvent::Changed
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    FieldEvent::Changed
                })
            }
            TuiEvent::Submit => Some(FieldEvent::Submit),
            _ => None,
        }
    }
}

/// Transient render wrapper: a bordered, titled single-line field.
pub struct FieldView<'a> {
    pub field: &'a TextField,
    pub title: &'a str,
    pub placeholder: &'a str,
    pub focused: bool,
    pub has_error: bool,
    pub palette: &'a Palette,
}

impl Component for FieldView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.has_error {
            self.palette.error()
        } else if self.focused {
            self.palette.accent()
        } else {
            Style::default().fg(self.palette.border)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title)
            .title_style(border_style);

        let (text, style) = if self.field.buffer.is_empty() && !self.focused {
            (self.placeholder.to_string(), self.palette.muted())
        } else {
            (self.field.display_text(), Style::default().fg(self.palette.text))
        };

        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(text).style(style).block(block), area);

        if self.focused && inner.width > 0 && inner.height > 0 {
            let x = inner.x + self.field.cursor_column().min(inner.width - 1);
            frame.set_cursor_position((x, inner.y));
        }
    }
}
