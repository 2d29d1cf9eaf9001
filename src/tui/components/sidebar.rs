//! # Sidebar Component
//!
//! Search box plus the filtered chat list.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` (search buffer, highlighted row)
//! - `Sidebar` is created each frame with the filtered chats as props
//!
//! The highlighted row is an index into the *visible* list. The chat it points
//! at is remembered by id so the highlight follows that chat when pinning
//! reorders the list or the filter changes.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::chats::{self, Chat, ChatKind};
use crate::core::i18n::Translations;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, FieldView, TextField};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Events emitted by the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
    Open(String),
    TogglePin(String),
    QueryChanged(String),
    /// Enter/Esc in the search box
    LeaveSearch,
}

#[derive(Default)]
pub struct SidebarState {
    pub search: TextField,
    pub selected: usize,
    pub list_state: ListState,
    /// Id of the chat under the highlight
    highlighted: Option<String>,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the highlight inside a list of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
        self.list_state
            .select(if len == 0 { None } else { Some(self.selected) });
    }

    /// Move the highlight back onto the remembered chat after the visible list
    /// changed. Falls back to the top row when that chat is no longer shown.
    pub fn follow(&mut self, visible: &[&Chat]) {
        if let Some(id) = &self.highlighted {
            self.selected = visible.iter().position(|c| &c.id == id).unwrap_or(0);
        }
        self.remember(visible);
    }

    fn remember(&mut self, visible: &[&Chat]) {
        self.clamp(visible.len());
        self.highlighted = visible.get(self.selected).map(|c| c.id.clone());
    }

    /// Keys while the chat list has focus. `visible` is the filtered list.
    pub fn handle_list_event(&mut self, event: &TuiEvent, visible: &[&Chat]) -> Option<SidebarEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.remember(visible);
                None
            }
            TuiEvent::CursorDown => {
                self.selected += 1;
                self.remember(visible);
                None
            }
            TuiEvent::Submit => visible
                .get(self.selected)
                .map(|chat| SidebarEvent::Open(chat.id.clone())),
            TuiEvent::TogglePin => visible
                .get(self.selected)
                .map(|chat| SidebarEvent::TogglePin(chat.id.clone())),
            _ => None,
        }
    }

    /// Keys while the search box has focus.
    pub fn handle_search_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        match event {
            TuiEvent::Escape => Some(SidebarEvent::LeaveSearch),
            _ => match self.search.handle_event(event)? {
                FieldEvent::Submit => Some(SidebarEvent::LeaveSearch),
                FieldEvent::Changed => {
                    Some(SidebarEvent::QueryChanged(self.search.text().to_string()))
                }
            },
        }
    }
}

/// Cut `text` to at most `max` display columns, ending in "…" when shortened.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    pub state: &'a mut SidebarState,
    pub chats: &'a [&'a Chat],
    pub active_chat_id: Option<&'a str>,
    pub t: &'static Translations,
    pub palette: &'a Palette,
    pub search_focused: bool,
    pub list_focused: bool,
}

impl Sidebar<'_> {
    /// Two-line row: name + time, then preview + unread badge.
    fn row(&self, chat: &Chat, width: usize, highlighted: bool) -> ListItem<'static> {
        let palette = self.palette;
        let base = if highlighted {
            palette.selected()
        } else {
            Style::default().fg(palette.text)
        };
        let muted = if highlighted { base } else { palette.muted() };

        let pin = if chat.is_pinned { "📌 " } else { "" };
        let icon = match chat.kind {
            ChatKind::Private => "",
            ChatKind::Group => "👥 ",
            ChatKind::Channel => "📢 ",
        };
        let time = chat
            .last_message
            .as_ref()
            .map(|m| chats::format_time(m.timestamp))
            .unwrap_or_default();
        let head = format!("{}{}", pin, icon);
        let name_width = width.saturating_sub(head.width() + time.width() + 1);
        let name = truncate_to_width(&chat.name, name_width);
        let gap = width.saturating_sub(head.width() + name.width() + time.width());
        let first = Line::from(vec![
            Span::styled(head, base),
            Span::styled(name, base.add_modifier(Modifier::BOLD)),
            Span::styled(" ".repeat(gap), base),
            Span::styled(time, muted),
        ]);

        let dot = match chat.is_online {
            Some(true) => Span::styled(
                "● ",
                if highlighted {
                    base
                } else {
                    Style::default().fg(palette.online)
                },
            ),
            _ => Span::styled("", base),
        };
        let show_badge = chat.unread_count > 0 && self.active_chat_id != Some(chat.id.as_str());
        let badge = if show_badge {
            format!(" {} ", chat.unread_count)
        } else {
            String::new()
        };
        let (preview, preview_style) = match &chat.last_message {
            Some(message) => (
                message.text.lines().next().unwrap_or("").to_string(),
                muted,
            ),
            None => (
                self.t.no_messages.to_string(),
                muted.add_modifier(Modifier::ITALIC),
            ),
        };
        let preview_width = width.saturating_sub(dot.width() + badge.width() + 1);
        let preview = truncate_to_width(&preview, preview_width);
        let gap = width.saturating_sub(dot.width() + preview.width() + badge.width());
        let second = Line::from(vec![
            dot,
            Span::styled(preview, preview_style),
            Span::styled(" ".repeat(gap), base),
            Span::styled(
                badge,
                Style::default()
                    .fg(palette.selection_fg)
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        ListItem::new(vec![first, second, Line::default()]).style(base)
    }
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(self.palette.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(inner);

        let title = format!("{} (Ctrl+F)", self.t.search);
        FieldView {
            field: &self.state.search,
            title: &title,
            placeholder: self.t.search,
            focused: self.search_focused,
            has_error: false,
            palette: self.palette,
        }
        .render(frame, search_area);

        self.state.clamp(self.chats.len());
        if self.chats.is_empty() {
            let empty = Paragraph::new(format!("{}...", self.t.global_search))
                .style(self.palette.muted())
                .centered();
            frame.render_widget(empty, list_area);
            return;
        }

        let width = list_area.width.saturating_sub(1) as usize;
        let items: Vec<ListItem> = self
            .chats
            .iter()
            .enumerate()
            .map(|(i, chat)| {
                let highlighted = self.list_focused && i == self.state.selected;
                let active = self.active_chat_id == Some(chat.id.as_str());
                self.row(chat, width, highlighted || (active && !self.list_focused))
            })
            .collect();

        frame.render_stateful_widget(List::new(items), list_area, &mut self.state.list_state);
    }
}
