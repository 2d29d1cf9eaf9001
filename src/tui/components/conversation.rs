//! # Conversation Component
//!
//! Header for the open chat plus its messages as bubbles in a scroll view.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ConversationState` lives in `TuiState` (scroll offset, stick-to-bottom)
//! - `Conversation` is created each frame with the chat and its history
//!
//! Starts attached to the bottom; scrolling up detaches, scrolling back down
//! to the end re-attaches.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::chats::{Chat, ChatKind, Message};
use crate::core::i18n::Translations;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{MessageBubble, bubble_width_percent};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Blank rows between bubbles
const BUBBLE_GAP: u16 = 1;
const HEADER_HEIGHT: u16 = 3;

pub struct ConversationState {
    pub scroll_state: ScrollViewState,
    /// When true, new messages keep the view pinned to the bottom
    pub stick_to_bottom: bool,
    /// Content height from the last frame
    pub content_height: u16,
    /// Viewport height from the last frame
    pub viewport_height: u16,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            content_height: 0,
            viewport_height: 0,
        }
    }

    /// Back to the bottom, e.g. after opening another chat or sending.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
    }

    fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        if self.scroll_state.offset().y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: 0, y: max_y });
        }
    }
}

impl EventHandler for ConversationState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the open chat.
pub struct Conversation<'a> {
    pub state: &'a mut ConversationState,
    pub chat: &'a Chat,
    pub messages: &'a [Message],
    pub font_size: u8,
    pub t: &'static Translations,
    pub palette: &'a Palette,
}

impl Conversation<'_> {
    fn header(&self) -> Paragraph<'static> {
        let status = match (self.chat.kind, self.chat.is_online) {
            (ChatKind::Private, Some(true)) => {
                Span::styled(self.t.online, Style::default().fg(self.palette.online))
            }
            (ChatKind::Private, _) => Span::styled(self.t.offline, self.palette.muted()),
            _ => Span::styled(
                self.chat
                    .handle
                    .as_ref()
                    .map(|h| format!("@{}", h))
                    .unwrap_or_default(),
                self.palette.muted(),
            ),
        };
        Paragraph::new(vec![
            Line::from(Span::styled(
                self.chat.name.clone(),
                Style::default()
                    .fg(self.palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(status),
        ])
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(self.palette.border)),
        )
    }

    /// Max bubble width for a pane of `content_width` columns.
    pub fn bubble_max_width(content_width: u16, font_size: u8) -> u16 {
        (u32::from(content_width) * u32::from(bubble_width_percent(font_size)) / 100) as u16
    }
}

impl Component for Conversation<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(area);
        frame.render_widget(self.header().style(self.palette.base()), header_area);

        if self.messages.is_empty() {
            let empty = Paragraph::new(self.t.no_messages)
                .style(self.palette.muted())
                .centered();
            frame.render_widget(empty, body_area);
            return;
        }

        // Leave one column for the scrollbar
        let content_width = body_area.width.saturating_sub(1);
        let max_width = Self::bubble_max_width(content_width, self.font_size);

        let heights: Vec<u16> = self
            .messages
            .iter()
            .map(|m| MessageBubble::measure(m, max_width).1)
            .collect();
        let total_height: u16 = heights.iter().map(|h| h + BUBBLE_GAP).sum();

        self.state.content_height = total_height;
        self.state.viewport_height = body_area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y: u16 = 0;
        for (message, height) in self.messages.iter().zip(&heights) {
            let row = Rect::new(0, y, content_width, *height);
            scroll_view.render_widget(MessageBubble::new(message, self.palette, max_width), row);
            y += height + BUBBLE_GAP;
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, body_area, &mut self.state.scroll_state);
    }
}
