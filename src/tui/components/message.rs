use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::chats::{self, DeliveryStatus, Message};
use crate::core::settings::{FONT_SIZE_MAX, FONT_SIZE_MIN};
use crate::tui::theme::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Borders (2) plus the timestamp footer line.
const VERTICAL_OVERHEAD: u16 = 3;

const MIN_BUBBLE_PERCENT: u16 = 50;
const MAX_BUBBLE_PERCENT: u16 = 90;

/// Bubble width cap as a share of the pane: 50% at the smallest font, 90% at the largest.
pub fn bubble_width_percent(font_size: u8) -> u16 {
    let size = font_size.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
    let steps = u16::from(size - FONT_SIZE_MIN);
    let range = u16::from(FONT_SIZE_MAX - FONT_SIZE_MIN);
    MIN_BUBBLE_PERCENT + steps * (MAX_BUBBLE_PERCENT - MIN_BUBBLE_PERCENT) / range
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// A stateless component that renders a single message as a chat bubble.
///
/// Own messages sit on the right in the accent color with delivery ticks;
/// everyone else's sit on the left. `max_width` comes from the pane width and
/// the font size setting.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
    pub palette: &'a Palette,
    pub max_width: u16,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message, palette: &'a Palette, max_width: u16) -> Self {
        Self {
            message,
            palette,
            max_width,
        }
    }

    /// "HH:MM", plus "(edited)" and delivery ticks where they apply.
    fn footer(message: &Message) -> String {
        let mut footer = chats::format_time(message.timestamp);
        if message.is_edited {
            footer.push_str(" (edited)");
        }
        if message.is_own() {
            footer.push(' ');
            footer.push_str(match message.status {
                DeliveryStatus::Sent => "✓",
                DeliveryStatus::Delivered | DeliveryStatus::Read => "✓✓",
            });
        }
        footer
    }

    /// Outer (width, height) of the bubble, predicted with `textwrap` so the
    /// conversation can lay out its scroll view before rendering.
    pub fn measure(message: &Message, max_width: u16) -> (u16, u16) {
        let content_max = max_width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_max == 0 {
            // Degenerate case: pane too narrow for borders + padding.
            return (max_width, VERTICAL_OVERHEAD);
        }

        let lines = textwrap::wrap(&message.text, wrap_options(content_max));
        let longest = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let footer = Self::footer(message).width() as u16;

        let width = longest.max(footer).min(content_max) + HORIZONTAL_OVERHEAD;
        let height = (lines.len() as u16).max(1) + VERTICAL_OVERHEAD;
        (width, height)
    }
}

impl Widget for MessageBubble<'_> {
    /// `area` is the full row; the bubble aligns itself inside it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = Self::measure(self.message, self.max_width.min(area.width));
        let width = width.min(area.width);
        let own = self.message.is_own();
        let x = if own {
            area.x + area.width.saturating_sub(width)
        } else {
            area.x
        };
        let bubble = Rect::new(x, area.y, width, height.min(area.height));

        let (bg, fg) = if own {
            (self.palette.own_bubble, self.palette.own_text)
        } else {
            (self.palette.other_bubble, self.palette.other_text)
        };
        let style = Style::default().fg(fg).bg(bg);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble);
        block.render(bubble, buf);

        let footer = Line::from(Span::styled(
            Self::footer(self.message),
            style.add_modifier(Modifier::DIM),
        ))
        .right_aligned();

        let text_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let footer_area = Rect {
            y: inner.y + text_area.height,
            height: inner.height.min(1),
            ..inner
        };

        Paragraph::new(self.message.text.as_str())
            .style(style)
            .wrap(Wrap { trim: false })
            .render(text_area, buf);
        Paragraph::new(footer).render(footer_area, buf);
    }
}
