use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Palette;

/// Empty state shown in the conversation pane when no chat is open.
pub struct Placeholder<'a> {
    pub message: &'a str,
    pub palette: &'a Palette,
}

impl Component for Placeholder<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);

        let lines = vec![
            Line::from(Span::styled("✉", self.palette.accent())),
            Line::default(),
            Line::from(Span::styled(self.message.to_string(), self.palette.muted())),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), center);
    }
}
