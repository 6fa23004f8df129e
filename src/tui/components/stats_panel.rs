//! # StatsPanel Component
//!
//! The read-outs beside the stack: current top, current size, and the
//! message from the last peek (only while it is still valid).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::state::PeekResult;
use crate::tui::component::Component;

/// Borders plus the top and size rows.
const BASE_HEIGHT: u16 = 4;

pub struct StatsPanel {
    pub top: Option<i64>,
    pub size: usize,
    pub peek: Option<PeekResult>,
}

impl StatsPanel {
    pub fn new(top: Option<i64>, size: usize, peek: Option<PeekResult>) -> Self {
        Self { top, size, peek }
    }

    /// Rows needed, including borders.
    pub fn required_height(&self) -> u16 {
        // blank spacer + the peek line
        BASE_HEIGHT + if self.peek.is_some() { 2 } else { 0 }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let value_style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
        let top = self
            .top
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Top of the Stack :-  "),
                Span::styled(top, value_style),
            ]),
            Line::from(vec![
                Span::raw("Size of the Stack :- "),
                Span::styled(self.size.to_string(), value_style),
            ]),
        ];

        if let Some(peek) = self.peek {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("Top element is {}", peek.value),
                Style::default().fg(Color::Yellow),
            )));
        }
        lines
    }
}

impl Component for StatsPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Stats ");
        frame.render_widget(Paragraph::new(self.lines()).block(block), area);
    }
}
