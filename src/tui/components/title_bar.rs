//! # TitleBar Component
//!
//! Top line: application name, the active representation, and whether an
//! operation is animating.
//!
//! Stateless. All three props come from different places:
//! - `representation`: TUI state (the view selector)
//! - `animating`: core App state (sequencer phase)
//! - `queued`: core App state (requests waiting under the queue policy)

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::Representation;
use crate::tui::component::Component;

pub struct TitleBar {
    pub representation: Representation,
    pub animating: bool,
    pub queued: usize,
}

impl TitleBar {
    pub fn new(representation: Representation, animating: bool, queued: usize) -> Self {
        Self {
            representation,
            animating,
            queued,
        }
    }

    fn status(&self) -> Option<String> {
        match (self.animating, self.queued) {
            (false, _) => None,
            (true, 0) => Some("animating".to_string()),
            (true, n) => Some(format!("animating, {} queued", n)),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "Stack Visualizer",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" | View: {}", self.representation.label())),
        ];
        if let Some(status) = self.status() {
            spans.push(Span::styled(
                format!(" | {}", status),
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
