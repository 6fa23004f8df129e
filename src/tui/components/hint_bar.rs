//! # HintBar Component
//!
//! Bottom line. Shows the current notice when there is one, otherwise the
//! key bindings.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::{Notice, NoticeLevel};
use crate::tui::component::Component;

const KEY_HINTS: &[(&str, &str)] = &[
    ("Enter", "Push"),
    ("^P", "Pop"),
    ("^T", "Peek"),
    ("^R", "Reset"),
    ("Tab", "View"),
    ("Esc", "Quit"),
];

pub struct HintBar<'a> {
    pub notice: Option<&'a Notice>,
}

impl<'a> HintBar<'a> {
    pub fn new(notice: Option<&'a Notice>) -> Self {
        Self { notice }
    }
}

fn notice_style(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Success => Style::default().fg(Color::Green),
        NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        NoticeLevel::Info => Style::default().fg(Color::Yellow),
    }
}

fn hints_line() -> Line<'static> {
    let mut spans = Vec::with_capacity(KEY_HINTS.len() * 2);
    for (key, label) in KEY_HINTS {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::styled(
            format!(" {}  ", label),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

impl Component for HintBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = match self.notice {
            Some(notice) => Line::from(Span::styled(
                notice.text.clone(),
                notice_style(notice.level),
            )),
            None => hints_line(),
        };
        frame.render_widget(line, area);
    }
}
