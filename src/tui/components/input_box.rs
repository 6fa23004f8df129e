//! # InputBox Component
//!
//! Single-line field for the value to push.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing and paste, newlines dropped)
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Submit` on Enter
//!
//! The buffer is *not* cleared on submit. The parent clears it once the core
//! accepts the push, so a rejected value stays in place to be corrected.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// One column of border on each side.
const BORDER_OFFSET: u16 = 1;
const PLACEHOLDER: &str = "Enter element";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn insert_str(&mut self, text: &str) -> Option<InputEvent> {
        let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
        if cleaned.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor, &cleaned);
        self.cursor += cleaned.len();
        Some(InputEvent::ContentChanged)
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Columns of text left of the cursor.
    fn cursor_column(&self) -> u16 {
        u16::try_from(self.buffer[..self.cursor].chars().count()).unwrap_or(u16::MAX)
    }
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(BORDER_OFFSET * 2);
        let column = self.cursor_column();
        // Scroll horizontally so the cursor stays inside the box
        let skip = column.saturating_sub(inner_width.saturating_sub(1));

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Push ");

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            let visible: String = self.buffer.chars().skip(skip as usize).collect();
            Paragraph::new(visible).style(Style::default().fg(Color::Green))
        };

        frame.render_widget(paragraph.block(block), area);
        frame.set_cursor_position((
            area.x + BORDER_OFFSET + (column - skip),
            area.y + BORDER_OFFSET,
        ));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert_str(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert_str(text),
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = self.prev_boundary();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = self.next_boundary();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            // Empty input is still submitted; the core reports it as invalid
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::InputChar('4')), Some(InputEvent::ContentChanged));
        assert_eq!(input.handle_event(&TuiEvent::InputChar('2')), Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "42");

        assert_eq!(input.handle_event(&TuiEvent::Backspace), Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "4");
    }

    #[test]
    fn test_submit_keeps_buffer() {
        let mut input = typed("-17");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("-17".to_string()))
        );
        assert_eq!(input.buffer, "-17");

        input.clear();
        assert!(input.buffer.is_empty());
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_empty_submit_is_forwarded() {
        let mut input = InputBox::new();
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit(String::new()))
        );
    }

    #[test]
    fn test_cursor_editing_mid_buffer() {
        let mut input = typed("125");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('0'));
        assert_eq!(input.buffer, "1205");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "205");

        input.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(input.handle_event(&TuiEvent::CursorRight), None);
        assert_eq!(input.handle_event(&TuiEvent::Delete), None);
    }

    #[test]
    fn test_paste_drops_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("12\n34\r\n".to_string()));
        assert_eq!(input.buffer, "1234");
    }

    #[test]
    fn test_multibyte_backspace() {
        let mut input = typed("1é");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "1");
    }

    #[test]
    fn test_huge_paste_saturates_cursor_column() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("7".repeat(70_000)));
        assert_eq!(input.cursor_column(), u16::MAX);

        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("7777"));
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new();

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Enter element"));
        assert!(text.contains("Push"));
    }

    #[test]
    fn test_render_shows_buffer() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = typed("9001");

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("9001"));
        assert!(!text.contains("Enter element"));
    }
}
