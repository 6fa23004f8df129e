//! # StackView Component
//!
//! The main pane. Draws the elements in the selected [`Representation`]
//! and marks the element the sequencer is animating:
//!
//! - **entering** (just pushed): green, bold
//! - **exiting** (about to be popped): red, dimmed, crossed out
//!
//! Each representation is a pure function from elements + phase to text
//! lines, so they can be tested without a terminal. The lines are laid out
//! in a `ScrollView`: stacks grow without limit, so both axes scroll.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `StackViewState` lives in `TuiState`
//! - `StackView` is created each frame with borrowed state

mod array;
mod linked_list;
mod vertical;

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::Representation;
use crate::core::sequencer::AnimationPhase;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Text padding on either side of a value inside its box.
const CELL_PADDING: usize = 2;
/// Narrowest cell, wide enough for `NULL`.
const MIN_CELL_CONTENT: usize = 4;

pub const TOP_POINTER: &str = "top → ";
pub const EMPTY_TEXT: &str = "Stack is empty";

/// Inner width of every box for this set of elements.
fn cell_width(elements: &[i64]) -> usize {
    elements
        .iter()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(0)
        .max(MIN_CELL_CONTENT)
        + CELL_PADDING
}

fn centered(text: &str, width: usize) -> String {
    format!("{:^width$}", text, width = width)
}

fn saturating_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn gutter(width: usize) -> String {
    " ".repeat(width)
}

fn element_style(index: usize, phase: AnimationPhase) -> Style {
    if phase.entering_index() == Some(index) {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if phase.exiting_index() == Some(index) {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    } else {
        Style::default()
    }
}

/// Build the lines for `representation`. Empty stacks yield no lines.
pub fn build_lines(
    representation: Representation,
    elements: &[i64],
    phase: AnimationPhase,
) -> Vec<Line<'static>> {
    if elements.is_empty() {
        return Vec::new();
    }
    match representation {
        Representation::Stack => vertical::lines(elements, phase),
        Representation::Array => array::lines(elements, phase),
        Representation::LinkedList => linked_list::lines(elements, phase),
    }
}

/// Scroll state and the sizes measured on the last render.
pub struct StackViewState {
    pub scroll_state: ScrollViewState,
    pub content: Size,
    pub viewport: Size,
    /// Scroll to the top of this representation once the next render has
    /// measured the content.
    pending_follow: Option<Representation>,
}

impl Default for StackViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl StackViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            content: Size::new(0, 0),
            viewport: Size::new(0, 0),
            pending_follow: None,
        }
    }

    /// Clamp the offset to the content measured on the last render.
    pub fn clamp_scroll(&mut self) {
        let max_x = self.content.width.saturating_sub(self.viewport.width);
        let max_y = self.content.height.saturating_sub(self.viewport.height);
        let current = self.scroll_state.offset();
        if current.x > max_x || current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x.min(max_x),
                y: current.y.min(max_y),
            });
        }
    }

    /// Bring the top of the stack into view on the next render. The top is
    /// drawn first in the vertical representations and last in the array.
    pub fn follow_top(&mut self, representation: Representation) {
        self.pending_follow = Some(representation);
    }

    fn apply_follow(&mut self) {
        let Some(representation) = self.pending_follow.take() else {
            return;
        };
        let offset = match representation {
            Representation::Array => Position {
                x: self.content.width.saturating_sub(self.viewport.width),
                y: 0,
            },
            Representation::Stack | Representation::LinkedList => Position { x: 0, y: 0 },
        };
        self.scroll_state.set_offset(offset);
    }
}

impl EventHandler for StackViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

pub struct StackView<'a> {
    pub elements: &'a [i64],
    pub phase: AnimationPhase,
    pub representation: Representation,
    pub state: &'a mut StackViewState,
}

impl<'a> StackView<'a> {
    pub fn new(
        elements: &'a [i64],
        phase: AnimationPhase,
        representation: Representation,
        state: &'a mut StackViewState,
    ) -> Self {
        Self {
            elements,
            phase,
            representation,
            state,
        }
    }
}

impl Component for StackView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Thick)
            .title(format!(" Stack ({}) ", self.representation.label()))
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = build_lines(self.representation, self.elements, self.phase);
        if lines.is_empty() {
            let middle = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1.min(inner.height));
            let empty = Paragraph::new(EMPTY_TEXT)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, middle);
            self.state.content = Size::new(0, 0);
            self.state.viewport = inner.as_size();
            self.state.apply_follow();
            return;
        }

        let content_width = saturating_u16(lines.iter().map(|l| l.width()).max().unwrap_or(0));
        let content_height = saturating_u16(lines.len());

        // Centre the drawing when it fits; otherwise it starts at the origin and scrolls
        let canvas = Size::new(
            content_width.max(inner.width.saturating_sub(1)),
            content_height.max(inner.height.saturating_sub(1)),
        );
        let x = (canvas.width - content_width) / 2;
        let y = (canvas.height - content_height) / 2;

        self.state.content = canvas;
        self.state.viewport = inner.as_size();
        self.state.apply_follow();
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(canvas)
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Automatic);
        scroll_view.render_widget(
            Paragraph::new(lines),
            Rect::new(x, y, content_width, content_height),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
