//! Vertical pile of boxes, top of the stack first.
//!
//! ```text
//!       ┌──────┐
//! top → │  50  │
//!       └──────┘
//!       ┌──────┐
//!       │  30  │
//!       └──────┘
//! ```

use ratatui::text::{Line, Span};

use crate::core::sequencer::AnimationPhase;

use super::{TOP_POINTER, cell_width, centered, element_style, gutter};

pub fn lines(elements: &[i64], phase: AnimationPhase) -> Vec<Line<'static>> {
    let width = cell_width(elements);
    let pad = gutter(TOP_POINTER.chars().count());
    let top_index = elements.len().saturating_sub(1);
    let mut lines = Vec::with_capacity(elements.len() * 3);

    for (index, value) in elements.iter().enumerate().rev() {
        let style = element_style(index, phase);
        let label = if index == top_index {
            TOP_POINTER.to_string()
        } else {
            pad.clone()
        };
        lines.push(Line::from(vec![
            Span::raw(pad.clone()),
            Span::styled(format!("┌{}┐", "─".repeat(width)), style),
        ]));
        lines.push(Line::from(vec![
            Span::raw(label),
            Span::styled(format!("│{}│", centered(&value.to_string(), width)), style),
        ]));
        lines.push(Line::from(vec![
            Span::raw(pad.clone()),
            Span::styled(format!("└{}┘", "─".repeat(width)), style),
        ]));
    }
    lines
}
