//! Singly linked list from the top node down, terminated by NULL.
//!
//! ```text
//! top → ┌──────┐
//!       │  50  │
//!       └──────┘
//!          ↓
//!       ┌──────┐
//!       │ NULL │
//!       └──────┘
//! ```

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::sequencer::AnimationPhase;

use super::{TOP_POINTER, cell_width, centered, element_style, gutter};

fn node(label: &str, text: &str, width: usize, style: Style, pad: &str) -> [Line<'static>; 3] {
    [
        Line::from(vec![
            Span::raw(label.to_string()),
            Span::styled(format!("┌{}┐", "─".repeat(width)), style),
        ]),
        Line::from(vec![
            Span::raw(pad.to_string()),
            Span::styled(format!("│{}│", centered(text, width)), style),
        ]),
        Line::from(vec![
            Span::raw(pad.to_string()),
            Span::styled(format!("└{}┘", "─".repeat(width)), style),
        ]),
    ]
}

pub fn lines(elements: &[i64], phase: AnimationPhase) -> Vec<Line<'static>> {
    let width = cell_width(elements);
    let pad = gutter(TOP_POINTER.chars().count());
    let arrow = Line::from(format!("{}{}", pad, centered("↓", width + 2)));
    let mut lines = Vec::with_capacity((elements.len() + 1) * 4);

    for (position, (index, value)) in elements.iter().enumerate().rev().enumerate() {
        let label = if position == 0 { TOP_POINTER } else { pad.as_str() };
        lines.extend(node(
            label,
            &value.to_string(),
            width,
            element_style(index, phase),
            &pad,
        ));
        lines.push(arrow.clone());
    }

    let null_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    lines.extend(node(&pad, "NULL", width, null_style, &pad));
    lines
}

#[cfg(test)]
mod tests {
    use super::super::test_util::plain;
    use super::*;

    #[test]
    fn test_nodes_from_top_to_null() {
        let text = plain(&lines(&[15, 50], AnimationPhase::Idle));
        assert_eq!(
            text,
            vec![
                "top → ┌──────┐",
                "      │  50  │",
                "      └──────┘",
                "         ↓    ",
                "      ┌──────┐",
                "      │  15  │",
                "      └──────┘",
                "         ↓    ",
                "      ┌──────┐",
                "      │ NULL │",
                "      └──────┘",
            ]
        );
    }
}
