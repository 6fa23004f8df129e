//! Fixed array of cells, bottom at index 0, with the top index boxed above.
//!
//! ```text
//! top ┌───┐
//!     │ 3 │
//!     └───┘
//!
//! ┌──────┬──────┬──────┬──────┐
//! │  15  │  25  │  30  │  50  │
//! └──────┴──────┴──────┴──────┘
//!    0      1      2      3
//! ```

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::sequencer::AnimationPhase;

use super::{cell_width, centered, element_style};

const TOP_LABEL: &str = "top ";

fn border(left: &str, joint: &str, right: &str, cells: usize, width: usize) -> String {
    let segment = "─".repeat(width);
    let mut out = String::from(left);
    out.push_str(&vec![segment; cells].join(joint));
    out.push_str(right);
    out
}

pub fn lines(elements: &[i64], phase: AnimationPhase) -> Vec<Line<'static>> {
    let width = cell_width(elements);
    let top_index = elements.len().saturating_sub(1).to_string();
    let index_width = top_index.len() + 2;
    let pad = " ".repeat(TOP_LABEL.len());
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(format!("{}┌{}┐", TOP_LABEL, "─".repeat(index_width))),
        Line::from(vec![
            Span::raw(format!("{}│", pad)),
            Span::styled(centered(&top_index, index_width), bold),
            Span::raw("│"),
        ]),
        Line::from(format!("{}└{}┘", pad, "─".repeat(index_width))),
        Line::default(),
        Line::from(border("┌", "┬", "┐", elements.len(), width)),
    ];

    let mut values = vec![Span::raw("│")];
    for (index, value) in elements.iter().enumerate() {
        values.push(Span::styled(
            centered(&value.to_string(), width),
            element_style(index, phase),
        ));
        values.push(Span::raw("│"));
    }
    lines.push(Line::from(values));
    lines.push(Line::from(border("└", "┴", "┘", elements.len(), width)));

    let index_style = Style::default().fg(Color::Cyan);
    let mut indices = vec![Span::raw(" ")];
    for index in 0..elements.len() {
        indices.push(Span::styled(centered(&index.to_string(), width), index_style));
        indices.push(Span::raw(" "));
    }
    lines.push(Line::from(indices));

    lines
}
