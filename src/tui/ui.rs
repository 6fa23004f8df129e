use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{HintBar, StackView, StatsPanel, TitleBar};

/// Input box height: one text row plus borders.
const INPUT_HEIGHT: u16 = 3;

pub struct Areas {
    pub title: Rect,
    pub stack: Rect,
    pub stats: Rect,
    pub input: Rect,
    pub hints: Rect,
}

/// Split the frame: title on top, hints at the bottom, the stack on the
/// left and the read-outs plus input on the right.
pub fn layout(area: Rect, stats_height: u16) -> Areas {
    use Constraint::{Length, Min, Percentage};

    let [title, body, hints] = Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);
    let [stack, side] = Layout::horizontal([Percentage(60), Percentage(40)]).areas(body);
    let [stats, input, _] =
        Layout::vertical([Length(stats_height), Length(INPUT_HEIGHT), Min(0)]).areas(side);

    Areas {
        title,
        stack,
        stats,
        input,
        hints,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let mut stats = StatsPanel::new(app.top(), app.size(), app.peek_result());
    let areas = layout(frame.area(), stats.required_height());

    TitleBar::new(tui.representation, app.is_animating(), app.queued())
        .render(frame, areas.title);

    StackView::new(
        app.elements(),
        app.phase(),
        tui.representation,
        &mut tui.stack_view,
    )
    .render(frame, areas.stack);

    stats.render(frame, areas.stats);
    tui.input_box.render(frame, areas.input);

    HintBar::new(tui.visible_notice()).render(frame, areas.hints);
}
