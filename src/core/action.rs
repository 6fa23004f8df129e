//! # Actions
//!
//! Everything that can happen in Stackviz becomes an `Action`.
//! User presses Enter? That's `Action::Push(text)`.
//! A frame goes by? That's `Action::Tick`.
//!
//! `update()` applies an action to the `App` and returns an `Effect`
//! telling the adapter what, if anything, it has to do next. No terminal
//! I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Push(String),
    Pop,
    Peek,
    Reset,
    /// Let the sequencer run whatever is due.
    Tick,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The push input was accepted and the input field can be cleared.
    ClearInput,
    /// Something visible changed.
    Redraw,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    if !matches!(action, Action::Tick) {
        debug!("update: {:?}", action);
    }
    match action {
        Action::Push(raw) => match app.push(&raw) {
            Ok(_) => Effect::ClearInput,
            Err(_) => Effect::Redraw,
        },
        Action::Pop => {
            let _ = app.pop();
            Effect::Redraw
        }
        Action::Peek => {
            let _ = app.peek();
            Effect::Redraw
        }
        Action::Reset => {
            app.reset();
            Effect::ClearInput
        }
        Action::Tick => {
            if app.tick() {
                Effect::Redraw
            } else {
                Effect::None
            }
        }
        Action::Quit => Effect::Quit,
    }
}
