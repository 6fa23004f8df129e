//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (a push or pop in flight): draws every ~80ms, and never
//!   sleeps past the sequencer's next deadline.
//! - **Idle**: sleeps up to 500ms (or until the notice expires), only
//!   redraws on events, changes, or terminal resize.
//!
//! The loop ticks the core once per iteration. The core decides what is
//! due from its own clock, so a slow frame never skips a transition.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::Representation;
use crate::core::action::{Action, Effect, update};
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::ResolvedConfig;
use crate::core::sequencer::Change;
use crate::core::state::{App, Notice};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, StackViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_FRAME: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
    pub stack_view: StackViewState,
    pub representation: Representation,
    /// Notice on screen and when it goes away.
    notice: Option<(Notice, Instant)>,
    notice_duration: Duration,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            input_box: InputBox::new(),
            stack_view: StackViewState::new(),
            representation: config.view,
            notice: None,
            notice_duration: config.notice_duration,
        }
    }

    pub fn visible_notice(&self) -> Option<&Notice> {
        self.notice.as_ref().map(|(notice, _)| notice)
    }

    fn notice_expiry(&self) -> Option<Instant> {
        self.notice.as_ref().map(|(_, expires)| *expires)
    }

    /// Take a fresh notice from the app and drop an expired one.
    /// Returns whether the visible notice changed.
    pub fn sync_notice(&mut self, app: &mut App, now: Instant) -> bool {
        if let Some(notice) = app.notice.take() {
            self.notice = Some((notice, now + self.notice_duration));
            return true;
        }
        if self.notice_expiry().is_some_and(|expires| now >= expires) {
            self.notice = None;
            return true;
        }
        false
    }

    /// React to a core change notification.
    pub fn on_change(&mut self, change: &Change) {
        match change {
            Change::Pushed { .. } | Change::PopStarted { .. } => {
                self.stack_view.follow_top(self.representation)
            }
            Change::Reset { .. } => self.stack_view = StackViewState::new(),
            _ => {}
        }
    }

    /// Route a terminal event. TUI-local events are handled here; the rest
    /// come back as core actions.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::ForceQuit | TuiEvent::Escape => Some(Action::Quit),
            TuiEvent::Pop => Some(Action::Pop),
            TuiEvent::Peek => Some(Action::Peek),
            TuiEvent::Reset => Some(Action::Reset),
            TuiEvent::CycleView => {
                self.representation = self.representation.next();
                self.stack_view.follow_top(self.representation);
                info!("Representation: {}", self.representation.label());
                None
            }
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                self.stack_view.handle_event(event);
                None
            }
            TuiEvent::Resize => None,
            _ => match self.input_box.handle_event(event)? {
                InputEvent::Submit(text) => Some(Action::Push(text)),
                InputEvent::ContentChanged => None,
            },
        }
    }
}

/// How long the loop may block waiting for input.
fn poll_timeout(
    now: Instant,
    animating: bool,
    next_deadline: Option<Instant>,
    notice_expiry: Option<Instant>,
) -> Duration {
    let base = if animating { ANIMATION_FRAME } else { IDLE_POLL };
    [next_deadline, notice_expiry]
        .into_iter()
        .flatten()
        .map(|at| at.saturating_duration_since(now))
        .fold(base, Duration::min)
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Disambiguated escape codes let Esc arrive without the usual delay;
        // terminals without the Kitty protocol ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut app = App::from_config(clock.clone(), &config);
    let changes = app.subscribe();
    let mut tui = TuiState::new(&config);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    let mut needs_redraw = true; // Force first frame

    let result = loop {
        let now = clock.now();

        if update(&mut app, Action::Tick) == Effect::Redraw {
            needs_redraw = true;
        }
        for change in changes.try_iter() {
            tui.on_change(&change);
            needs_redraw = true;
        }
        if tui.sync_notice(&mut app, now) {
            needs_redraw = true;
        }

        let animating = app.is_animating();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = poll_timeout(now, animating, app.next_deadline(), tui.notice_expiry());
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            let Some(action) = tui.handle_event(&event) else {
                continue;
            };
            debug!("Event loop dispatching: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::ClearInput => tui.input_box.clear(),
                Effect::Redraw | Effect::None => {}
            }
        }

        if should_quit {
            info!("Quit requested");
            break Ok(());
        }
    };

    ratatui::restore();
    result
}
