//! # Application State
//!
//! Core business state for Stackviz. Domain logic only, no TUI types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── clock: Arc<dyn Clock>          // where `now` comes from
//! ├── engine: StackEngine            // the elements
//! ├── sequencer: Sequencer           // animation phase + pending steps
//! ├── peek: Option<PeekResult>       // last successful peek
//! ├── notice: Option<Notice>         // transient user-facing message
//! └── subscribers: Vec<Sender>       // change notifications
//! ```
//!
//! Every operation goes through this struct. Push and pop are handed to the
//! sequencer, peek and reset act immediately.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use log::{debug, info};

use crate::core::clock::Clock;
use crate::core::config::ResolvedConfig;
use crate::core::sequencer::{
    AnimationPhase, AnimationTimings, BusyPolicy, Change, Request, SequenceError, Sequencer,
};
use crate::core::stack::{EmptyStackError, StackEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeekResult {
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }
}

pub struct App {
    pub clock: Arc<dyn Clock>,
    engine: StackEngine,
    sequencer: Sequencer,
    peek: Option<PeekResult>,
    pub notice: Option<Notice>,
    subscribers: Vec<Sender<Change>>,
}

impl App {
    pub fn new(
        clock: Arc<dyn Clock>,
        seed: &[i64],
        timings: AnimationTimings,
        policy: BusyPolicy,
    ) -> Self {
        Self {
            clock,
            engine: StackEngine::with_seed(seed),
            sequencer: Sequencer::new(timings, policy),
            peek: None,
            notice: None,
            subscribers: Vec::new(),
        }
    }

    pub fn from_config(clock: Arc<dyn Clock>, config: &ResolvedConfig) -> Self {
        Self::new(clock, &config.seed, config.timings, config.busy_policy)
    }

    /// Receive every `Change` from now on. Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<Change> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn publish(&mut self, changes: Vec<Change>) {
        for change in changes {
            if matches!(
                change,
                Change::Pushed { .. } | Change::Popped { .. } | Change::Reset { .. }
            ) {
                self.peek = None;
            }
            self.notice_for(&change);
            debug!("Change: {:?}", change);
            self.subscribers
                .retain(|subscriber| subscriber.send(change.clone()).is_ok());
        }
    }

    fn notice_for(&mut self, change: &Change) {
        let notice = match change {
            Change::Pushed { value, .. } => Notice::success(format!("Pushed {} to stack", value)),
            Change::Popped { value, .. } => Notice::success(format!("Popped {} from stack", value)),
            Change::Reset { .. } => Notice::success("Stack reset successfully"),
            Change::Rejected {
                request: Request::Pop,
                ..
            } => Notice::error("Stack is empty!"),
            Change::Queued { position, .. } => {
                Notice::info(format!("Queued behind the current animation ({} waiting)", position))
            }
            _ => return,
        };
        self.notice = Some(notice);
    }

    fn fail(&mut self, error: &SequenceError) {
        let text = match error {
            SequenceError::Parse(_) => "Please enter a valid number",
            SequenceError::Empty(_) => "Stack is empty!",
            SequenceError::Busy => "Another operation is still animating",
        };
        self.notice = Some(Notice::error(text));
    }

    /// Stage a push of `raw`. Returns the parsed value once accepted; the
    /// element lands on the stack when the sequencer commits it.
    pub fn push(&mut self, raw: &str) -> Result<Option<i64>, SequenceError> {
        let now = self.clock.now();
        match self.sequencer.request_push(&self.engine, raw, now) {
            Ok(changes) => {
                let value = changes.iter().find_map(|change| match change {
                    Change::PushScheduled { value, .. } => Some(*value),
                    Change::Queued {
                        request: Request::Push(value),
                        ..
                    } => Some(*value),
                    _ => None,
                });
                self.publish(changes);
                Ok(value)
            }
            Err(e) => {
                info!("Push of {:?} refused: {}", raw, e);
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Stage a pop. The element leaves the stack when the sequencer commits it.
    pub fn pop(&mut self) -> Result<(), SequenceError> {
        let now = self.clock.now();
        match self.sequencer.request_pop(&self.engine, now) {
            Ok(changes) => {
                self.publish(changes);
                Ok(())
            }
            Err(e) => {
                info!("Pop refused: {}", e);
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Read the top without touching the elements. Replaces the previous
    /// peek result on success and clears it on failure.
    pub fn peek(&mut self) -> Result<i64, EmptyStackError> {
        match self.engine.peek() {
            Ok(value) => {
                self.peek = Some(PeekResult { value });
                self.publish(vec![Change::Peeked { value }]);
                Ok(value)
            }
            Err(e) => {
                self.peek = None;
                self.fail(&SequenceError::Empty(e));
                self.publish(vec![Change::PeekFailed]);
                Err(e)
            }
        }
    }

    /// Empty the stack and abandon whatever was animating or queued.
    pub fn reset(&mut self) {
        let cleared = self.engine.size();
        self.sequencer.cancel();
        self.engine.reset();
        info!("Reset: cleared {} element(s)", cleared);
        self.publish(vec![Change::Reset { cleared }]);
    }

    /// Run whatever the sequencer has due. Returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let changes = self.sequencer.advance(&mut self.engine, now);
        let changed = !changes.is_empty();
        self.publish(changes);
        changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.sequencer.next_deadline()
    }

    pub fn is_animating(&self) -> bool {
        !self.sequencer.phase().is_idle()
    }

    pub fn elements(&self) -> &[i64] {
        self.engine.elements()
    }

    pub fn top(&self) -> Option<i64> {
        self.engine.top()
    }

    pub fn size(&self) -> usize {
        self.engine.size()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.sequencer.phase()
    }

    pub fn peek_result(&self) -> Option<PeekResult> {
        self.peek
    }

    pub fn policy(&self) -> BusyPolicy {
        self.sequencer.policy()
    }

    pub fn queued(&self) -> usize {
        self.sequencer.queued()
    }
}
