//! # Animation Sequencer
//!
//! Stages every push and pop so a view can animate the element before or
//! after the data changes, never on the frame in between.
//!
//! ```text
//! push:  Idle ──request──▶ PendingMutation(Push) ──push_delay──▶ commit
//!                          ──▶ Animating(Push, entering) ──enter──▶ Idle
//!
//! pop:   Idle ──request──▶ Animating(Pop, exiting) ──pop_delay──▶ commit
//!                          ──▶ Animating(Pop, committed) ──exit──▶ Idle
//! ```
//!
//! The sequencer never reads a clock. Callers pass `now` in, and deferred
//! steps sit in a `TimerQueue` until `advance()` is called at or past
//! their deadline. Chained steps are scheduled from the deadline that fired,
//! not from `now`, so a late tick replays the exact timeline.
//!
//! Only one operation is in flight at a time. What happens to a request
//! that arrives mid-animation is decided by [`BusyPolicy`].

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::clock::TimerQueue;
use crate::core::stack::{EmptyStackError, ParseError, StackEngine, parse_element};

pub const DEFAULT_PUSH_DELAY: Duration = Duration::from_millis(50);
pub const DEFAULT_ENTER: Duration = Duration::from_millis(300);
pub const DEFAULT_POP_DELAY: Duration = Duration::from_millis(400);
pub const DEFAULT_EXIT: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Push,
    Pop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Idle,
    /// A push was accepted but the value isn't on the stack yet.
    PendingMutation { kind: OperationKind, index: usize },
    /// `committed` is whether the engine has already been mutated.
    Animating {
        kind: OperationKind,
        index: usize,
        committed: bool,
    },
}

impl AnimationPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, AnimationPhase::Idle)
    }

    /// Index of a freshly pushed element still playing its enter transition.
    pub fn entering_index(&self) -> Option<usize> {
        match *self {
            AnimationPhase::Animating {
                kind: OperationKind::Push,
                index,
                committed: true,
            } => Some(index),
            _ => None,
        }
    }

    /// Index of the top element while it plays its exit transition.
    pub fn exiting_index(&self) -> Option<usize> {
        match *self {
            AnimationPhase::Animating {
                kind: OperationKind::Pop,
                index,
                committed: false,
            } => Some(index),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationTimings {
    pub push_delay: Duration,
    pub enter: Duration,
    pub pop_delay: Duration,
    pub exit: Duration,
}

impl AnimationTimings {
    /// Every step becomes due immediately.
    pub fn instant() -> Self {
        Self {
            push_delay: Duration::ZERO,
            enter: Duration::ZERO,
            pop_delay: Duration::ZERO,
            exit: Duration::ZERO,
        }
    }
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            push_delay: DEFAULT_PUSH_DELAY,
            enter: DEFAULT_ENTER,
            pop_delay: DEFAULT_POP_DELAY,
            exit: DEFAULT_EXIT,
        }
    }
}

/// What to do with a push/pop that arrives while another is animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyPolicy {
    /// Refuse it with `SequenceError::Busy`.
    #[default]
    Reject,
    /// Run it after everything already accepted, in arrival order.
    Queue,
}

/// A validated push or pop waiting to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Push(i64),
    Pop,
}

/// Observable transitions, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    PushScheduled { value: i64, index: usize },
    Pushed { value: i64, index: usize },
    PopStarted { value: i64, index: usize },
    Popped { value: i64, index: usize },
    Settled(OperationKind),
    Queued { request: Request, position: usize },
    /// A queued request that could no longer run when its turn came.
    Rejected { request: Request, error: EmptyStackError },
    Peeked { value: i64 },
    PeekFailed,
    Reset { cleared: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Empty(#[from] EmptyStackError),
    #[error("another operation is still animating")]
    Busy,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    CommitPush(i64),
    CommitPop,
    Settle(OperationKind),
}

pub struct Sequencer {
    timings: AnimationTimings,
    policy: BusyPolicy,
    phase: AnimationPhase,
    timers: TimerQueue<Step>,
    waiting: VecDeque<Request>,
}

impl Sequencer {
    pub fn new(timings: AnimationTimings, policy: BusyPolicy) -> Self {
        Self {
            timings,
            policy,
            phase: AnimationPhase::Idle,
            timers: TimerQueue::new(),
            waiting: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn policy(&self) -> BusyPolicy {
        self.policy
    }

    /// Requests accepted under `BusyPolicy::Queue` that haven't started yet.
    pub fn queued(&self) -> usize {
        self.waiting.len()
    }

    /// When `advance()` next has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Parse `raw` and stage a push. Invalid input fails here, before
    /// anything is scheduled.
    pub fn request_push(
        &mut self,
        engine: &StackEngine,
        raw: &str,
        now: Instant,
    ) -> Result<Vec<Change>, SequenceError> {
        let value = parse_element(raw)?;
        self.submit(engine, Request::Push(value), now)
    }

    /// Stage a pop. An empty stack fails here when the sequencer is idle.
    pub fn request_pop(
        &mut self,
        engine: &StackEngine,
        now: Instant,
    ) -> Result<Vec<Change>, SequenceError> {
        self.submit(engine, Request::Pop, now)
    }

    fn submit(
        &mut self,
        engine: &StackEngine,
        request: Request,
        now: Instant,
    ) -> Result<Vec<Change>, SequenceError> {
        let mut changes = Vec::new();

        if self.phase.is_idle() {
            self.start(engine, request, now, &mut changes)?;
            return Ok(changes);
        }

        match self.policy {
            BusyPolicy::Reject => {
                info!("Rejected {:?}: sequencer busy in {:?}", request, self.phase);
                Err(SequenceError::Busy)
            }
            BusyPolicy::Queue => {
                self.waiting.push_back(request);
                let position = self.waiting.len();
                debug!("Queued {:?} at position {}", request, position);
                changes.push(Change::Queued { request, position });
                Ok(changes)
            }
        }
    }

    fn start(
        &mut self,
        engine: &StackEngine,
        request: Request,
        at: Instant,
        changes: &mut Vec<Change>,
    ) -> Result<(), EmptyStackError> {
        match request {
            Request::Push(value) => {
                let index = engine.size();
                self.phase = AnimationPhase::PendingMutation {
                    kind: OperationKind::Push,
                    index,
                };
                self.timers
                    .schedule(at + self.timings.push_delay, Step::CommitPush(value));
                debug!("Push {} scheduled for index {}", value, index);
                changes.push(Change::PushScheduled { value, index });
            }
            Request::Pop => {
                let value = engine.top().ok_or(EmptyStackError)?;
                let index = engine.size() - 1;
                self.phase = AnimationPhase::Animating {
                    kind: OperationKind::Pop,
                    index,
                    committed: false,
                };
                self.timers.schedule(at + self.timings.pop_delay, Step::CommitPop);
                debug!("Pop of {} at index {} started", value, index);
                changes.push(Change::PopStarted { value, index });
            }
        }
        Ok(())
    }

    /// Start waiting requests until one of them actually begins.
    fn start_next(&mut self, engine: &StackEngine, at: Instant, changes: &mut Vec<Change>) {
        while let Some(request) = self.waiting.pop_front() {
            match self.start(engine, request, at, changes) {
                Ok(()) => return,
                Err(error) => {
                    info!("Queued {:?} dropped: {}", request, error);
                    changes.push(Change::Rejected { request, error });
                }
            }
        }
    }

    /// Run every step due at or before `now`, mutating `engine` at the
    /// commit boundaries.
    pub fn advance(&mut self, engine: &mut StackEngine, now: Instant) -> Vec<Change> {
        let mut changes = Vec::new();

        while let Some((deadline, step)) = self.timers.pop_due(now) {
            match step {
                Step::CommitPush(value) => {
                    let index = engine.size();
                    engine.push_value(value);
                    self.phase = AnimationPhase::Animating {
                        kind: OperationKind::Push,
                        index,
                        committed: true,
                    };
                    self.timers
                        .schedule(deadline + self.timings.enter, Step::Settle(OperationKind::Push));
                    info!("Pushed {} at index {}", value, index);
                    changes.push(Change::Pushed { value, index });
                }
                Step::CommitPop => match engine.pop() {
                    Ok(value) => {
                        let index = engine.size();
                        self.phase = AnimationPhase::Animating {
                            kind: OperationKind::Pop,
                            index,
                            committed: true,
                        };
                        self.timers
                            .schedule(deadline + self.timings.exit, Step::Settle(OperationKind::Pop));
                        info!("Popped {} from index {}", value, index);
                        changes.push(Change::Popped { value, index });
                    }
                    Err(error) => {
                        warn!("Pop commit found an empty stack");
                        self.phase = AnimationPhase::Idle;
                        changes.push(Change::Rejected {
                            request: Request::Pop,
                            error,
                        });
                        self.start_next(engine, deadline, &mut changes);
                    }
                },
                Step::Settle(kind) => {
                    self.phase = AnimationPhase::Idle;
                    debug!("{:?} animation settled", kind);
                    changes.push(Change::Settled(kind));
                    self.start_next(engine, deadline, &mut changes);
                }
            }
        }

        changes
    }

    /// Drop the in-flight step and everything queued. Returns how many
    /// queued requests were discarded.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.waiting.len();
        if !self.phase.is_idle() || dropped > 0 {
            info!("Cancelling {:?} and {} queued request(s)", self.phase, dropped);
        }
        self.phase = AnimationPhase::Idle;
        self.timers.clear();
        self.waiting.clear();
        dropped
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(AnimationTimings::default(), BusyPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stack::DEFAULT_SEED;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup(policy: BusyPolicy) -> (Sequencer, StackEngine, Instant) {
        (
            Sequencer::new(AnimationTimings::default(), policy),
            StackEngine::with_seed(&DEFAULT_SEED),
            Instant::now(),
        )
    }

    #[test]
    fn test_push_walks_pending_then_entering_then_idle() {
        let (mut seq, mut engine, t0) = setup(BusyPolicy::Reject);

        let changes = seq.request_push(&engine, "7", t0).unwrap();
        assert_eq!(changes, vec![Change::PushScheduled { value: 7, index: 4 }]);
        assert_eq!(
            seq.phase(),
            AnimationPhase::PendingMutation {
                kind: OperationKind::Push,
                index: 4
            }
        );
        assert_eq!(engine.size(), 4, "nothing commits before the pre-delay");

        assert!(seq.advance(&mut engine, t0 + ms(49)).is_empty());
        assert_eq!(engine.size(), 4);

        let changes = seq.advance(&mut engine, t0 + ms(50));
        assert_eq!(changes, vec![Change::Pushed { value: 7, index: 4 }]);
        assert_eq!(engine.elements(), &[15, 25, 30, 50, 7]);
        assert_eq!(seq.phase().entering_index(), Some(4));

        assert!(seq.advance(&mut engine, t0 + ms(349)).is_empty());
        let changes = seq.advance(&mut engine, t0 + ms(350));
        assert_eq!(changes, vec![Change::Settled(OperationKind::Push)]);
        assert!(seq.phase().is_idle());
        assert_eq!(seq.next_deadline(), None);
    }

    #[test]
    fn test_pop_marks_exiting_before_mutation() {
        let (mut seq, mut engine, t0) = setup(BusyPolicy::Reject);

        let changes = seq.request_pop(&engine, t0).unwrap();
        assert_eq!(changes, vec![Change::PopStarted { value: 50, index: 3 }]);
        assert_eq!(seq.phase().exiting_index(), Some(3));
        assert_eq!(engine.size(), 4);

        assert!(seq.advance(&mut engine, t0 + ms(399)).is_empty());
        let changes = seq.advance(&mut engine, t0 + ms(400));
        assert_eq!(changes, vec![Change::Popped { value: 50, index: 3 }]);
        assert_eq!(engine.elements(), &[15, 25, 30]);
        assert_eq!(seq.phase().exiting_index(), None);
        assert!(!seq.phase().is_idle());

        let changes = seq.advance(&mut engine, t0 + ms(700));
        assert_eq!(changes, vec![Change::Settled(OperationKind::Pop)]);
        assert!(seq.phase().is_idle());
    }

    #[test]
    fn test_late_tick_runs_whole_timeline() {
        let (mut seq, mut engine, t0) = setup(BusyPolicy::Reject);
        seq.request_push(&engine, "1", t0).unwrap();

        let changes = seq.advance(&mut engine, t0 + Duration::from_secs(5));
        assert_eq!(
            changes,
            vec![
                Change::Pushed { value: 1, index: 4 },
                Change::Settled(OperationKind::Push)
            ]
        );
        assert!(seq.phase().is_idle());
    }

    #[test]
    fn test_invalid_push_schedules_nothing() {
        let (mut seq, engine, t0) = setup(BusyPolicy::Reject);
        let err = seq.request_push(&engine, "abc", t0).unwrap_err();
        assert!(matches!(err, SequenceError::Parse(_)));
        assert!(seq.phase().is_idle());
        assert_eq!(seq.next_deadline(), None);
    }

    #[test]
    fn test_pop_on_empty_fails_immediately() {
        let mut seq = Sequencer::default();
        let engine = StackEngine::new();
        let err = seq.request_pop(&engine, Instant::now()).unwrap_err();
        assert_eq!(err, SequenceError::Empty(EmptyStackError));
        assert!(seq.phase().is_idle());
    }

    #[test]
    fn test_reject_policy_refuses_while_animating() {
        let (mut seq, mut engine, t0) = setup(BusyPolicy::Reject);
        seq.request_push(&engine, "7", t0).unwrap();

        assert_eq!(seq.request_pop(&engine, t0 + ms(10)), Err(SequenceError::Busy));
        assert_eq!(
            seq.request_push(&engine, "8", t0 + ms(10)),
            Err(SequenceError::Busy)
        );

        seq.advance(&mut engine, t0 + ms(350));
        assert_eq!(engine.elements(), &[15, 25, 30, 50, 7]);
        assert!(seq.request_pop(&engine, t0 + ms(351)).is_ok());
    }

    #[test]
    fn test_queue_policy_runs_requests_in_arrival_order() {
        let (mut seq, mut engine, t0) = setup(BusyPolicy::Queue);
        seq.request_push(&engine, "7", t0).unwrap();
        let queued = seq.request_pop(&engine, t0 + ms(10)).unwrap();
        assert_eq!(
            queued,
            vec![Change::Queued {
                request: Request::Pop,
                position: 1
            }]
        );
        seq.request_push(&engine, "9", t0 + ms(20)).unwrap();
        assert_eq!(seq.queued(), 2);

        // push 7: commit 50, settle 350; pop: starts 350, commit 750, settle 1050;
        // push 9: starts 1050, commit 1100, settle 1400.
        let changes = seq.advance(&mut engine, t0 + ms(1400));
        assert_eq!(
            changes,
            vec![
                Change::Pushed { value: 7, index: 4 },
                Change::Settled(OperationKind::Push),
                Change::PopStarted { value: 7, index: 4 },
                Change::Popped { value: 7, index: 4 },
                Change::Settled(OperationKind::Pop),
                Change::PushScheduled { value: 9, index: 4 },
                Change::Pushed { value: 9, index: 4 },
                Change::Settled(OperationKind::Push),
            ]
        );
        assert_eq!(engine.elements(), &[15, 25, 30, 50, 9]);
        assert_eq!(seq.queued(), 0);
        assert!(seq.phase().is_idle());
    }

    #[test]
    fn test_queued_pop_on_drained_stack_is_rejected() {
        let mut seq = Sequencer::new(AnimationTimings::default(), BusyPolicy::Queue);
        let mut engine = StackEngine::with_seed(&[1]);
        let t0 = Instant::now();

        seq.request_pop(&engine, t0).unwrap();
        seq.request_pop(&engine, t0).unwrap();
        seq.request_push(&engine, "5", t0).unwrap();

        let changes = seq.advance(&mut engine, t0 + Duration::from_secs(2));
        assert!(changes.contains(&Change::Rejected {
            request: Request::Pop,
            error: EmptyStackError
        }));
        assert_eq!(engine.elements(), &[5]);
        assert!(seq.phase().is_idle());
    }

    #[test]
    fn test_cancel_drops_in_flight_and_queue() {
        let (mut seq, mut engine, t0) = setup(BusyPolicy::Queue);
        seq.request_pop(&engine, t0).unwrap();
        seq.request_push(&engine, "3", t0).unwrap();

        assert_eq!(seq.cancel(), 1);
        assert!(seq.phase().is_idle());
        assert_eq!(seq.next_deadline(), None);

        assert!(seq.advance(&mut engine, t0 + Duration::from_secs(1)).is_empty());
        assert_eq!(engine.elements(), &DEFAULT_SEED);
    }

    #[test]
    fn test_instant_timings_commit_on_next_advance() {
        let mut seq = Sequencer::new(AnimationTimings::instant(), BusyPolicy::Reject);
        let mut engine = StackEngine::new();
        let t0 = Instant::now();

        seq.request_push(&engine, "4", t0).unwrap();
        assert!(engine.is_empty());
        let changes = seq.advance(&mut engine, t0);
        assert_eq!(changes.len(), 2);
        assert_eq!(engine.elements(), &[4]);
        assert!(seq.phase().is_idle());
    }
}
