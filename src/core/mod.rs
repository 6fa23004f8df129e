//! # Core Application Logic
//!
//! This module contains Stackviz's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • StackEngine (data)   │
//!                    │  • Sequencer (timing)   │
//!                    │  • App + update()       │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │ Change notifications
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`stack`]: `StackEngine`, the elements and the four operations
//! - [`sequencer`]: the push/pop animation state machine
//! - [`clock`]: `Clock` trait and the `TimerQueue` the sequencer schedules on
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: layered configuration

pub mod action;
pub mod clock;
pub mod config;
pub mod sequencer;
pub mod stack;
pub mod state;
