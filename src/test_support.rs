//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::core::clock::ManualClock;
use crate::core::sequencer::{AnimationTimings, BusyPolicy};
use crate::core::stack::DEFAULT_SEED;
use crate::core::state::App;

/// Creates a test App seeded with `[15, 25, 30, 50]` and a clock that only
/// moves when the test advances it.
pub fn test_app() -> (App, Arc<ManualClock>) {
    test_app_with(&DEFAULT_SEED, BusyPolicy::Reject)
}

pub fn test_app_with(seed: &[i64], policy: BusyPolicy) -> (App, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let app = App::new(clock.clone(), seed, AnimationTimings::default(), policy);
    (app, clock)
}
