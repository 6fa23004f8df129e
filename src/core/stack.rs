//! # Stack Engine
//!
//! Owns the ordered sequence of integers. Index 0 is the bottom, the last
//! index is the top. The sequence only ever grows or shrinks at the end,
//! or is emptied wholesale by `reset()`.
//!
//! Every failure is an explicit error value. Nothing here panics, and a
//! failed operation never touches `elements`.

use std::num::ParseIntError;

use thiserror::Error;

/// The seed the widget starts with when nothing else is configured.
pub const DEFAULT_SEED: [i64; 4] = [15, 25, 30, 50];

/// Push input that isn't a base-10 integer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid integer {input:?}: {source}")]
pub struct ParseError {
    pub input: String,
    #[source]
    pub source: ParseIntError,
}

/// Pop or peek on an empty stack.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("stack is empty")]
pub struct EmptyStackError;

/// Parse a push argument: surrounding whitespace is ignored, an optional
/// sign is accepted, anything else (including the empty string) fails.
pub fn parse_element(raw: &str) -> Result<i64, ParseError> {
    raw.trim().parse::<i64>().map_err(|source| ParseError {
        input: raw.to_string(),
        source,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackEngine {
    elements: Vec<i64>,
}

impl StackEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: &[i64]) -> Self {
        Self {
            elements: seed.to_vec(),
        }
    }

    /// Parse `raw` and append it. No mutation on failure.
    pub fn push(&mut self, raw: &str) -> Result<i64, ParseError> {
        let value = parse_element(raw)?;
        Ok(self.push_value(value))
    }

    /// Append an already validated value.
    pub fn push_value(&mut self, value: i64) -> i64 {
        self.elements.push(value);
        value
    }

    pub fn pop(&mut self) -> Result<i64, EmptyStackError> {
        self.elements.pop().ok_or(EmptyStackError)
    }

    pub fn peek(&self) -> Result<i64, EmptyStackError> {
        self.top().ok_or(EmptyStackError)
    }

    pub fn reset(&mut self) {
        self.elements.clear();
    }

    pub fn top(&self) -> Option<i64> {
        self.elements.last().copied()
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Bottom to top.
    pub fn elements(&self) -> &[i64] {
        &self.elements
    }
}
