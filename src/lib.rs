//! Stackviz library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How the stack pane draws the elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Representation {
    /// Vertical pile of boxes, top first.
    Stack,
    /// Fixed array of cells with their indices underneath.
    #[default]
    Array,
    /// Nodes joined by pointer arrows, ending in NULL.
    LinkedList,
}

impl Representation {
    pub fn next(self) -> Self {
        match self {
            Representation::Stack => Representation::Array,
            Representation::Array => Representation::LinkedList,
            Representation::LinkedList => Representation::Stack,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Representation::Stack => "Stack",
            Representation::Array => "Array",
            Representation::LinkedList => "Linked List",
        }
    }
}
