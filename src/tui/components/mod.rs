//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: app name, active representation, animation status
//! - `StatsPanel`: top, size, and peek read-outs
//! - `HintBar`: current notice, or the key bindings
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: single-line push field
//! - `StackView`: the stack in one of three representations, scrollable
//!
//! Components receive external data as props, never by reaching into
//! `App` themselves, so each one can be rendered against a `TestBackend`
//! with hand-built data.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs
//! ├── stats_panel.rs
//! ├── hint_bar.rs
//! ├── input_box.rs
//! └── stack_view/      (vertical, array, linked list)
//! ```

pub mod hint_bar;
pub mod input_box;
pub mod stack_view;
pub mod stats_panel;
pub mod title_bar;

pub use hint_bar::HintBar;
pub use input_box::{InputBox, InputEvent};
pub use stack_view::{StackView, StackViewState};
pub use stats_panel::StatsPanel;
pub use title_bar::TitleBar;
