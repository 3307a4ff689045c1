//! Immediate-mode UI helpers
//!
//! Widgets draw through a `Canvas` and report clicks as return values;
//! the caller decides what a click means.

mod canvas;
mod input;
mod rect;
pub mod theme;
mod widgets;

pub use canvas::*;
pub use input::*;
pub use rect::*;
pub use widgets::*;
