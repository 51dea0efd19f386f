//! Rendering of countdown notifications and dashboard states.
//!
//! - `urgency`: color threshold policy layered on `tick`
//! - `terminal`: line-oriented view writing to any `Write`

pub mod terminal;
pub mod urgency;

pub use terminal::TerminalView;
pub use urgency::{progress_bar, Urgency};
