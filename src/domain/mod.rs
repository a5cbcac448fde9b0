//! Domain types for tasktrack
//!
//! - Task: a single to-do entry (label, completion flag, priority)
//! - Priority: low/medium/high, with its persisted code and display color

pub mod priority;
pub mod task;

pub use priority::Priority;
pub use task::{FIELD_DELIMITER, Task, validate_label};
