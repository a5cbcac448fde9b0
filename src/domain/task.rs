//! Task record
//!
//! A task is addressed only by its 1-based position in the session's list;
//! there is no stable identifier.

use super::priority::Priority;
use crate::error::{Result, TaskError};

/// Separator between fields of a task file record
pub const FIELD_DELIMITER: char = ',';

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub label: String,
    pub completed: bool,
    pub priority: Priority,
}

impl Task {
    /// Create a pending, low-priority task.
    ///
    /// Fails if the label is empty or cannot be written to the task file.
    pub fn new(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        validate_label(&label)?;
        Ok(Self {
            label,
            completed: false,
            priority: Priority::default(),
        })
    }

    /// Build a task with explicit state, as read back from storage
    pub fn with_state(label: impl Into<String>, completed: bool, priority: Priority) -> Self {
        Self {
            label: label.into(),
            completed,
            priority,
        }
    }

    /// Flip the completion flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Checkbox marker shown in listings
    pub fn marker(&self) -> &'static str {
        if self.completed { "[X]" } else { "[ ]" }
    }
}

/// Check that a label is not blank and is free of the field delimiter and line breaks.
pub fn validate_label(label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(TaskError::InvalidLabel("label is empty".to_string()));
    }
    if label.contains(FIELD_DELIMITER) {
        return Err(TaskError::InvalidLabel(format!(
            "label may not contain '{}'",
            FIELD_DELIMITER
        )));
    }
    if label.contains(['\n', '\r']) {
        return Err(TaskError::InvalidLabel("label may not contain line breaks".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Buy milk").unwrap();
        assert_eq!(task.label, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn test_new_rejects_empty_label() {
        assert!(matches!(Task::new(""), Err(TaskError::InvalidLabel(_))));
    }

    #[test]
    fn test_new_rejects_blank_label() {
        assert!(matches!(Task::new("   "), Err(TaskError::InvalidLabel(_))));
    }

    #[test]
    fn test_new_keeps_surrounding_whitespace() {
        assert_eq!(Task::new("  Indented ").unwrap().label, "  Indented ");
    }

    #[test]
    fn test_new_rejects_delimiter() {
        assert!(matches!(Task::new("eggs, milk"), Err(TaskError::InvalidLabel(_))));
    }

    #[test]
    fn test_new_rejects_newline() {
        assert!(Task::new("one\ntwo").is_err());
        assert!(Task::new("one\rtwo").is_err());
    }

    #[test]
    fn test_toggle_flips_only_completed() {
        let mut task = Task::with_state("Write report", false, Priority::High);
        task.toggle();
        assert!(task.completed);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.label, "Write report");
        task.toggle();
        assert!(!task.completed);
    }

    #[test]
    fn test_marker() {
        let mut task = Task::new("a").unwrap();
        assert_eq!(task.marker(), "[ ]");
        task.toggle();
        assert_eq!(task.marker(), "[X]");
    }
}
