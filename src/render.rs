//! Task list rendering.
//!
//! `rows` and `format_list` are pure; `Screen` owns the output stream and
//! the terminal control sequences.

use std::io::Write;

use colored::Colorize;
use crossterm::{
    QueueableCommand,
    cursor::MoveTo,
    terminal::{Clear, ClearType},
};

use crate::domain::{Priority, Task};

/// Shown instead of an empty table
pub const EMPTY_MESSAGE: &str = "No tasks... Use command 'create' to create one.";

/// Input prompt
pub const PROMPT: &str = "> ";

/// One rendered line of the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// 1-based position
    pub index: usize,
    pub marker: &'static str,
    pub label: String,
    pub priority: Priority,
}

impl TaskRow {
    /// Uncolored text of the row
    pub fn plain(&self) -> String {
        format!("{}: {} {}", self.index, self.marker, self.label)
    }

    /// Row text with the marker and label colored by priority
    pub fn colored(&self) -> String {
        let body = format!("{} {}", self.marker, self.label);
        format!("{}: {}", self.index, body.as_str().color(self.priority.color()))
    }
}

/// Build display rows in list order
pub fn rows(tasks: &[Task]) -> Vec<TaskRow> {
    tasks
        .iter()
        .enumerate()
        .map(|(i, task)| TaskRow {
            index: i + 1,
            marker: task.marker(),
            label: task.label.clone(),
            priority: task.priority,
        })
        .collect()
}

/// Full listing text, one row per line, or the empty-list message.
pub fn format_list(tasks: &[Task], color: bool) -> String {
    if tasks.is_empty() {
        return format!("{}\n", EMPTY_MESSAGE);
    }

    rows(tasks)
        .iter()
        .map(|row| if color { row.colored() } else { row.plain() })
        .fold(String::new(), |mut out, line| {
            out.push_str(&line);
            out.push('\n');
            out
        })
}

/// Output settings for the interactive display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOptions {
    pub color: bool,
    pub clear: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self { color: true, clear: true }
    }
}

impl ScreenOptions {
    /// Plain output without control sequences, for pipes and tests
    pub fn plain() -> Self {
        Self { color: false, clear: false }
    }
}

/// Writes the task list and prompt to an output stream
pub struct Screen<W: Write> {
    out: W,
    options: ScreenOptions,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, options: ScreenOptions) -> Self {
        Self { out, options }
    }

    /// Clear (if enabled) and draw the full list, followed by an optional notice.
    pub fn redraw(&mut self, tasks: &[Task], notice: Option<&str>) -> std::io::Result<()> {
        if self.options.clear {
            self.out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        }
        self.out.write_all(format_list(tasks, self.options.color).as_bytes())?;
        if let Some(notice) = notice {
            let line = if self.options.color {
                notice.yellow().to_string()
            } else {
                notice.to_string()
            };
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    /// Print a diagnostic line without redrawing
    pub fn error(&mut self, message: &str) -> std::io::Result<()> {
        let line = if self.options.color {
            message.red().to_string()
        } else {
            message.to_string()
        };
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    pub fn prompt(&mut self) -> std::io::Result<()> {
        self.out.write_all(PROMPT.as_bytes())?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
