//! Interactive session loop.
//!
//! The `Session` owns the task list for the lifetime of the process. Each
//! input line is parsed into a [`Command`], applied to the list, and the
//! list is redrawn. `exit` and end of input both persist before returning.

pub mod command;

use std::io::{BufRead, Write};

use log::{debug, info, warn};

use crate::domain::{Priority, Task};
use crate::error::{Result, TaskError};
use crate::render::Screen;
use crate::storage::TaskFile;

pub use command::{Arg, Command};

/// Whether the loop keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// What applying a command did to the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEffect {
    /// Persist requested; the list is unchanged
    SaveRequested,
    /// Persist and terminate requested
    ExitRequested,
    /// Task appended at this 1-based position
    Created(usize),
    /// Task removed from this 1-based position
    Removed(usize, Task),
    /// Completion flipped; carries the new state
    Toggled(usize, bool),
    /// Priority set
    Prioritized(usize, Priority),
    /// Invalid argument; nothing changed
    Rejected(String),
    /// Unrecognized or blank input; nothing changed
    Ignored(Option<String>),
}

impl CommandEffect {
    pub fn outcome(&self) -> Outcome {
        match self {
            CommandEffect::ExitRequested => Outcome::Exit,
            _ => Outcome::Continue,
        }
    }

    /// One-line message shown under the redrawn list, if any
    pub fn notice(&self) -> Option<String> {
        match self {
            CommandEffect::Rejected(reason) => Some(reason.clone()),
            CommandEffect::Ignored(Some(word)) => Some(format!("Unknown command: {}", word)),
            _ => None,
        }
    }
}

/// Owner of the in-memory task list and its store
#[derive(Debug)]
pub struct Session {
    tasks: Vec<Task>,
    store: TaskFile,
}

impl Session {
    /// Load the task list from `store`.
    pub fn open(store: TaskFile) -> Result<Self> {
        let tasks = store.load()?;
        Ok(Self { tasks, store })
    }

    pub fn new(store: TaskFile, tasks: Vec<Task>) -> Self {
        Self { tasks, store }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn store(&self) -> &TaskFile {
        &self.store
    }

    /// Write the whole list to the store
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.tasks)
    }

    /// Parse and apply one input line
    pub fn dispatch(&mut self, line: &str) -> CommandEffect {
        self.apply(Command::parse(line))
    }

    /// Apply a command to the in-memory list.
    ///
    /// Never fails: bad arguments become `Rejected` and leave the list
    /// untouched. Persistence for `save`/`exit` is left to the caller.
    pub fn apply(&mut self, command: Command) -> CommandEffect {
        debug!("Applying command: {:?}", command);
        match command {
            Command::Exit => CommandEffect::ExitRequested,
            Command::Save => CommandEffect::SaveRequested,
            Command::Create(label) => self.create(label),
            Command::Remove(index) => match self.position(index) {
                Ok(i) => {
                    let task = self.tasks.remove(i - 1);
                    CommandEffect::Removed(i, task)
                }
                Err(reason) => CommandEffect::Rejected(reason),
            },
            Command::Toggle(index) => match self.position(index) {
                Ok(i) => {
                    let task = &mut self.tasks[i - 1];
                    task.toggle();
                    CommandEffect::Toggled(i, task.completed)
                }
                Err(reason) => CommandEffect::Rejected(reason),
            },
            Command::Priority(index, priority) => {
                let i = match self.position(index) {
                    Ok(i) => i,
                    Err(reason) => return CommandEffect::Rejected(reason),
                };
                let priority = match priority {
                    Ok(p) => p,
                    Err(raw) => {
                        return CommandEffect::Rejected(format!(
                            "Unknown priority: '{}' (expected low, medium or high)",
                            raw
                        ));
                    }
                };
                self.tasks[i - 1].priority = priority;
                CommandEffect::Prioritized(i, priority)
            }
            Command::Unknown(word) => CommandEffect::Ignored(Some(word)),
            Command::Blank => CommandEffect::Ignored(None),
        }
    }

    fn create(&mut self, label: String) -> CommandEffect {
        match Task::new(label) {
            Ok(task) => {
                self.tasks.push(task);
                CommandEffect::Created(self.tasks.len())
            }
            Err(TaskError::InvalidLabel(reason)) => CommandEffect::Rejected(format!("Cannot create task: {}", reason)),
            Err(e) => CommandEffect::Rejected(e.to_string()),
        }
    }

    /// Check a 1-based position against the current list
    fn position(&self, index: Arg<usize>) -> std::result::Result<usize, String> {
        match index {
            Ok(i) if (1..=self.tasks.len()).contains(&i) => Ok(i),
            Ok(i) => Err(format!("Invalid index: {} (have {} tasks)", i, self.tasks.len())),
            Err(raw) if raw.is_empty() => Err("Missing task index".to_string()),
            Err(raw) => Err(format!("Invalid index: '{}'", raw)),
        }
    }

    /// Run the read-dispatch-redraw loop until `exit` or end of input.
    ///
    /// Returns an error only when the store cannot be written on the way
    /// out, or when the input or output stream fails; a failed `save` is
    /// reported on the screen and the loop continues. Input that is not
    /// valid UTF-8 is decoded lossily rather than ending the session.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, screen: &mut Screen<W>) -> Result<()> {
        info!("Session started with {} tasks", self.tasks.len());
        screen.redraw(&self.tasks, None)?;
        screen.prompt()?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => {
                    info!("End of input, saving and exiting");
                    self.save()?;
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Input stream failed: {}, saving before exit", e);
                    self.save()?;
                    return Err(e.into());
                }
            }
            let line = decode_line(&buf);

            let effect = self.dispatch(&line);
            let mut failure = None;
            let mut notice = effect.notice();
            match &effect {
                CommandEffect::ExitRequested => {
                    info!("Exit requested, saving");
                    self.save()?;
                    return Ok(());
                }
                CommandEffect::SaveRequested => match self.save() {
                    Ok(()) => notice = Some(format!("Saved {} tasks", self.tasks.len())),
                    Err(e) => {
                        warn!("Save failed: {}", e);
                        failure = Some(format!("Save failed: {}", e));
                    }
                },
                _ => {}
            }

            screen.redraw(&self.tasks, notice.as_deref())?;
            if let Some(message) = failure {
                screen.error(&message)?;
            }
            screen.prompt()?;
        }
    }
}

/// Decode one raw input line, dropping the line terminator.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
