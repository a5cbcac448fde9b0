//! Delimited text file storage for the task list.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::domain::{FIELD_DELIMITER, Priority, Task};
use crate::error::{Result, TaskError};

/// File name of the store, resolved against the working directory
pub const TASKFILE_NAME: &str = "taskfile.csv";

/// Handle to the task file on disk.
///
/// Holds only the path; the file itself is opened for the duration of each
/// `load`/`save` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    /// Ensure `taskfile.csv` exists in the current working directory.
    pub fn ensure_store() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::ensure_in(cwd)
    }

    /// Ensure `taskfile.csv` exists in `dir`.
    pub fn ensure_in(dir: impl AsRef<Path>) -> Result<Self> {
        Self::ensure_at(dir.as_ref().join(TASKFILE_NAME))
    }

    /// Ensure the task file at `path` exists, creating it empty if missing.
    ///
    /// An existing file is left untouched and its contents are not checked.
    pub fn ensure_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| TaskError::Storage(format!("cannot create {}: {}", path.display(), e)))?;
        debug!("Task file ready at {}", path.display());
        Ok(Self { path })
    }

    /// Wrap a path without touching the filesystem
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every task from the file.
    ///
    /// A missing file is an empty list. Blank lines are skipped. The first
    /// malformed record aborts the load; no partial list is returned.
    pub fn load(&self) -> Result<Vec<Task>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No task file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut tasks = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if line.trim().is_empty() {
                continue;
            }
            let task = parse_record(line).map_err(|reason| TaskError::MalformedRecord { line: i + 1, reason })?;
            tasks.push(task);
        }

        info!("Loaded {} tasks from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }

    /// Replace the file's contents with `tasks`, in order.
    ///
    /// Writes a sibling temporary file and renames it over the target, so a
    /// failed write leaves the previous contents in place. The temporary
    /// file never outlives a failed save.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let tmp_path = self.tmp_path();
        let written = write_records(&tmp_path, tasks).and_then(|()| {
            fs::rename(&tmp_path, &self.path).map_err(|e| {
                TaskError::Storage(format!("cannot replace {}: {}", self.path.display(), e))
            })
        });

        if let Err(e) = written {
            if tmp_path.exists() {
                let _ = fs::remove_file(&tmp_path);
            }
            return Err(e);
        }

        info!("Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| TASKFILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Write every record to `path` and sync it to disk.
fn write_records(path: &Path, tasks: &[Task]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for task in tasks {
        writeln!(writer, "{}", format_record(task))?;
    }
    let file = writer.into_inner().map_err(|e| TaskError::Io(e.into_error()))?;
    file.sync_all()?;
    Ok(())
}

/// Serialize one task as a record line (without the line terminator).
pub fn format_record(task: &Task) -> String {
    format!(
        "{label}{d}{done}{d}{priority}",
        label = task.label,
        done = if task.completed { 1 } else { 0 },
        priority = task.priority.code(),
        d = FIELD_DELIMITER,
    )
}

/// Parse one record line. The error is a human-readable reason.
///
/// Two-field records predate priorities and load as `low`.
pub fn parse_record(line: &str) -> std::result::Result<Task, String> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if !(2..=3).contains(&fields.len()) {
        return Err(format!("expected 2 or 3 fields, found {}", fields.len()));
    }

    let label = fields[0];
    if label.is_empty() {
        return Err("empty label".to_string());
    }

    let status = fields[1].trim();
    let completed = status
        .parse::<i64>()
        .map(|n| n != 0)
        .map_err(|_| format!("status '{}' is not an integer", status))?;

    let priority = match fields.get(2) {
        None => Priority::default(),
        Some(raw) => {
            let raw = raw.trim();
            raw.parse::<u8>()
                .ok()
                .and_then(Priority::from_code)
                .ok_or_else(|| format!("priority '{}' is not one of 1, 2, 3", raw))?
        }
    };

    Ok(Task::with_state(label, completed, priority))
}
