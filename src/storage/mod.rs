//! Storage layer for tasktrack - the flat `taskfile.csv` store.
//!
//! One record per line, `label,completed,priority`, no header and no
//! quoting. The file is rewritten wholesale on every save.

mod taskfile;

pub use taskfile::{TASKFILE_NAME, TaskFile, format_record, parse_record};
