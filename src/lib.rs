//! tasktrack - an interactive command-line task tracker
//!
//! Tasks live in a flat `taskfile.csv` in the working directory. A session
//! loads them, applies line-oriented commands (`create`, `remove`,
//! `toggle`, `priority`, `save`, `exit`) and writes them back.

pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod session;
pub mod storage;

pub use error::{Result, TaskError};
