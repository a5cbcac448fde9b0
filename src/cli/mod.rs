//! CLI module for tasktrack - command-line arguments.
//!
//! With no subcommand the interactive session starts; `list` prints the
//! task list once and exits.

pub mod commands;

pub use commands::Cli;
