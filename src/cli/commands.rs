//! CLI command definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tasktrack::config::Config;

/// tasktrack - a task list kept in ./taskfile.csv
#[derive(Parser, Debug)]
#[command(name = "tasktrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Task file to use instead of ./taskfile.csv
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Disable priority colors
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Do not clear the screen between commands
    #[arg(long, global = true)]
    pub no_clear: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(file) = &self.file {
            config.taskfile = Some(file.clone());
        }
        if self.no_color {
            config.color = false;
        }
        if self.no_clear {
            config.clear_screen = false;
        }
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the task list and exit
    List,
}
