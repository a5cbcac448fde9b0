use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use tasktrack::config::Config;
use tasktrack::render::{Screen, format_list};
use tasktrack::session::Session;
use tasktrack::storage::TaskFile;

fn setup_logging(level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tasktrack")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tasktrack.log");

    // Log to a file so output never lands in the interactive display
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins over the configured level
    env_logger::Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn open_store(config: &Config) -> Result<TaskFile> {
    let store = match &config.taskfile {
        Some(path) => TaskFile::ensure_at(path.clone()),
        None => TaskFile::ensure_store(),
    };
    store.context("Failed to prepare task file")
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    let store = open_store(config)?;
    if cli.is_verbose() {
        eprintln!("{} {}", "Using task file:".yellow(), store.path().display());
    }

    let mut session = Session::open(store.clone())
        .with_context(|| format!("Failed to load tasks from {}", store.path().display()))?;

    match &cli.command {
        Some(Commands::List) => {
            print!("{}", format_list(session.tasks(), config.color));
            Ok(())
        }
        None => {
            let mut screen = Screen::new(io::stdout(), config.screen_options());
            session
                .run(io::stdin().lock(), &mut screen)
                .with_context(|| format!("Session for {} ended with an error", store.path().display()))
        }
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration, then let flags override it
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let level = if cli.is_verbose() {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };
    setup_logging(level).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
