//! platkit — command-line frontend for `platkit-core`.
//!
//! Parses arguments, loads the TOML configuration, sets up logging and
//! dispatches to the matching subcommand handler.

mod cli;
mod commands;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use platkit_core::config::settings::LogConfig;
use platkit_core::Config;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_tracing(&config.log, args.debug)?;
    tracing::debug!(?config, "configuration loaded");

    commands::execute(args.command, &config)
}

/// An explicit `--config` must exist; the per-user default is optional.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display())),
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(&path)
                .with_context(|| format!("failed to load config '{}'", path.display())),
            None => Ok(Config::default()),
        },
    }
}

fn init_tracing(log: &LogConfig, debug_flag: bool) -> anyhow::Result<()> {
    let level = if debug_flag || log.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &log.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}
