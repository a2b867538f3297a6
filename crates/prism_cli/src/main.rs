//! Prism CLI
//!
//! Inspect and change the persisted theme selection and export the color
//! variables it resolves to.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use crate::cli::{Cli, Command};
use crate::commands::Session;
use crate::config::PrismConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = PrismConfig::load(cli.config.as_deref())?;
    let session = Session::open(&config)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::List => commands::list(&session, &mut out),
        Command::Status { json } => commands::status(&session, json, &mut out),
        Command::Mode { mode } => commands::set_mode(&session, mode.into(), &mut out),
        Command::Theme { name } => commands::set_theme(&session, &name, &mut out),
        Command::Toggle => commands::toggle(&session, &mut out),
        Command::Vars(args) => commands::vars(&session, &args, &mut out),
        Command::Watch { interval_ms, count } => commands::watch(
            &session,
            Duration::from_millis(interval_ms),
            count,
            &mut out,
        ),
    }
}
