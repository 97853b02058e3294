mod cli;
mod config;
mod terminal;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use cli::Cli;
use config::{AppConfig, DEFAULT_CONFIG_FILE};

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path, true)?,
        None => AppConfig::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
    }
    .with_overrides(cli.base_url.clone(), cli.timeout);

    triage_logging::initialize(&config.log_destination(cli.verbose), config.log_level()?);
    let settings = config
        .transport_settings()
        .context("invalid transport settings")?;

    terminal::run(cli.command, settings)
}
