#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, Config};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_telemetry();

    if cfg!(debug_assertions) {
        tracing::debug!("Running with config: {:#?}", config);
    }

    let stdout = std::io::stdout();
    commands::run(&config, &mut stdout.lock())
}
