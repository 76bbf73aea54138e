//! Agenda Demo - Main Entry Point
//!
//! Runs a scripted agenda session against synthetic reservations.
//!
//! Usage: `agenda-demo [--config <path>]`

use std::path::PathBuf;

use agenda_window::app::application::run_demo;
use agenda_window::helpers::{load_config, load_config_from};
use agenda_window::services::block_on;
use anyhow::{Context, bail};

fn parse_config_arg() -> anyhow::Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    let mut path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let Some(value) = args.next() else {
                    bail!("--config requires a path");
                };
                path = Some(PathBuf::from(value));
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(path)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting agenda demo...");

    let config = match parse_config_arg()? {
        Some(path) => load_config_from(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => load_config().context("failed to load config")?,
    };

    block_on(run_demo(config))?.context("demo session failed")?;
    Ok(())
}
