//! Terminal panel: wires the core state machine to storage, the engine and stdout.
pub mod config;

mod app;
mod desktop;
mod effects;
mod logging;
mod persistence;
mod ui;

use std::fs;

use anyhow::Context;
use outreach_engine::{Extractor, LinkedInExtractor};

use config::{Cli, Command};

pub fn run(config: Cli) -> anyhow::Result<()> {
    logging::initialize(config.log);
    match &config.command {
        Some(Command::Inspect { file }) => inspect(file),
        Some(Command::Panel) | None => app::run_panel(&config),
    }
}

/// Prints the signals and the hiring breakdown of a saved profile page.
fn inspect(file: &std::path::Path) -> anyhow::Result<()> {
    let html = fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let report = LinkedInExtractor::default().inspect(&html);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
