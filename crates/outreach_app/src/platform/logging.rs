//! Logger setup for the panel.
//!
//! File logging goes to `./outreach.log`. Terminal logging uses stderr
//! because stdout belongs to the panel.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use super::config::LogDestination;

const LOG_PATH: &str = "./outreach.log";
const NOISY_TARGETS: [&str; 4] = ["hyper", "reqwest", "html5ever", "selectors"];

pub fn initialize(destination: LogDestination) {
    let level = LevelFilter::Info;
    let config = logger_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = file_logger(Path::new(LOG_PATH), level, config) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn logger_config() -> Config {
    let mut builder = ConfigBuilder::new();
    builder
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error);
    for target in NOISY_TARGETS {
        builder.add_filter_ignore_str(target);
    }
    builder.build()
}

fn file_logger(path: &Path, level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    File::create(path)
        .map(|file| WriteLogger::new(level, config, file))
        .map_err(|err| eprintln!("Warning: cannot write log file {}: {err}", path.display()))
        .ok()
}
