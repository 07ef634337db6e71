use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use outreach_engine::{FetchSettings, GenerationSettings, DEFAULT_ENDPOINT, DEFAULT_MODEL};

#[derive(Debug, Parser)]
#[command(name = "outreach", version, about = "Drafts outreach messages for LinkedIn profiles")]
pub struct Cli {
    /// Directory holding the saved resume and API key.
    #[arg(long, default_value = ".outreach")]
    pub settings_dir: PathBuf,

    /// Chat completions endpoint.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Read pages from saved `<slug>.html` files instead of fetching them.
    #[arg(long)]
    pub snapshots: Option<PathBuf>,

    /// Seconds before a page fetch is abandoned.
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout: u64,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Interactive panel (default).
    Panel,
    /// Print the signals extracted from a saved profile page as JSON.
    Inspect { file: PathBuf },
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogDestination {
    /// Write to ./outreach.log in current directory.
    File,
    /// Write to terminal (stderr and stdout).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl Cli {
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            ..GenerationSettings::default()
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_secs(self.fetch_timeout.max(1)),
            ..FetchSettings::default()
        }
    }
}
