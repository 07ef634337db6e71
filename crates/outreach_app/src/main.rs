mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let config = platform::config::Cli::parse();
    platform::run(config)
}
