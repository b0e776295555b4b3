//! CLI entry point for the icon cloud generator

use clap::Parser;
use iconcloud::io::cli::{Cli, CloudProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> iconcloud::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut processor = CloudProcessor::new(cli);
    let written = processor.process()?;
    tracing::info!(images = written.len(), "done");
    Ok(())
}
