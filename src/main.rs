//! CLI entry point for the lozenge tiling sampler

use clap::Parser;
use lozenge::io::cli::{Cli, SamplingRun};
use tracing_subscriber::EnvFilter;

fn main() -> lozenge::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let run = SamplingRun::new(cli);
    run.process()?;
    Ok(())
}
