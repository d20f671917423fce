//! agentplan CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use agentplan_cli::cmd;
use agentplan_cli::{Cli, Commands};

fn main() -> Result<()> {
    // Logs go to stderr so plan output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { format } => cmd::plan::plan(&cli.request, format),
        Commands::Check => cmd::check::check(&cli.request),
        Commands::Platforms => {
            cmd::check::platforms();
            Ok(())
        }
        Commands::Digest => cmd::digest::digest(&cli.request),
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
