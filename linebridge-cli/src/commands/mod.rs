//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod chunks;
pub mod generate_config;
pub mod lines;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the lines of a file or stdin, optionally capped
    Lines(lines::LinesArgs),

    /// Read a file in fixed-size windows with progress reporting
    Chunks(chunks::ChunksArgs),

    /// Write the default configuration as TOML
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub async fn execute(&self, quiet: bool) -> Result<()> {
        match self {
            Commands::Lines(args) => args.execute().await,
            Commands::Chunks(args) => args.execute(quiet).await,
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}
