//! linebridge command-line entry point

use clap::Parser;
use linebridge_cli::commands::Commands;

/// Read files as capped line streams or fixed-size windows
#[derive(Debug, Parser)]
#[command(name = "linebridge", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output and logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    linebridge_cli::init_logging(cli.verbose, cli.quiet);
    log::debug!("Arguments: {:?}", cli);

    cli.command.execute(cli.quiet).await
}
