//! Karabatch CLI - Main Entry Point
//!
//! Discovers Karate scenarios in a Maven project and runs selected batches
//! sequentially, one Maven process at a time.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{report, run, scan};

/// Karabatch - sequential Karate batch runner for Maven projects
#[derive(Parser)]
#[command(name = "karabatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover scenarios and their fixture files
    Scan(scan::ScanArgs),

    /// Run a batch of scenarios in order
    Run(run::RunArgs),

    /// Print the report location for a feature path
    Report(report::ReportArgs),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Scan(args) => scan::execute(args, cli.format),
        Commands::Run(args) => run::execute(args, cli.format).await,
        Commands::Report(args) => report::execute(args),
        Commands::Version => {
            println!("karabatch {}", karabatch_common::VERSION);
            Ok(())
        }
    }
}
