//! SwiftTest CLI - Main Entry Point
//!
//! Normalizes the SwiftTranslator test workbook into a JSON snapshot and runs
//! the resulting scenarios in a browser.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use swifttest_cli::commands::{inspect, list, run, update};
use swifttest_cli::output::OutputFormat;
use swifttest_common::{HarnessConfig, DEFAULT_CONFIG_FILE};

/// SwiftTest - Spreadsheet-Driven SwiftTranslator Tests
#[derive(Parser)]
#[command(name = "swifttest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults apply when it does not exist)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true, env = "SWIFTTEST_CONFIG")]
    config: PathBuf,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the JSON snapshot from the workbook
    Update(update::UpdateArgs),

    /// Show a sheet's headers and first data row
    Inspect(inspect::InspectArgs),

    /// List normalized test cases
    List(list::ListArgs),

    /// Run browser scenarios
    Run(run::RunArgs),

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

    let config = HarnessConfig::load(&cli.config)?;

    match cli.command {
        Commands::Update(args) => update::execute(args, config)?,
        Commands::Inspect(args) => inspect::execute(args, config, cli.format)?,
        Commands::List(args) => list::execute(args, config, cli.format)?,
        Commands::Run(args) => {
            if !run::execute(args, config, cli.format).await? {
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("SwiftTest CLI v{}", swifttest_common::VERSION);
        }
    }

    Ok(())
}
