//! Command line entry point for trimming blank pages from scanned PDFs.

mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{coverage, process, run};
use logging::LogFormat;

/// Remove blank pages from scanned PDFs and archive them by scan date
#[derive(Parser)]
#[command(name = "scantrim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors, overrides -v
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every document currently in the source directory (default)
    Run,

    /// Trim blank pages from a single PDF
    Process(process::ProcessArgs),

    /// Report the ink coverage of a single JPEG
    Coverage(coverage::CoverageArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(logging::level(cli.verbose, cli.quiet), cli.log_format)?;

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run::run(&config),
        Commands::Process(args) => process::run(args, &config),
        Commands::Coverage(args) => coverage::run(args, &config),
    }
}
