//! Gematria CLI
//!
//! Command-line interface for computing gematria values and importing
//! phrase lists into the database

use clap::{Parser, Subcommand};
use gematria_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "gematria")]
#[command(about = "Gematria - compute and import Hebrew phrase values", long_about = None)]
struct Cli {
    /// Log output format: pretty or json
    #[arg(long, global = true, env = "GEMATRIA_LOG_FORMAT", default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute the value of a phrase
    Compute(commands::compute::ComputeArgs),
    /// Print the normalized form of a phrase
    Normalize(commands::normalize::NormalizeArgs),
    /// Import phrases from a dictionary or text source
    Import(commands::import::ImportArgs),
    /// Reconcile a JSON array of {phrase, value} objects
    Bulk(commands::bulk::BulkArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init(Profile::from_format(&cli.log_format));

    let result = match cli.command {
        Commands::Compute(args) => commands::compute::execute(args),
        Commands::Normalize(args) => commands::normalize::execute(args),
        Commands::Import(args) => commands::import::execute(args),
        Commands::Bulk(args) => commands::bulk::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
