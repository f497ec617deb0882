//! Import commands
//!
//! Usage:
//!   gematria import strongs <PATH> [--max N] [--progress-every N] [--db PATH]
//!   gematria import text <PATH> [--max-words N] [--db PATH]

use clap::{Args, Subcommand};
use gematria_store::seed::{
    lemma_rows, parse_strongs_file, read_text_words, word_rows, ImportOptions,
};
use std::path::PathBuf;

use super::store_args::{print_report, StoreArgs};

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(subcommand)]
    pub command: ImportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ImportCommand {
    /// Import lemmas from a Strong's Hebrew dictionary JS file
    Strongs(StrongsArgs),
    /// Import unique Hebrew words from a UTF-8 text file
    Text(TextArgs),
}

#[derive(Debug, Args)]
pub struct StrongsArgs {
    /// Path to strongs-hebrew-dictionary.js
    pub path: PathBuf,

    /// Only consider the first N dictionary entries (0 = all)
    #[arg(long, default_value_t = 0)]
    pub max: usize,

    /// Log progress every N dictionary entries (0 disables)
    #[arg(long, default_value_t = 250)]
    pub progress_every: usize,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Path to a text file
    pub path: PathBuf,

    /// Stop after this many unique words (0 = all)
    #[arg(long, default_value_t = 0)]
    pub max_words: usize,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Execute import command
pub fn execute(args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ImportCommand::Strongs(strongs_args) => execute_strongs(strongs_args),
        ImportCommand::Text(text_args) => execute_text(text_args),
    }
}

fn execute_strongs(args: StrongsArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.path.exists() {
        return Err(format!("Dictionary file not found: {}", args.path.display()).into());
    }

    let lemmas = parse_strongs_file(&args.path)?;
    let options = ImportOptions {
        max_items: args.max,
        progress_every: args.progress_every,
    };
    let rows = lemma_rows(&lemmas, &options);
    println!(
        "Found {} unique phrases in {} dictionary entries.",
        rows.len(),
        lemmas.len()
    );

    let report = args.store.reconcile(rows)?;
    print_report(&report);
    Ok(())
}

fn execute_text(args: TextArgs) -> Result<(), Box<dyn std::error::Error>> {
    let words = read_text_words(&args.path, args.max_words)?;
    println!(
        "Found {} unique Hebrew words in {}.",
        words.len(),
        args.path.display()
    );

    let report = args.store.reconcile(word_rows(&words))?;
    print_report(&report);
    Ok(())
}
