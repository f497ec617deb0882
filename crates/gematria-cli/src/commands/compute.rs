//! Compute command
//!
//! Usage: gematria compute <PHRASE> [--explain]

use clap::Args;
use gematria_core::gematria::{breakdown, compute_value, normalize};

#[derive(Debug, Args)]
pub struct ComputeArgs {
    /// Phrase to value; marks and punctuation are ignored
    pub phrase: String,

    /// Print the per-letter breakdown
    #[arg(long)]
    pub explain: bool,
}

/// Execute compute command
pub fn execute(args: ComputeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let value = compute_value(&args.phrase);

    if args.explain {
        println!("normalized: {}", normalize(&args.phrase));
        for (letter, letter_value) in breakdown(&args.phrase) {
            println!("  {} = {}", letter, letter_value);
        }
        println!("total: {}", value);
    } else {
        println!("{}", value);
    }

    Ok(())
}
