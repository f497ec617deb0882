//! Normalize command
//!
//! Usage: gematria normalize <PHRASE>

use clap::Args;
use gematria_core::gematria::normalize;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Raw text to normalize
    pub phrase: String,
}

/// Execute normalize command
pub fn execute(args: NormalizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", normalize(&args.phrase));
    Ok(())
}
