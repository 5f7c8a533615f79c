use anyhow::{Context, Result};
use clap::Args;
use hashsign::HashAlgorithm;

use super::print_json;

/**
    Hash base64 data and print the digest in both base64 alphabets.
*/
#[derive(Args)]
pub struct DigestSummaryCommand {
    /// Data to hash, standard or URL-safe base64.
    #[arg(long)]
    pub digest: String,

    /// Hash algorithm: `sha256`, `sha384` or `sha512`.
    #[arg(long, default_value = "sha256")]
    pub hash: HashAlgorithm,
}

impl DigestSummaryCommand {
    pub fn run(self) -> Result<()> {
        let summary = hashsign::digest_summary(&self.digest, self.hash)
            .context("failed to calculate digest summary")?;
        print_json(&summary)
    }
}
