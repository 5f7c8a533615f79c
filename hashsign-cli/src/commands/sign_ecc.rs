use anyhow::{Context, Result};
use clap::Args;
use hashsign::{Config, KeyStore, SignatureFormat};

use super::print_json;

/**
    Sign a digest with the ECDSA key.
*/
#[derive(Args)]
pub struct SignEccCommand {
    /// Base64 digest.
    #[arg(long)]
    pub hash: String,

    /// Signature encoding: `DER` (default) or `P1363`.
    #[arg(long)]
    pub signature_method: Option<String>,
}

impl SignEccCommand {
    pub fn run(self, config: &Config) -> Result<()> {
        let format = SignatureFormat::from_method(self.signature_method.as_deref())?;
        let store = KeyStore::load(config);
        let signature = hashsign::sign_base64_ecdsa(&store, &self.hash, format)
            .context("failed to sign hash")?;
        print_json(&signature)
    }
}
