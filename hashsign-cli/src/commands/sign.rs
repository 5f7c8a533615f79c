use anyhow::{Context, Result, bail};
use clap::Args;
use hashsign::{Config, HashRequest, KeyStore};

use super::print_json;

/**
    Sign digests with the RSA key.
*/
#[derive(Args)]
pub struct SignCommand {
    /// Base64 SHA-256 digest. Repeat to sign a batch.
    #[arg(long = "hash", required = true)]
    pub hashes: Vec<String>,

    /// Session ID echoed back with the signature, paired with `--hash` by position.
    #[arg(long = "session-id")]
    pub session_ids: Vec<String>,
}

impl SignCommand {
    pub fn run(self, config: &Config) -> Result<()> {
        if self.session_ids.len() > self.hashes.len() {
            bail!(
                "{} session IDs given for {} hashes",
                self.session_ids.len(),
                self.hashes.len()
            );
        }

        let store = KeyStore::load(config);
        let mut session_ids = self.session_ids.into_iter();
        let requests: Vec<HashRequest> = self
            .hashes
            .into_iter()
            .map(|hash| HashRequest {
                session_id: session_ids.next(),
                hash,
            })
            .collect();

        let signatures =
            hashsign::sign_base64_rsa(&store, &requests).context("failed to sign hashes")?;

        match signatures.as_slice() {
            [signature] => print_json(signature),
            all => print_json(&all),
        }
    }
}
