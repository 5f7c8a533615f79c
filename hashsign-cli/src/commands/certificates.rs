use anyhow::{Context, Result};
use clap::Args;
use hashsign::{Algorithm, CertificateStore, CertificateUsage, Config};

use super::print_json;

/**
    Print the configured certificates.
*/
#[derive(Args)]
pub struct CertificatesCommand {
    /// Key family: `rsa` or `ecdsa`.
    #[arg(long)]
    pub key: Option<Algorithm>,

    /// Certificate usage: `auth` or `sign`. Requires `--key`.
    #[arg(long = "type")]
    pub usage: Option<CertificateUsage>,

    /// Only check that every configured certificate matches its key family.
    #[arg(long)]
    pub check: bool,
}

impl CertificatesCommand {
    pub fn run(self, config: &Config) -> Result<()> {
        let store = CertificateStore::from_config(config);

        if self.check {
            store.check().context("certificate check failed")?;
            eprintln!("All configured certificates match their key type");
            return Ok(());
        }

        if let Err(e) = store.check() {
            tracing::warn!("{e}");
        }

        let selection = store
            .select(self.key, self.usage)
            .context("no certificate to return")?;
        print_json(&selection)
    }
}
