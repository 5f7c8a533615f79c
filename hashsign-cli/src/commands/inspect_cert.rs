use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

/**
    Inspect an X.509 certificate.
*/
#[derive(Args)]
pub struct InspectCertCommand {
    /// Path to the certificate (DER, PEM, or base64 DER).
    pub path: PathBuf,
}

impl InspectCertCommand {
    pub fn run(self) -> Result<()> {
        let data = std::fs::read(&self.path).context("failed to read certificate file")?;
        let der = hashsign::decode_certificate(&data).context("failed to parse certificate")?;
        let info = hashsign::inspect_certificate_info(&der).context("failed to inspect certificate")?;

        println!("Subject:     {}", info.subject);
        println!("Issuer:      {}", info.issuer);
        println!("Serial:      {}", info.serial);
        println!("Not Before:  {}", info.not_before);
        println!("Not After:   {}", info.not_after);
        match info.key_bits {
            Some(bits) => println!("Public Key:  {} ({bits} bits)", info.key_algorithm),
            None => println!("Public Key:  {} (unsupported)", info.key_algorithm),
        }

        Ok(())
    }
}
