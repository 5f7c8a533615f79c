use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

/**
    Verify a signature over a digest with a certificate's public key.
*/
#[derive(Args)]
pub struct VerifyCommand {
    /// Certificate: a DER or PEM file, or base64 DER.
    #[arg(long)]
    pub certificate: String,

    /// Base64 digest that was signed.
    #[arg(long)]
    pub digest: String,

    /// Base64 signature (PKCS#1 v1.5 for RSA, DER or P1363 for ECDSA).
    #[arg(long)]
    pub signature: String,
}

impl VerifyCommand {
    pub fn run(self) -> Result<()> {
        let path = Path::new(&self.certificate);
        let algorithm = if path.is_file() {
            let certificate = read_certificate(path)?;
            let digest = hashsign::decode_base64(&self.digest, "digest")?;
            let signature = hashsign::decode_base64(&self.signature, "signature")?;
            hashsign::verify(&certificate, &digest, &signature)
        } else {
            hashsign::verify_base64(&self.certificate, &self.digest, &self.signature)
        }
        .context("signature verification failed")?;

        println!("Algorithm:  {algorithm}");
        println!("Signature:  valid");
        Ok(())
    }
}

fn read_certificate(path: &Path) -> Result<Vec<u8>> {
    let data =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    hashsign::decode_certificate(&data).context("failed to parse certificate")
}
