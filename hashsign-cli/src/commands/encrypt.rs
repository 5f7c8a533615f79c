use anyhow::{Context, Result};
use clap::Args;
use data_encoding::BASE64;

/**
    Encrypt data to an RSA public key (PKCS#1 v1.5).
*/
#[derive(Args)]
pub struct EncryptCommand {
    /// Base64 SubjectPublicKeyInfo, i.e. a PUBLIC KEY PEM body without armour.
    #[arg(long)]
    pub public_key: String,

    /// Text to encrypt.
    #[arg(long)]
    pub data: String,
}

impl EncryptCommand {
    pub fn run(self) -> Result<()> {
        let ciphertext = hashsign::encrypt_with_public_key(&self.public_key, self.data.as_bytes())
            .context("failed to encrypt data")?;
        println!("{}", BASE64.encode(&ciphertext));
        Ok(())
    }
}
