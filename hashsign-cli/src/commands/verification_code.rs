use anyhow::{Context, Result};
use clap::Args;

/**
    Compute the verification code shown to a user before signing.
*/
#[derive(Args)]
pub struct VerificationCodeCommand {
    /// Base64 digest.
    #[arg(long)]
    pub hash: String,
}

impl VerificationCodeCommand {
    pub fn run(self) -> Result<()> {
        let code = hashsign::verification_code(&self.hash)
            .context("failed to calculate verification code")?;
        println!("{code:04}");
        Ok(())
    }
}
