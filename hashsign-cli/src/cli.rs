use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hashsign::Config;

use crate::commands::{
    CertificatesCommand, DigestSummaryCommand, EncryptCommand, InspectCertCommand, SignCommand,
    SignEccCommand, VerificationCodeCommand, VerifyCommand,
};

/**
    Sign and verify digests with RSA and ECDSA keys.
*/
#[derive(Parser)]
#[command(name = "hashsign", version)]
pub struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

/**
    Key and certificate settings. Each falls back to its environment
    variable; values under `/run/secrets/` are read from that file.
*/
#[derive(Args)]
struct Settings {
    /// RSA private key (PEM, PKCS#1 or PKCS#8).
    #[arg(long, global = true, env = hashsign::ENV_RSA_KEY)]
    pem_file: Option<String>,

    /// ECDSA private key (PEM, PKCS#8).
    #[arg(long, global = true, env = hashsign::ENV_ECDSA_KEY)]
    ec_pem_file: Option<String>,

    /// RSA authentication certificate (base64 DER).
    #[arg(long, global = true, env = hashsign::ENV_RSA_AUTH_CERT, hide_env_values = true)]
    rsa_auth_cert: Option<String>,

    /// RSA signing certificate (base64 DER).
    #[arg(long, global = true, env = hashsign::ENV_RSA_SIGN_CERT, hide_env_values = true)]
    rsa_sign_cert: Option<String>,

    /// ECDSA authentication certificate (base64 DER).
    #[arg(long, global = true, env = hashsign::ENV_ECDSA_AUTH_CERT, hide_env_values = true)]
    ecdsa_auth_cert: Option<String>,

    /// ECDSA signing certificate (base64 DER).
    #[arg(long, global = true, env = hashsign::ENV_ECDSA_SIGN_CERT, hide_env_values = true)]
    ecdsa_sign_cert: Option<String>,
}

impl Settings {
    fn config(&self) -> Config {
        Config::from_lookup(|name| {
            let value = match name {
                hashsign::ENV_RSA_KEY => &self.pem_file,
                hashsign::ENV_ECDSA_KEY => &self.ec_pem_file,
                hashsign::ENV_RSA_AUTH_CERT => &self.rsa_auth_cert,
                hashsign::ENV_RSA_SIGN_CERT => &self.rsa_sign_cert,
                hashsign::ENV_ECDSA_AUTH_CERT => &self.ecdsa_auth_cert,
                hashsign::ENV_ECDSA_SIGN_CERT => &self.ecdsa_sign_cert,
                _ => return None,
            };
            value.clone()
        })
    }
}

#[derive(Subcommand)]
enum Command {
    /// Sign base64 digests with the RSA key (PKCS#1 v1.5, SHA-256).
    Sign(SignCommand),
    /// Sign a base64 digest with the ECDSA key.
    SignEcc(SignEccCommand),
    /// Verify a signature against a certificate.
    Verify(VerifyCommand),
    /// Print the configured certificates.
    Certificates(CertificatesCommand),
    /// Inspect an X.509 certificate.
    InspectCert(InspectCertCommand),
    /// Hash base64 data with SHA-256, SHA-384 or SHA-512.
    DigestSummary(DigestSummaryCommand),
    /// Compute the four-digit verification code of a digest.
    VerificationCode(VerificationCodeCommand),
    /// Encrypt data to an RSA public key.
    Encrypt(EncryptCommand),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = self.settings.config();
        match self.command {
            Command::Sign(cmd) => cmd.run(&config),
            Command::SignEcc(cmd) => cmd.run(&config),
            Command::Verify(cmd) => cmd.run(),
            Command::Certificates(cmd) => cmd.run(&config),
            Command::InspectCert(cmd) => cmd.run(),
            Command::DigestSummary(cmd) => cmd.run(),
            Command::VerificationCode(cmd) => cmd.run(),
            Command::Encrypt(cmd) => cmd.run(),
        }
    }
}
