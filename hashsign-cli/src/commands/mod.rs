mod certificates;
mod digest_summary;
mod encrypt;
mod inspect_cert;
mod sign;
mod sign_ecc;
mod verification_code;
mod verify;

pub use self::certificates::CertificatesCommand;
pub use self::digest_summary::DigestSummaryCommand;
pub use self::encrypt::EncryptCommand;
pub use self::inspect_cert::InspectCertCommand;
pub use self::sign::SignCommand;
pub use self::sign_ecc::SignEccCommand;
pub use self::verification_code::VerificationCodeCommand;
pub use self::verify::VerifyCommand;

/**
    Print a value as pretty JSON on stdout.
*/
fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
