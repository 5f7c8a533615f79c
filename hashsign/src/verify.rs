/*!
    Signature verification against a certificate's public key.
*/

use crate::cert::inspect;
use crate::crypto::DigestVerifier;
use crate::error::HashSignResult;
use crate::types::Algorithm;
use crate::utils::decode_base64;

/**
    Verify `signature` over `digest` with the public key of a DER certificate.

    RSA expects a PKCS#1 v1.5 / SHA-256 signature. ECDSA accepts DER and,
    when the bytes are not DER, fixed-width P1363. Certificate validity,
    issuer and extensions are not checked.

    Returns the algorithm of the certificate key on success.
*/
pub fn verify(
    certificate_der: &[u8],
    digest: &[u8],
    signature: &[u8],
) -> HashSignResult<Algorithm> {
    let (public_key, algorithm) = inspect(certificate_der)?;
    match public_key.verify_digest(digest, signature) {
        Ok(()) => {
            tracing::debug!("{algorithm} signature verified");
            Ok(algorithm)
        }
        Err(e) => {
            tracing::debug!("{algorithm} signature rejected: {e}");
            Err(e)
        }
    }
}

/**
    [`verify`] with every input as standard base64.
*/
pub fn verify_base64(
    certificate: &str,
    digest: &str,
    signature: &str,
) -> HashSignResult<Algorithm> {
    let certificate = decode_base64(certificate, "certificate")?;
    let digest = decode_base64(digest, "digest")?;
    let signature = decode_base64(signature, "signature")?;
    verify(&certificate, &digest, &signature)
}
