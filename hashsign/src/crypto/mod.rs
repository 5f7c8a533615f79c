/*!
    Digest signing and verification.

    - RSA: PKCS#1 v1.5 with the SHA-256 DigestInfo prefix, over a digest
      the caller has already computed.
    - ECDSA: `(r, s)` over the raw digest bytes, on the curve of the key
      (P-256 or P-384). Nonces come from the OS random source.

    Both key families implement the same two traits so callers dispatch on
    the key enum once and never inspect concrete key types.
*/

mod ecdsa;
mod rsa;

pub use self::rsa::rsa_pkcs1v15_encrypt;

use crate::encoding::EcdsaSignature;
use crate::error::{HashSignError, HashSignResult};
use crate::key::{PrivateKey, PublicKey};
use crate::types::{Algorithm, Curve, SignatureFormat};

/**
    Signature value as produced by a key, before any transport encoding.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSignature {
    /// PKCS#1 v1.5 signature, exactly modulus-length bytes.
    Pkcs1v15(Vec<u8>),
    /// ECDSA `(r, s)` and the curve it was produced on.
    Ecdsa { signature: EcdsaSignature, curve: Curve },
}

impl RawSignature {
    /**
        Transport bytes. RSA signatures pass through unchanged and ignore
        `format`; ECDSA signatures are serialized as DER or P1363.
    */
    pub fn encode(&self, format: SignatureFormat) -> HashSignResult<Vec<u8>> {
        match self {
            Self::Pkcs1v15(bytes) => Ok(bytes.clone()),
            Self::Ecdsa { signature, curve } => signature.encode(format, curve.bit_size()),
        }
    }
}

/**
    Signs a precomputed digest.
*/
pub trait DigestSigner {
    fn sign_digest(&self, digest: &[u8]) -> HashSignResult<RawSignature>;
}

/**
    Verifies an encoded signature over a precomputed digest.

    RSA takes the PKCS#1 v1.5 blob. ECDSA takes DER, or P1363 when the
    bytes are not DER.
*/
pub trait DigestVerifier {
    fn verify_digest(&self, digest: &[u8], signature: &[u8]) -> HashSignResult<()>;
}

impl DigestSigner for PrivateKey {
    fn sign_digest(&self, digest: &[u8]) -> HashSignResult<RawSignature> {
        let signature = match self {
            Self::Rsa(key) => RawSignature::Pkcs1v15(rsa::rsa_pkcs1v15_sign(key, digest)?),
            Self::Ecdsa(key) => RawSignature::Ecdsa {
                signature: ecdsa::ecdsa_sign_prehash(key, digest)?,
                curve: key.curve(),
            },
        };
        tracing::debug!(
            "signed {}-byte digest with {}",
            digest.len(),
            self.description()
        );
        Ok(signature)
    }
}

impl DigestVerifier for PublicKey {
    fn verify_digest(&self, digest: &[u8], signature: &[u8]) -> HashSignResult<()> {
        match self {
            Self::Rsa(key) => rsa::rsa_pkcs1v15_verify(key, digest, signature),
            Self::Ecdsa(key) => ecdsa::ecdsa_verify_encoded(key, digest, signature),
        }
    }
}

/**
    Sign with an optional key. A missing key is reported as
    [`HashSignError::KeyUnavailable`], never as a signing failure.
*/
pub fn sign(
    key: Option<&PrivateKey>,
    algorithm: Algorithm,
    digest: &[u8],
) -> HashSignResult<RawSignature> {
    let key = key.ok_or(HashSignError::KeyUnavailable(algorithm))?;
    if key.algorithm() != algorithm {
        return Err(HashSignError::KeyTypeMismatch {
            expected: algorithm,
            actual: key.algorithm().to_string(),
        });
    }
    key.sign_digest(digest)
}
