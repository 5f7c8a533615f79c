use std::borrow::Cow;

use p256::elliptic_curve::rand_core::OsRng;
use signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};

use crate::encoding::{DerDecode, EcdsaSignature};
use crate::error::{HashSignError, HashSignResult};
use crate::key::{EcdsaPrivateKey, EcdsaPublicKey};
use crate::types::{Algorithm, Curve};
use crate::utils::left_pad;

/**
    Sign the raw digest bytes with a fresh random nonce.

    The digest is used as the prehash directly: longer digests are truncated
    to the curve order size, shorter ones (including empty) are read as the
    same integer.
*/
pub fn ecdsa_sign_prehash(key: &EcdsaPrivateKey, digest: &[u8]) -> HashSignResult<EcdsaSignature> {
    let sign_err = |e: ecdsa::Error| HashSignError::SigningFailed {
        algorithm: Algorithm::Ecdsa,
        reason: e.to_string(),
    };

    let digest = field_width_digest(digest, key.curve());
    let (r, s) = match key {
        EcdsaPrivateKey::P256(key) => {
            let sig: p256::ecdsa::Signature =
                key.sign_prehash_with_rng(&mut OsRng, &digest).map_err(sign_err)?;
            let (r, s) = sig.split_bytes();
            (r.to_vec(), s.to_vec())
        }
        EcdsaPrivateKey::P384(key) => {
            let sig: p384::ecdsa::Signature =
                key.sign_prehash_with_rng(&mut OsRng, &digest).map_err(sign_err)?;
            let (r, s) = sig.split_bytes();
            (r.to_vec(), s.to_vec())
        }
    };

    Ok(EcdsaSignature::new(&r, &s))
}

/**
    Verify an encoded signature: DER first, P1363 only when the bytes are
    not DER at all.

    A DER blob that decodes but does not verify is a verification failure,
    never retried as P1363.
*/
pub fn ecdsa_verify_encoded(
    key: &EcdsaPublicKey,
    digest: &[u8],
    signature: &[u8],
) -> HashSignResult<()> {
    let signature = match EcdsaSignature::from_der(signature) {
        DerDecode::Signature(sig) => sig,
        DerDecode::Negative => return Err(HashSignError::VerificationFailed(Algorithm::Ecdsa)),
        DerDecode::NotDer => EcdsaSignature::from_p1363(signature, key.curve().bit_size())?,
    };
    ecdsa_verify_prehash(key, digest, &signature)
}

/**
    Verify `(r, s)` over the raw digest bytes.
*/
pub fn ecdsa_verify_prehash(
    key: &EcdsaPublicKey,
    digest: &[u8],
    signature: &EcdsaSignature,
) -> HashSignResult<()> {
    let failed = || HashSignError::VerificationFailed(Algorithm::Ecdsa);

    // Fixed-width r || s for the curve; a component that does not fit can
    // never be a valid scalar.
    let width = key.curve().field_len();
    let mut bytes = left_pad(signature.r(), width).ok_or_else(failed)?;
    bytes.extend(left_pad(signature.s(), width).ok_or_else(failed)?);

    let digest = field_width_digest(digest, key.curve());
    match key {
        EcdsaPublicKey::P256(key) => {
            let sig = p256::ecdsa::Signature::from_slice(&bytes).map_err(|_| failed())?;
            key.verify_prehash(&digest, &sig).map_err(|_| failed())
        }
        EcdsaPublicKey::P384(key) => {
            let sig = p384::ecdsa::Signature::from_slice(&bytes).map_err(|_| failed())?;
            key.verify_prehash(&digest, &sig).map_err(|_| failed())
        }
    }
}

// Digests narrower than the field are zero-extended on the left, which keeps
// their integer value. Wider ones are passed through for truncation.
fn field_width_digest(digest: &[u8], curve: Curve) -> Cow<'_, [u8]> {
    let width = curve.field_len();
    if digest.len() >= width {
        return Cow::Borrowed(digest);
    }
    let mut padded = vec![0u8; width];
    padded[width - digest.len()..].copy_from_slice(digest);
    Cow::Owned(padded)
}
