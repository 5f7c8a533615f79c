use rsa::rand_core::OsRng;
use rsa::{Pkcs1v15Encrypt, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::error::{HashSignError, HashSignResult};
use crate::types::Algorithm;

/**
    RSASSA-PKCS1-v1_5 over a precomputed SHA-256 digest.

    The digest is wrapped in the SHA-256 DigestInfo and signed directly; it is
    NOT hashed again. The primitive requires exactly 32 bytes and reports any
    other length as a signing failure.

    PKCS#1 v1.5 padding is deterministic, so the same key and digest always
    produce the same signature. The random source only feeds blinding.
*/
pub fn rsa_pkcs1v15_sign(key: &RsaPrivateKey, digest: &[u8]) -> HashSignResult<Vec<u8>> {
    key.sign_with_rng(&mut OsRng, Pkcs1v15Sign::new::<Sha256>(), digest)
        .map_err(|e| HashSignError::SigningFailed {
            algorithm: Algorithm::Rsa,
            reason: e.to_string(),
        })
}

/**
    RSASSA-PKCS1-v1_5 verification with the SHA-256 DigestInfo.

    Wrong signature length, bad padding and mismatched digests all surface as
    [`HashSignError::VerificationFailed`].
*/
pub fn rsa_pkcs1v15_verify(
    key: &RsaPublicKey,
    digest: &[u8],
    signature: &[u8],
) -> HashSignResult<()> {
    key.verify(Pkcs1v15Sign::new::<Sha256>(), digest, signature)
        .map_err(|_| HashSignError::VerificationFailed(Algorithm::Rsa))
}

/**
    RSAES-PKCS1-v1_5 encryption. Output is modulus-length bytes.
*/
pub fn rsa_pkcs1v15_encrypt(key: &RsaPublicKey, plaintext: &[u8]) -> HashSignResult<Vec<u8>> {
    key.encrypt(&mut OsRng, Pkcs1v15Encrypt, plaintext)
        .map_err(|e| HashSignError::EncryptionFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rsa::pkcs1::DecodeRsaPrivateKey;

    use super::*;

    fn test_private_key() -> RsaPrivateKey {
        let pem = include_str!("../../testfiles/rsa2048_pkcs1.pem");
        RsaPrivateKey::from_pkcs1_pem(pem).unwrap()
    }

    const HELLO_SHA256: [u8; 32] =
        hex!("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824");

    #[test]
    fn sign_matches_openssl() {
        let expected = include_bytes!("../../testfiles/hello.rsa2048.sig");
        let signature = rsa_pkcs1v15_sign(&test_private_key(), &HELLO_SHA256).unwrap();
        assert_eq!(signature.len(), 256);
        assert_eq!(signature, expected);
    }

    #[test]
    fn sign_is_deterministic() {
        let key = test_private_key();
        let a = rsa_pkcs1v15_sign(&key, &HELLO_SHA256).unwrap();
        let b = rsa_pkcs1v15_sign(&key, &HELLO_SHA256).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sign_rejects_non_sha256_length() {
        let err = rsa_pkcs1v15_sign(&test_private_key(), &[0u8; 20]).unwrap_err();
        assert!(matches!(err, HashSignError::SigningFailed { algorithm: Algorithm::Rsa, .. }));
    }

    #[test]
    fn verify_rejects_truncated_signature() {
        let key = test_private_key();
        let signature = rsa_pkcs1v15_sign(&key, &HELLO_SHA256).unwrap();
        let err = rsa_pkcs1v15_verify(&key.to_public_key(), &HELLO_SHA256, &signature[..255])
            .unwrap_err();
        assert!(matches!(err, HashSignError::VerificationFailed(Algorithm::Rsa)));
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = test_private_key();
        let ciphertext = rsa_pkcs1v15_encrypt(&key.to_public_key(), b"hello").unwrap();
        assert_eq!(ciphertext.len(), 256);
        assert_eq!(key.decrypt(Pkcs1v15Encrypt, &ciphertext).unwrap(), b"hello");
    }

    #[test]
    fn encrypt_rejects_oversized_plaintext() {
        // PKCS#1 v1.5 leaves at most k - 11 bytes for the message
        let err = rsa_pkcs1v15_encrypt(&test_private_key().to_public_key(), &[0u8; 246])
            .unwrap_err();
        assert!(matches!(err, HashSignError::EncryptionFailed(_)));
    }
}
