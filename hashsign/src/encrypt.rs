use crate::crypto::rsa_pkcs1v15_encrypt;
use crate::error::{HashSignError, HashSignResult};
use crate::key::PublicKey;
use crate::utils::decode_base64;

/**
    Encrypt `data` to an RSA public key with RSAES-PKCS1-v1_5.

    `public_key` is a base64 SubjectPublicKeyInfo (the body of a
    `PUBLIC KEY` PEM block without its armour). Non-RSA keys are rejected.
*/
pub fn encrypt_with_public_key(public_key: &str, data: &[u8]) -> HashSignResult<Vec<u8>> {
    let der = decode_base64(public_key, "public key")?;
    let key = match PublicKey::from_spki_der(&der) {
        Ok(PublicKey::Rsa(key)) => key,
        Ok(other) => {
            return Err(HashSignError::UnsupportedKeyType(format!(
                "{} (encryption requires RSA)",
                other.algorithm()
            )));
        }
        Err(HashSignError::CertificateParse(reason)) => {
            return Err(HashSignError::EncryptionFailed(format!("invalid public key: {reason}")));
        }
        Err(e) => return Err(e),
    };
    rsa_pkcs1v15_encrypt(&key, data)
}
