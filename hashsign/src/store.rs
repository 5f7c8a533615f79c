/*!
    Loaded signing keys and the signing operations built on them.
*/

use std::path::Path;

use data_encoding::BASE64;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::crypto;
use crate::error::HashSignResult;
use crate::key::{PrivateKey, load_private_key};
use crate::types::{Algorithm, SignatureFormat};
use crate::utils::decode_base64;

/// `signatureMethod` reported for RSA signatures.
pub const RSA_SIGNATURE_METHOD: &str = "PKCS1v15";

/**
    Private keys held for the lifetime of the process.

    Either slot may be empty; signing with an empty slot fails with
    [`HashSignError::KeyUnavailable`](crate::HashSignError::KeyUnavailable)
    while the other slot keeps working.
*/
#[derive(Debug, Clone, Default)]
pub struct KeyStore {
    rsa: Option<PrivateKey>,
    ecdsa: Option<PrivateKey>,
}

/**
    One digest to sign, as submitted by a caller.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Standard base64 digest.
    pub hash: String,
}

/**
    A produced signature, echoing the request.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashSignature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// `PKCS1v15`, `DER` or `P1363`.
    pub signature_method: String,
    pub hash: String,
    /// Standard base64 signature.
    pub signature_value: String,
}

impl KeyStore {
    pub fn new(rsa: Option<PrivateKey>, ecdsa: Option<PrivateKey>) -> Self {
        Self { rsa, ecdsa }
    }

    /**
        Load both keys named by `config`.

        A key that is unset or fails to load leaves its slot empty. The error
        is logged and never aborts startup.
    */
    pub fn load(config: &Config) -> Self {
        let load = |path: Option<&Path>, algorithm| {
            let path = path.unwrap_or(Path::new(""));
            match load_private_key(path, algorithm) {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!("{algorithm} signing disabled: {e}");
                    None
                }
            }
        };
        Self {
            rsa: load(config.rsa_key_path.as_deref(), Algorithm::Rsa),
            ecdsa: load(config.ecdsa_key_path.as_deref(), Algorithm::Ecdsa),
        }
    }

    pub fn rsa(&self) -> Option<&PrivateKey> {
        self.rsa.as_ref()
    }

    pub fn ecdsa(&self) -> Option<&PrivateKey> {
        self.ecdsa.as_ref()
    }

    /// No key loaded at all.
    pub fn is_empty(&self) -> bool {
        self.rsa.is_none() && self.ecdsa.is_none()
    }

    /**
        PKCS#1 v1.5 / SHA-256 signature over a 32-byte digest.
    */
    pub fn sign_rsa(&self, digest: &[u8]) -> HashSignResult<Vec<u8>> {
        // RSA signatures have a single encoding
        crypto::sign(self.rsa(), Algorithm::Rsa, digest)?.encode(SignatureFormat::default())
    }

    /**
        ECDSA signature over the raw digest, encoded as `format`.
    */
    pub fn sign_ecdsa(&self, digest: &[u8], format: SignatureFormat) -> HashSignResult<Vec<u8>> {
        crypto::sign(self.ecdsa(), Algorithm::Ecdsa, digest)?.encode(format)
    }
}

/**
    Sign a batch of base64 digests with the RSA key.

    All-or-nothing: the first undecodable digest or signing failure is
    returned and no signatures are produced.
*/
pub fn sign_base64_rsa(
    store: &KeyStore,
    requests: &[HashRequest],
) -> HashSignResult<Vec<HashSignature>> {
    let signatures = requests
        .iter()
        .map(|request| {
            let digest = decode_base64(&request.hash, "hash")?;
            let signature = store.sign_rsa(&digest)?;
            Ok(HashSignature {
                session_id: request.session_id.clone(),
                signature_method: RSA_SIGNATURE_METHOD.to_owned(),
                hash: request.hash.clone(),
                signature_value: BASE64.encode(&signature),
            })
        })
        .collect::<HashSignResult<Vec<_>>>()?;

    for signature in &signatures {
        tracing::info!("hash {} signed with RSA", signature.hash);
    }
    Ok(signatures)
}

/**
    Sign one base64 digest with the ECDSA key.
*/
pub fn sign_base64_ecdsa(
    store: &KeyStore,
    hash: &str,
    format: SignatureFormat,
) -> HashSignResult<HashSignature> {
    let digest = decode_base64(hash, "hash")?;
    let signature = store.sign_ecdsa(&digest, format)?;
    tracing::info!("hash {hash} signed with ECDSA ({format})");
    Ok(HashSignature {
        session_id: None,
        signature_method: format.to_name().to_owned(),
        hash: hash.to_owned(),
        signature_value: BASE64.encode(&signature),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::HashSignError;

    const RSA_KEY: &str = include_str!("../testfiles/rsa2048_pkcs1.pem");
    const EC_KEY: &str = include_str!("../testfiles/ec_p256.pem");
    const HELLO_B64: &str = "LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ=";

    fn full_store() -> KeyStore {
        KeyStore::new(
            Some(PrivateKey::from_pem(RSA_KEY, Algorithm::Rsa).unwrap()),
            Some(PrivateKey::from_pem(EC_KEY, Algorithm::Ecdsa).unwrap()),
        )
    }

    fn request(session_id: Option<&str>, hash: &str) -> HashRequest {
        HashRequest {
            session_id: session_id.map(str::to_owned),
            hash: hash.to_owned(),
        }
    }

    #[test]
    fn empty_store() {
        let store = KeyStore::default();
        assert!(store.is_empty());
        let err = store.sign_rsa(&[0u8; 32]).unwrap_err();
        assert!(matches!(err, HashSignError::KeyUnavailable(Algorithm::Rsa)));
        let err = store.sign_ecdsa(&[0u8; 32], SignatureFormat::Der).unwrap_err();
        assert!(matches!(err, HashSignError::KeyUnavailable(Algorithm::Ecdsa)));
    }

    #[test]
    fn one_slot_degrades_independently() {
        let ecdsa = PrivateKey::from_pem(EC_KEY, Algorithm::Ecdsa).unwrap();
        let store = KeyStore::new(None, Some(ecdsa));
        assert!(!store.is_empty());
        assert!(store.sign_rsa(&[0u8; 32]).is_err());
        let signature = store.sign_ecdsa(&[0u8; 32], SignatureFormat::P1363).unwrap();
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn load_from_config() {
        let mut rsa = tempfile::NamedTempFile::new().unwrap();
        rsa.write_all(RSA_KEY.as_bytes()).unwrap();
        let mut bad = tempfile::NamedTempFile::new().unwrap();
        bad.write_all(RSA_KEY.as_bytes()).unwrap();

        // RSA key in the ECDSA slot fails and leaves that slot empty
        let store = KeyStore::load(&Config {
            rsa_key_path: Some(rsa.path().to_owned()),
            ecdsa_key_path: Some(bad.path().to_owned()),
            ..Config::default()
        });
        assert!(store.rsa().is_some());
        assert!(store.ecdsa().is_none());
    }

    #[test]
    fn rsa_batch() {
        let store = full_store();
        let signatures = sign_base64_rsa(
            &store,
            &[request(Some("a"), HELLO_B64), request(None, HELLO_B64)],
        )
        .unwrap();

        assert_eq!(signatures.len(), 2);
        assert_eq!(signatures[0].session_id.as_deref(), Some("a"));
        assert_eq!(signatures[1].session_id, None);
        assert_eq!(signatures[0].signature_method, "PKCS1v15");
        assert_eq!(signatures[0].hash, HELLO_B64);
        let expected = BASE64.encode(include_bytes!("../testfiles/hello.rsa2048.sig"));
        assert_eq!(signatures[0].signature_value, expected);
        assert_eq!(signatures[1].signature_value, expected);
    }

    #[test]
    fn rsa_batch_is_atomic() {
        let store = full_store();
        let err = sign_base64_rsa(
            &store,
            &[request(None, HELLO_B64), request(Some("bad"), "***")],
        )
        .unwrap_err();
        assert!(matches!(err, HashSignError::InvalidBase64(_)));
    }

    #[test]
    fn empty_batch() {
        assert!(sign_base64_rsa(&full_store(), &[]).unwrap().is_empty());
    }

    #[test]
    fn ecdsa_single() {
        let store = full_store();
        let signature = sign_base64_ecdsa(&store, HELLO_B64, SignatureFormat::P1363).unwrap();
        assert_eq!(signature.signature_method, "P1363");
        assert_eq!(BASE64.decode(signature.signature_value.as_bytes()).unwrap().len(), 64);
    }

    #[test]
    fn json_field_names() {
        let signature = HashSignature {
            session_id: None,
            signature_method: "DER".into(),
            hash: "aGFzaA==".into(),
            signature_value: "c2ln".into(),
        };
        assert_eq!(
            serde_json::to_string(&signature).unwrap(),
            r#"{"signatureMethod":"DER","hash":"aGFzaA==","signatureValue":"c2ln"}"#
        );

        let request: HashRequest =
            serde_json::from_str(r#"{"sessionId":"42","hash":"aGFzaA=="}"#).unwrap();
        assert_eq!(request.session_id.as_deref(), Some("42"));
    }

    #[test]
    fn key_store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KeyStore>();
    }
}
