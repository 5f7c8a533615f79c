/*!
    Key material: private keys loaded from PEM at startup, public keys
    extracted from certificates.

    Private keys are accepted as PKCS#1 (`RSA PRIVATE KEY`, RSA only) or
    PKCS#8 (`PRIVATE KEY`, RSA or ECDSA). The algorithm is decided by the
    parsed key itself, never by the PEM label, and must match the slot the
    key is loaded into.
*/

use std::fmt;
use std::path::Path;

use der::Decode;
use der::asn1::ObjectIdentifier;
use pkcs8::{DecodePrivateKey, DecodePublicKey, PrivateKeyInfo, SubjectPublicKeyInfoRef};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::constants::{
    OID_EC_PUBLIC_KEY, OID_RSA_ENCRYPTION, OID_SECP256R1, OID_SECP384R1, curve_name,
    key_algorithm_name,
};
use crate::error::{HashSignError, HashSignResult};
use crate::types::{Algorithm, Curve};
use crate::utils::decode_first_pem_block;

/**
    A loaded signing key. Immutable after load and safe to share across threads.
*/
#[derive(Clone)]
pub enum PrivateKey {
    Rsa(RsaPrivateKey),
    Ecdsa(EcdsaPrivateKey),
}

#[derive(Clone)]
pub enum EcdsaPrivateKey {
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
}

/**
    A verification key, as embedded in an X.509 certificate.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    Ecdsa(EcdsaPublicKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcdsaPublicKey {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
}

/**
    Load a private key for `algorithm` from a PEM file.

    An empty path means "no key configured" and yields `Ok(None)`; callers
    treat that as signing being unavailable for this algorithm.
*/
pub fn load_private_key(
    path: impl AsRef<Path>,
    algorithm: Algorithm,
) -> HashSignResult<Option<PrivateKey>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        tracing::warn!("{algorithm} private key path not set, {algorithm} signing disabled");
        return Ok(None);
    }

    let data = std::fs::read(path).map_err(|e| HashSignError::KeyFileRead {
        algorithm,
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let key = PrivateKey::from_pem(&data, algorithm)?;
    tracing::info!(
        "loaded {} private key from {}",
        key.description(),
        path.display()
    );
    Ok(Some(key))
}

impl PrivateKey {
    /**
        Parse the first PEM block of `data` as a private key of the expected algorithm.
    */
    pub fn from_pem(data: impl AsRef<[u8]>, expected: Algorithm) -> HashSignResult<Self> {
        let (_label, der) = decode_first_pem_block(data.as_ref())?;
        Self::from_der(&der, expected)
    }

    /**
        Parse a DER-encoded PKCS#8 or PKCS#1 private key.
    */
    pub fn from_der(der: &[u8], expected: Algorithm) -> HashSignResult<Self> {
        if let Ok(info) = PrivateKeyInfo::try_from(der) {
            return Self::from_pkcs8_info(der, &info, expected);
        }

        match expected {
            Algorithm::Rsa => RsaPrivateKey::from_pkcs1_der(der)
                .map(Self::Rsa)
                .map_err(|e| HashSignError::KeyParse {
                    algorithm: Algorithm::Rsa,
                    reason: format!("neither PKCS#8 nor PKCS#1: {e}"),
                }),
            Algorithm::Ecdsa => Err(HashSignError::KeyParse {
                algorithm: Algorithm::Ecdsa,
                reason: "not a PKCS#8 private key".into(),
            }),
        }
    }

    fn from_pkcs8_info(
        der: &[u8],
        info: &PrivateKeyInfo<'_>,
        expected: Algorithm,
    ) -> HashSignResult<Self> {
        let oid = info.algorithm.oid;
        let actual = if oid == OID_RSA_ENCRYPTION {
            Some(Algorithm::Rsa)
        } else if oid == OID_EC_PUBLIC_KEY {
            Some(Algorithm::Ecdsa)
        } else {
            None
        };

        if actual != Some(expected) {
            return Err(HashSignError::KeyTypeMismatch {
                expected,
                actual: key_algorithm_name(&oid),
            });
        }

        let parse_err = |e: pkcs8::Error| HashSignError::KeyParse {
            algorithm: expected,
            reason: e.to_string(),
        };

        match expected {
            Algorithm::Rsa => RsaPrivateKey::from_pkcs8_der(der)
                .map(Self::Rsa)
                .map_err(parse_err),
            Algorithm::Ecdsa => {
                let curve_oid = info
                    .algorithm
                    .parameters_oid()
                    .map_err(|e| HashSignError::KeyParse {
                        algorithm: Algorithm::Ecdsa,
                        reason: format!("missing named curve: {e}"),
                    })?;
                let key = match curve_from_oid(&curve_oid)? {
                    Curve::P256 => p256::ecdsa::SigningKey::from_pkcs8_der(der)
                        .map(EcdsaPrivateKey::P256)
                        .map_err(parse_err)?,
                    Curve::P384 => p384::ecdsa::SigningKey::from_pkcs8_der(der)
                        .map(EcdsaPrivateKey::P384)
                        .map_err(parse_err)?,
                };
                Ok(Self::Ecdsa(key))
            }
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Rsa(_) => Algorithm::Rsa,
            Self::Ecdsa(_) => Algorithm::Ecdsa,
        }
    }

    /**
        Curve of an ECDSA key; `None` for RSA.
    */
    pub fn curve(&self) -> Option<Curve> {
        match self {
            Self::Rsa(_) => None,
            Self::Ecdsa(key) => Some(key.curve()),
        }
    }

    /**
        Corresponding public key.
    */
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Rsa(key) => PublicKey::Rsa(key.to_public_key()),
            Self::Ecdsa(EcdsaPrivateKey::P256(key)) => {
                PublicKey::Ecdsa(EcdsaPublicKey::P256(p256::ecdsa::VerifyingKey::from(key)))
            }
            Self::Ecdsa(EcdsaPrivateKey::P384(key)) => {
                PublicKey::Ecdsa(EcdsaPublicKey::P384(p384::ecdsa::VerifyingKey::from(key)))
            }
        }
    }

    /**
        Short description such as `RSA-2048` or `ECDSA P-256`.
    */
    pub fn description(&self) -> String {
        match self {
            Self::Rsa(key) => format!("RSA-{}", key.size() * 8),
            Self::Ecdsa(key) => format!("ECDSA {}", key.curve()),
        }
    }
}

// Private key material never goes to logs.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey")
            .field(&self.description())
            .finish()
    }
}

impl EcdsaPrivateKey {
    pub fn curve(&self) -> Curve {
        match self {
            Self::P256(_) => Curve::P256,
            Self::P384(_) => Curve::P384,
        }
    }
}

impl PublicKey {
    /**
        Parse a DER-encoded SubjectPublicKeyInfo.

        Only RSA and ECDSA (P-256, P-384) keys are supported; every other
        key type is reported as [`HashSignError::UnsupportedKeyType`].
    */
    pub fn from_spki_der(der: &[u8]) -> HashSignResult<Self> {
        let spki = SubjectPublicKeyInfoRef::from_der(der)
            .map_err(|e| HashSignError::CertificateParse(format!("public key info: {e}")))?;
        let oid = spki.algorithm.oid;

        if oid == OID_RSA_ENCRYPTION {
            return RsaPublicKey::from_public_key_der(der)
                .map(Self::Rsa)
                .map_err(|e| HashSignError::CertificateParse(format!("RSA public key: {e}")));
        }

        if oid != OID_EC_PUBLIC_KEY {
            return Err(HashSignError::UnsupportedKeyType(key_algorithm_name(&oid)));
        }

        let curve_oid = spki.algorithm.parameters_oid().map_err(|e| {
            HashSignError::CertificateParse(format!("ECDSA public key without named curve: {e}"))
        })?;
        let curve = curve_from_oid(&curve_oid).map_err(|_| {
            HashSignError::UnsupportedKeyType(format!("ECDSA {}", curve_name(&curve_oid)))
        })?;
        let ec_err =
            |e: pkcs8::spki::Error| HashSignError::CertificateParse(format!("ECDSA public key: {e}"));

        let key = match curve {
            Curve::P256 => p256::ecdsa::VerifyingKey::from_public_key_der(der)
                .map(EcdsaPublicKey::P256)
                .map_err(ec_err)?,
            Curve::P384 => p384::ecdsa::VerifyingKey::from_public_key_der(der)
                .map(EcdsaPublicKey::P384)
                .map_err(ec_err)?,
        };
        Ok(Self::Ecdsa(key))
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Rsa(_) => Algorithm::Rsa,
            Self::Ecdsa(_) => Algorithm::Ecdsa,
        }
    }

    /**
        Key size in bits: modulus length for RSA, curve size for ECDSA.
    */
    pub fn bits(&self) -> usize {
        match self {
            Self::Rsa(key) => key.size() * 8,
            Self::Ecdsa(key) => key.curve().bit_size(),
        }
    }
}

impl EcdsaPublicKey {
    pub fn curve(&self) -> Curve {
        match self {
            Self::P256(_) => Curve::P256,
            Self::P384(_) => Curve::P384,
        }
    }
}

fn curve_from_oid(oid: &ObjectIdentifier) -> HashSignResult<Curve> {
    if *oid == OID_SECP256R1 {
        Ok(Curve::P256)
    } else if *oid == OID_SECP384R1 {
        Ok(Curve::P384)
    } else {
        Err(HashSignError::UnsupportedCurve(curve_name(oid)))
    }
}
