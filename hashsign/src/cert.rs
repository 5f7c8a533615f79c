/*!
    X.509 certificate inspection.

    Only the embedded public key feeds verification. Subject, issuer,
    serial and validity are reported for operators but never checked:
    there is no chain building, expiry or revocation handling here.
*/

use der::{Decode, Encode};
use serde::Serialize;
use x509_cert::Certificate;

use crate::error::{HashSignError, HashSignResult};
use crate::key::PublicKey;
use crate::types::Algorithm;
use crate::utils::{decode_base64, decode_first_pem_block};

const PEM_CERTIFICATE_LABEL: &str = "CERTIFICATE";

/**
    Human-readable certificate metadata.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInfo {
    pub subject: String,
    pub issuer: String,
    /// Serial number as lowercase hex of its DER content bytes.
    pub serial: String,
    pub not_before: String,
    pub not_after: String,
    /// `RSA`, `ECDSA P-256`, `Ed25519`, ... or a dotted OID.
    pub key_algorithm: String,
    /// Modulus or curve size; `None` for key types this crate cannot use.
    pub key_bits: Option<usize>,
}

/**
    Parse a DER certificate and extract its public key and algorithm family.

    Keys other than RSA and ECDSA on P-256/P-384 fail with
    [`HashSignError::UnsupportedKeyType`].
*/
pub fn inspect(der: &[u8]) -> HashSignResult<(PublicKey, Algorithm)> {
    let certificate = parse_certificate(der)?;
    let public_key = certificate_public_key(&certificate)?;
    let algorithm = public_key.algorithm();
    Ok((public_key, algorithm))
}

/**
    Report certificate metadata. Unsupported key types are described, not rejected.
*/
pub fn inspect_certificate_info(der: &[u8]) -> HashSignResult<CertificateInfo> {
    let certificate = parse_certificate(der)?;
    let tbs = &certificate.tbs_certificate;

    let (key_algorithm, key_bits) = match certificate_public_key(&certificate) {
        Ok(key @ PublicKey::Rsa(_)) => (Algorithm::Rsa.to_string(), Some(key.bits())),
        Ok(PublicKey::Ecdsa(key)) => {
            let curve = key.curve();
            (format!("{} {curve}", Algorithm::Ecdsa), Some(curve.bit_size()))
        }
        Err(HashSignError::UnsupportedKeyType(name)) => (name, None),
        Err(e) => return Err(e),
    };

    Ok(CertificateInfo {
        subject: tbs.subject.to_string(),
        issuer: tbs.issuer.to_string(),
        serial: hex::encode(tbs.serial_number.as_bytes()),
        not_before: tbs.validity.not_before.to_date_time().to_string(),
        not_after: tbs.validity.not_after.to_date_time().to_string(),
        key_algorithm,
        key_bits,
    })
}

/**
    Decode a base64 DER certificate, as carried in configuration and requests.
*/
pub fn parse_certificate_base64(value: &str) -> HashSignResult<Vec<u8>> {
    let der = decode_base64(value, "certificate")?;
    parse_certificate(&der)?;
    Ok(der)
}

/**
    Accept a certificate as raw DER, PEM, or base64 text and return its DER bytes.
*/
pub fn decode_certificate(data: &[u8]) -> HashSignResult<Vec<u8>> {
    if Certificate::from_der(data).is_ok() {
        return Ok(data.to_vec());
    }

    let text = std::str::from_utf8(data)
        .map_err(|_| HashSignError::CertificateParse("neither DER nor text".into()))?;

    if text.contains("-----BEGIN ") {
        let (label, der) = decode_first_pem_block(data)?;
        if label != PEM_CERTIFICATE_LABEL {
            return Err(HashSignError::CertificateParse(format!(
                "expected a {PEM_CERTIFICATE_LABEL} PEM block, found '{label}'"
            )));
        }
        parse_certificate(&der)?;
        return Ok(der);
    }

    parse_certificate_base64(text)
}

fn parse_certificate(der: &[u8]) -> HashSignResult<Certificate> {
    Certificate::from_der(der).map_err(|e| HashSignError::CertificateParse(e.to_string()))
}

fn certificate_public_key(certificate: &Certificate) -> HashSignResult<PublicKey> {
    let spki = certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .map_err(|e| HashSignError::CertificateParse(e.to_string()))?;
    PublicKey::from_spki_der(&spki)
}
