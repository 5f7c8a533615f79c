/*!
    Digest helpers for callers that prepare data to be signed.
*/

use data_encoding::{BASE64, BASE64URL};
use serde::Serialize;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::{HashSignError, HashSignResult};
use crate::types::HashAlgorithm;
use crate::utils::{decode_base64, decode_base64_lenient};

/**
    Hash of caller-supplied bytes in both base64 alphabets.
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestSummary {
    #[serde(rename = "digestSummary")]
    pub digest_summary: String,
    #[serde(rename = "URLSafeDigestSummary")]
    pub url_safe_summary: String,
    #[serde(rename = "algorithmUsed")]
    pub algorithm: HashAlgorithm,
}

pub fn hash(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/**
    Decode `input` (standard base64, or URL-safe as a fallback) and hash it.
*/
pub fn digest_summary(input: &str, algorithm: HashAlgorithm) -> HashSignResult<DigestSummary> {
    if input.trim().is_empty() {
        return Err(HashSignError::InvalidBase64("digest not provided".into()));
    }
    let data = decode_base64_lenient(input, "digest")?;
    let hashed = hash(algorithm, &data);
    tracing::debug!("{algorithm} summary calculated over {} bytes", data.len());

    Ok(DigestSummary {
        digest_summary: BASE64.encode(&hashed),
        url_safe_summary: BASE64URL.encode(&hashed),
        algorithm,
    })
}

/**
    Four-digit control code shown to a user before they confirm signing:
    the last two bytes of `SHA-256(hash)` as a big-endian integer, modulo 10000.
*/
pub fn verification_code(hash_b64: &str) -> HashSignResult<u16> {
    let data = decode_base64(hash_b64, "hash")?;
    let hashed = Sha256::digest(&data);
    let tail = u16::from_be_bytes([hashed[30], hashed[31]]);
    Ok(tail % 10000)
}
