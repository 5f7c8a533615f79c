use thiserror::Error;

use crate::types::Algorithm;

/**
    Errors produced while loading keys, signing digests, or verifying signatures.
*/
#[derive(Debug, Clone, Error)]
pub enum HashSignError {
    // ── Key material (configuration) ──────────────────────────────────
    #[error("failed to read {algorithm} key file {path}: {reason}")]
    KeyFileRead {
        algorithm: Algorithm,
        path: String,
        reason: String,
    },
    #[error("invalid PEM: {0}")]
    InvalidPem(String),
    #[error("{algorithm} key parse failed: {reason}")]
    KeyParse {
        algorithm: Algorithm,
        reason: String,
    },
    #[error("parsed key is {actual}, expected {expected}")]
    KeyTypeMismatch {
        expected: Algorithm,
        actual: String,
    },
    #[error("unsupported elliptic curve: {0}")]
    UnsupportedCurve(String),
    #[error("{0} private key not loaded")]
    KeyUnavailable(Algorithm),
    #[error("certificate {slot} does not hold an {expected} public key")]
    CertificateMismatch {
        slot: &'static str,
        expected: Algorithm,
    },

    // ── Request shape ─────────────────────────────────────────────────
    #[error("invalid base64: {0}")]
    InvalidBase64(String),
    #[error("invalid signature method '{0}', use 'P1363' or 'DER'")]
    InvalidSignatureMethod(String),
    #[error("invalid ECDSA signature length {actual}, expected {expected}")]
    InvalidSignatureLength { expected: usize, actual: usize },
    #[error("invalid certificate selector: {0}")]
    InvalidCertificateSelector(String),

    // ── Certificates ──────────────────────────────────────────────────
    #[error("failed to parse certificate: {0}")]
    CertificateParse(String),
    #[error("unsupported public key type: {0}")]
    UnsupportedKeyType(String),
    #[error("{0} not found")]
    CertificateNotFound(String),

    // ── Cryptographic ─────────────────────────────────────────────────
    #[error("{algorithm} signing failed: {reason}")]
    SigningFailed {
        algorithm: Algorithm,
        reason: String,
    },
    #[error("{0} signature verification failed")]
    VerificationFailed(Algorithm),
    #[error("RSA encryption failed: {0}")]
    EncryptionFailed(String),
}

/**
    Broad error classes, used by callers to map failures onto transport
    status codes without matching on individual variants.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed key/certificate configuration. Not retryable.
    Configuration,
    /// Malformed caller input. Never retried.
    Request,
    /// Definite negative cryptographic result, or a failure in the primitive.
    Cryptographic,
}

impl HashSignError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::KeyFileRead { .. }
            | Self::InvalidPem(_)
            | Self::KeyParse { .. }
            | Self::KeyTypeMismatch { .. }
            | Self::UnsupportedCurve(_)
            | Self::CertificateMismatch { .. }
            | Self::CertificateNotFound(_)
            | Self::KeyUnavailable(_) => ErrorKind::Configuration,
            Self::InvalidBase64(_)
            | Self::InvalidSignatureMethod(_)
            | Self::InvalidSignatureLength { .. }
            | Self::InvalidCertificateSelector(_)
            | Self::CertificateParse(_)
            | Self::UnsupportedKeyType(_) => ErrorKind::Request,
            Self::SigningFailed { .. }
            | Self::VerificationFailed(_)
            | Self::EncryptionFailed(_) => ErrorKind::Cryptographic,
        }
    }
}

/**
    Type alias for results that may return a [`HashSignError`].
*/
pub type HashSignResult<T> = std::result::Result<T, HashSignError>;

/**
    Error returned by `FromStr` implementations on enum types.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}
