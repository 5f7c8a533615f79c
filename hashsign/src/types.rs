use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::error::{HashSignError, ParseError};

/**
    Public-key algorithm family of a key or certificate.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Algorithm {
    Rsa,
    Ecdsa,
}

impl Algorithm {
    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Rsa => "RSA",
            Self::Ecdsa => "ECDSA",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rsa" => Ok(Self::Rsa),
            "ecdsa" | "ecc" | "ec" => Ok(Self::Ecdsa),
            _ => Err(ParseError {
                kind: "algorithm",
                value: s.to_owned(),
            }),
        }
    }
}

/**
    Named prime curves accepted for ECDSA keys.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Curve {
    P256,
    P384,
}

impl Curve {
    pub const fn bit_size(self) -> usize {
        match self {
            Self::P256 => 256,
            Self::P384 => 384,
        }
    }

    /**
        Width in bytes of one scalar: `ceil(bit_size / 8)`.
        A P1363 signature on this curve is exactly twice this long.
    */
    pub const fn field_len(self) -> usize {
        self.bit_size().div_ceil(8)
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

/**
    ECDSA signature encoding.

    RSA signatures have a single PKCS#1 v1.5 representation and never go
    through this selection.
*/
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureFormat {
    /// ASN.1 DER `SEQUENCE { r INTEGER, s INTEGER }`.
    #[default]
    Der,
    /// IEEE P1363 fixed-width `r || s`.
    P1363,
}

impl SignatureFormat {
    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Der => "DER",
            Self::P1363 => "P1363",
        }
    }

    /**
        Resolve an optional caller-supplied method name.
        A missing or empty method selects DER; anything other than
        `DER` or `P1363` is rejected.
    */
    pub fn from_method(method: Option<&str>) -> Result<Self, HashSignError> {
        match method {
            None | Some("") => Ok(Self::Der),
            Some(m) => m.parse(),
        }
    }
}

impl fmt::Display for SignatureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for SignatureFormat {
    type Err = HashSignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DER" => Ok(Self::Der),
            "P1363" => Ok(Self::P1363),
            _ => Err(HashSignError::InvalidSignatureMethod(s.to_owned())),
        }
    }
}

/**
    Hash functions offered by the digest summary helper.
*/
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ParseError {
                kind: "hash algorithm",
                value: s.to_owned(),
            }),
        }
    }
}
