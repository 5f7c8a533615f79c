/*!
    Configured authentication and signing certificates, one pair per key family.
*/

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use crate::cert::{inspect, parse_certificate_base64};
use crate::config::{
    Config, ENV_ECDSA_AUTH_CERT, ENV_ECDSA_SIGN_CERT, ENV_RSA_AUTH_CERT, ENV_RSA_SIGN_CERT,
};
use crate::error::{HashSignError, HashSignResult, ParseError};
use crate::types::Algorithm;

/**
    What a certificate is used for.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificateUsage {
    Auth,
    Sign,
}

impl CertificateUsage {
    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Sign => "sign",
        }
    }
}

impl fmt::Display for CertificateUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for CertificateUsage {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auth" => Ok(Self::Auth),
            "sign" => Ok(Self::Sign),
            _ => Err(ParseError {
                kind: "certificate type",
                value: s.to_owned(),
            }),
        }
    }
}

/**
    Base64 DER certificates returned to a caller. Absent entries are omitted
    from JSON.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CertificateSelection {
    #[serde(
        rename = "rsa_authentication_certificate",
        skip_serializing_if = "Option::is_none"
    )]
    pub rsa_auth_certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsa_signing_certificate: Option<String>,
    #[serde(
        rename = "ecdsa_authentication_certificate",
        skip_serializing_if = "Option::is_none"
    )]
    pub ecdsa_auth_certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecdsa_signing_certificate: Option<String>,
}

impl CertificateSelection {
    pub fn is_empty(&self) -> bool {
        self.rsa_auth_certificate.is_none()
            && self.rsa_signing_certificate.is_none()
            && self.ecdsa_auth_certificate.is_none()
            && self.ecdsa_signing_certificate.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateStore {
    rsa_auth: Option<String>,
    rsa_sign: Option<String>,
    ecdsa_auth: Option<String>,
    ecdsa_sign: Option<String>,
}

impl CertificateStore {
    pub fn from_config(config: &Config) -> Self {
        Self {
            rsa_auth: config.rsa_auth_cert.clone(),
            rsa_sign: config.rsa_sign_cert.clone(),
            ecdsa_auth: config.ecdsa_auth_cert.clone(),
            ecdsa_sign: config.ecdsa_sign_cert.clone(),
        }
    }

    pub fn get(&self, key: Algorithm, usage: CertificateUsage) -> Option<&str> {
        let slot = match (key, usage) {
            (Algorithm::Rsa, CertificateUsage::Auth) => &self.rsa_auth,
            (Algorithm::Rsa, CertificateUsage::Sign) => &self.rsa_sign,
            (Algorithm::Ecdsa, CertificateUsage::Auth) => &self.ecdsa_auth,
            (Algorithm::Ecdsa, CertificateUsage::Sign) => &self.ecdsa_sign,
        };
        slot.as_deref()
    }

    /**
        Parse every configured certificate and check that its public key
        belongs to the family of its slot. Returns the first problem found.
    */
    pub fn check(&self) -> HashSignResult<()> {
        let slots = [
            (ENV_RSA_AUTH_CERT, Algorithm::Rsa, CertificateUsage::Auth),
            (ENV_RSA_SIGN_CERT, Algorithm::Rsa, CertificateUsage::Sign),
            (ENV_ECDSA_AUTH_CERT, Algorithm::Ecdsa, CertificateUsage::Auth),
            (ENV_ECDSA_SIGN_CERT, Algorithm::Ecdsa, CertificateUsage::Sign),
        ];

        for (slot, expected, usage) in slots {
            let Some(certificate) = self.get(expected, usage) else {
                tracing::debug!("{slot} not configured");
                continue;
            };
            let der = parse_certificate_base64(certificate).map_err(|e| match e {
                HashSignError::InvalidBase64(m) | HashSignError::CertificateParse(m) => {
                    HashSignError::CertificateParse(format!("{slot}: {m}"))
                }
                other => other,
            })?;
            let (_, actual) = inspect(&der)?;
            if actual != expected {
                return Err(HashSignError::CertificateMismatch { slot, expected });
            }
            tracing::debug!("{slot} holds an {actual} certificate");
        }
        Ok(())
    }

    /**
        Pick certificates by key family and usage.

        - neither: every configured certificate
        - usage without key: rejected
        - key only: both certificates of that family
        - key and usage: that single certificate
    */
    pub fn select(
        &self,
        key: Option<Algorithm>,
        usage: Option<CertificateUsage>,
    ) -> HashSignResult<CertificateSelection> {
        let owned = |s: Option<&str>| s.map(str::to_owned);

        let selection = match (key, usage) {
            (None, None) => CertificateSelection {
                rsa_auth_certificate: self.rsa_auth.clone(),
                rsa_signing_certificate: self.rsa_sign.clone(),
                ecdsa_auth_certificate: self.ecdsa_auth.clone(),
                ecdsa_signing_certificate: self.ecdsa_sign.clone(),
            },
            (None, Some(usage)) => {
                return Err(HashSignError::InvalidCertificateSelector(format!(
                    "type '{usage}' requires a key"
                )));
            }
            (Some(key), usage) => {
                let wants = |u| usage.is_none_or(|requested| requested == u);
                let auth = wants(CertificateUsage::Auth)
                    .then(|| owned(self.get(key, CertificateUsage::Auth)))
                    .flatten();
                let sign = wants(CertificateUsage::Sign)
                    .then(|| owned(self.get(key, CertificateUsage::Sign)))
                    .flatten();
                match key {
                    Algorithm::Rsa => CertificateSelection {
                        rsa_auth_certificate: auth,
                        rsa_signing_certificate: sign,
                        ..Default::default()
                    },
                    Algorithm::Ecdsa => CertificateSelection {
                        ecdsa_auth_certificate: auth,
                        ecdsa_signing_certificate: sign,
                        ..Default::default()
                    },
                }
            }
        };

        if selection.is_empty() {
            let what = match (key, usage) {
                (Some(key), Some(usage)) => format!("{key} {usage} certificate"),
                (Some(key), None) => format!("{key} certificates"),
                (None, _) => "certificates".to_owned(),
            };
            return Err(HashSignError::CertificateNotFound(what));
        }
        Ok(selection)
    }
}
