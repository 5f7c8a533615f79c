/*!
    Process configuration read from the environment.

    | Variable          | Field             |
    |-------------------|-------------------|
    | `PEM_FILE`        | `rsa_key_path`    |
    | `EC_PEM_FILE`     | `ecdsa_key_path`  |
    | `RSA_AUTH_CERT`   | `rsa_auth_cert`   |
    | `RSA_SIGN_CERT`   | `rsa_sign_cert`   |
    | `ECDSA_AUTH_CERT` | `ecdsa_auth_cert` |
    | `ECDSA_SIGN_CERT` | `ecdsa_sign_cert` |

    A value starting with `/run/secrets/` names a Docker secret; the file's
    trimmed content is used instead. Empty values count as unset.
*/

use std::path::{Path, PathBuf};

pub const ENV_RSA_KEY: &str = "PEM_FILE";
pub const ENV_ECDSA_KEY: &str = "EC_PEM_FILE";
pub const ENV_RSA_AUTH_CERT: &str = "RSA_AUTH_CERT";
pub const ENV_RSA_SIGN_CERT: &str = "RSA_SIGN_CERT";
pub const ENV_ECDSA_AUTH_CERT: &str = "ECDSA_AUTH_CERT";
pub const ENV_ECDSA_SIGN_CERT: &str = "ECDSA_SIGN_CERT";

const SECRETS_DIR: &str = "/run/secrets/";

/**
    Key file locations and base64 DER certificates.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub rsa_key_path: Option<PathBuf>,
    pub ecdsa_key_path: Option<PathBuf>,
    pub rsa_auth_cert: Option<String>,
    pub rsa_sign_cert: Option<String>,
    pub ecdsa_auth_cert: Option<String>,
    pub ecdsa_sign_cert: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /**
        Build from an arbitrary variable source, resolving secrets as
        [`Config::from_env`] does.
    */
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::from_lookup_in(lookup, Path::new(SECRETS_DIR))
    }

    fn from_lookup_in(lookup: impl Fn(&str) -> Option<String>, secrets_dir: &Path) -> Self {
        let get = |name: &str| lookup(name).and_then(|v| resolve_value(name, v, secrets_dir));
        Self {
            rsa_key_path: get(ENV_RSA_KEY).map(PathBuf::from),
            ecdsa_key_path: get(ENV_ECDSA_KEY).map(PathBuf::from),
            rsa_auth_cert: get(ENV_RSA_AUTH_CERT),
            rsa_sign_cert: get(ENV_RSA_SIGN_CERT),
            ecdsa_auth_cert: get(ENV_ECDSA_AUTH_CERT),
            ecdsa_sign_cert: get(ENV_ECDSA_SIGN_CERT),
        }
    }
}

fn resolve_value(name: &str, value: String, secrets_dir: &Path) -> Option<String> {
    let value = if Path::new(&value).starts_with(secrets_dir) {
        match std::fs::read_to_string(&value) {
            Ok(content) => content.trim().to_owned(),
            Err(e) => {
                tracing::warn!("unable to read secret file {value} for {name}: {e}");
                return None;
            }
        }
    } else {
        value
    };
    (!value.is_empty()).then_some(value)
}
