/*!
    Digest signing and verification with RSA and ECDSA keys.

    - Private keys are loaded once from PEM files into a [`KeyStore`].
    - RSA signs with PKCS#1 v1.5 / SHA-256; ECDSA signs the raw digest and
      returns DER or P1363 encodings.
    - Verification takes a certificate, a digest and a signature, and
      dispatches on the certificate's public key.
*/

mod cert;
mod certificates;
mod config;
mod constants;
mod crypto;
mod digest;
mod encoding;
mod encrypt;
mod error;
mod key;
mod store;
mod types;
mod utils;
mod verify;

pub use self::cert::{
    CertificateInfo, decode_certificate, inspect, inspect_certificate_info,
    parse_certificate_base64,
};
pub use self::certificates::{CertificateSelection, CertificateStore, CertificateUsage};
pub use self::config::{
    Config, ENV_ECDSA_AUTH_CERT, ENV_ECDSA_KEY, ENV_ECDSA_SIGN_CERT, ENV_RSA_AUTH_CERT,
    ENV_RSA_KEY, ENV_RSA_SIGN_CERT,
};
pub use self::crypto::{DigestSigner, DigestVerifier, RawSignature, sign};
pub use self::digest::{DigestSummary, digest_summary, hash, verification_code};
pub use self::encoding::{DerDecode, EcdsaSignature};
pub use self::encrypt::encrypt_with_public_key;
pub use self::error::{ErrorKind, HashSignError, HashSignResult, ParseError};
pub use self::key::{EcdsaPrivateKey, EcdsaPublicKey, PrivateKey, PublicKey, load_private_key};
pub use self::store::{
    HashRequest, HashSignature, KeyStore, RSA_SIGNATURE_METHOD, sign_base64_ecdsa,
    sign_base64_rsa,
};
pub use self::types::{Algorithm, Curve, HashAlgorithm, SignatureFormat};
pub use self::utils::decode_base64;
pub use self::verify::{verify, verify_base64};
