use hashsign::{
    Algorithm, DerDecode, EcdsaSignature, HashSignError, KeyStore, PrivateKey, PublicKey,
    SignatureFormat, inspect, verify,
};
use hex_literal::hex;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPublicKey};

const HELLO_SHA256: [u8; 32] =
    hex!("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824");

const RSA_KEY: &str = include_str!("../testfiles/rsa2048_pkcs1.pem");
const RSA_CERT: &[u8] = include_bytes!("../testfiles/rsa2048.crt.der");
const RSA_OTHER_CERT: &[u8] = include_bytes!("../testfiles/rsa2048_other.crt.der");
const EC_P256_KEY: &str = include_str!("../testfiles/ec_p256.pem");
const EC_P256_CERT: &[u8] = include_bytes!("../testfiles/ec_p256.crt.der");
const EC_P256_OTHER_CERT: &[u8] = include_bytes!("../testfiles/ec_p256_other.crt.der");
const EC_P384_KEY: &str = include_str!("../testfiles/ec_p384.pem");
const EC_P384_CERT: &[u8] = include_bytes!("../testfiles/ec_p384.crt.der");
const ED25519_CERT: &[u8] = include_bytes!("../testfiles/ed25519.crt.der");

fn store() -> KeyStore {
    KeyStore::new(
        Some(PrivateKey::from_pem(RSA_KEY, Algorithm::Rsa).unwrap()),
        Some(PrivateKey::from_pem(EC_P256_KEY, Algorithm::Ecdsa).unwrap()),
    )
}

fn p384_store() -> KeyStore {
    KeyStore::new(
        None,
        Some(PrivateKey::from_pem(EC_P384_KEY, Algorithm::Ecdsa).unwrap()),
    )
}

fn flip_bit(bytes: &[u8], bit: usize) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out[bit / 8] ^= 1 << (bit % 8);
    out
}

#[test]
fn rsa_hello_scenario() {
    let signature = store().sign_rsa(&HELLO_SHA256).unwrap();
    assert_eq!(signature, include_bytes!("../testfiles/hello.rsa2048.sig"));

    verify(RSA_CERT, &HELLO_SHA256, &signature).unwrap();
    let err = verify(RSA_OTHER_CERT, &HELLO_SHA256, &signature).unwrap_err();
    assert!(matches!(err, HashSignError::VerificationFailed(Algorithm::Rsa)));
}

#[test]
fn ecdsa_round_trip_all_formats() {
    for (store, cert, width) in [(store(), EC_P256_CERT, 32), (p384_store(), EC_P384_CERT, 48)] {
        for format in [SignatureFormat::Der, SignatureFormat::P1363] {
            let signature = store.sign_ecdsa(&HELLO_SHA256, format).unwrap();
            if format == SignatureFormat::P1363 {
                assert_eq!(signature.len(), 2 * width);
            }
            verify(cert, &HELLO_SHA256, &signature).unwrap();
        }
    }
}

#[test]
fn p256_p1363_is_64_bytes_and_matches_der() {
    let der = store().sign_ecdsa(&HELLO_SHA256, SignatureFormat::Der).unwrap();
    let DerDecode::Signature(decoded) = EcdsaSignature::from_der(&der) else {
        panic!("signer produced invalid DER");
    };

    let p1363 = decoded.to_p1363(256).unwrap();
    assert_eq!(p1363.len(), 64);
    assert_eq!(EcdsaSignature::from_p1363(&p1363, 256).unwrap(), decoded);
    assert_eq!(decoded.to_der().unwrap(), der);
}

#[test]
fn openssl_fixtures_agree() {
    let der = include_bytes!("../testfiles/hello.p256.der.sig");
    let p1363 = include_bytes!("../testfiles/hello.p256.p1363.sig");
    assert_eq!(
        EcdsaSignature::from_der(der),
        DerDecode::Signature(EcdsaSignature::from_p1363(p1363, 256).unwrap())
    );

    // r is 31 bytes: P1363 keeps a leading zero, DER drops it
    let short_der = include_bytes!("../testfiles/hello.p256.short_r.der.sig");
    let short_p1363 = include_bytes!("../testfiles/hello.p256.short_r.p1363.sig");
    assert_eq!(short_p1363[0], 0);
    let sig = EcdsaSignature::from_p1363(short_p1363, 256).unwrap();
    assert_eq!(sig.r().len(), 31);
    assert_eq!(sig.to_p1363(256).unwrap(), short_p1363);
    verify(EC_P256_CERT, &HELLO_SHA256, short_der).unwrap();
    verify(EC_P256_CERT, &HELLO_SHA256, short_p1363).unwrap();
}

#[test]
fn p1363_wrong_length() {
    let signature = store().sign_ecdsa(&HELLO_SHA256, SignatureFormat::P1363).unwrap();
    for bad in [&signature[..63], &[signature.as_slice(), &[0]].concat()[..]] {
        let err = verify(EC_P256_CERT, &HELLO_SHA256, bad).unwrap_err();
        assert!(matches!(
            err,
            HashSignError::InvalidSignatureLength { expected: 64, .. }
        ));
    }
}

#[test]
fn der_is_never_reinterpreted_as_p1363() {
    // valid DER with a wrong s: verification fails, no length error
    let der = store().sign_ecdsa(&HELLO_SHA256, SignatureFormat::Der).unwrap();
    let mut wrong = der.clone();
    let last = wrong.len() - 1;
    wrong[last] ^= 0x01;
    let err = verify(EC_P256_CERT, &HELLO_SHA256, &wrong).unwrap_err();
    assert!(matches!(err, HashSignError::VerificationFailed(Algorithm::Ecdsa)));

    // a 64-byte value that starts with a DER SEQUENCE is read as DER
    let mut ambiguous = [0u8; 64];
    ambiguous[..8].copy_from_slice(&hex!("3006 020101 020101"));
    assert!(matches!(
        EcdsaSignature::from_der(&ambiguous),
        DerDecode::Signature(_)
    ));
    let err = verify(EC_P256_CERT, &HELLO_SHA256, &ambiguous).unwrap_err();
    assert!(matches!(err, HashSignError::VerificationFailed(Algorithm::Ecdsa)));
}

#[test]
fn tampered_signatures_fail() {
    let store = store();
    let cases = [
        (RSA_CERT, store.sign_rsa(&HELLO_SHA256).unwrap()),
        (
            EC_P256_CERT,
            store.sign_ecdsa(&HELLO_SHA256, SignatureFormat::Der).unwrap(),
        ),
        (
            EC_P256_CERT,
            store.sign_ecdsa(&HELLO_SHA256, SignatureFormat::P1363).unwrap(),
        ),
    ];

    for (cert, signature) in cases {
        for bit in (0..signature.len() * 8).step_by(7) {
            let tampered = flip_bit(&signature, bit);
            assert!(
                verify(cert, &HELLO_SHA256, &tampered).is_err(),
                "bit {bit} of signature accepted"
            );
        }
        for bit in 0..HELLO_SHA256.len() * 8 {
            let digest = flip_bit(&HELLO_SHA256, bit);
            assert!(
                verify(cert, &digest, &signature).is_err(),
                "bit {bit} of digest accepted"
            );
        }
    }
}

#[test]
fn tampered_public_keys_fail() {
    use hashsign::DigestVerifier;

    let store = store();
    let rsa_sig = store.sign_rsa(&HELLO_SHA256).unwrap();
    let ec_sig = store.sign_ecdsa(&HELLO_SHA256, SignatureFormat::Der).unwrap();

    let (PublicKey::Rsa(key), _) = inspect(RSA_CERT).unwrap() else {
        panic!("RSA certificate");
    };
    let tampered = RsaPublicKey::new(key.n() + BigUint::from(2u32), key.e().clone()).unwrap();
    assert!(
        PublicKey::Rsa(tampered)
            .verify_digest(&HELLO_SHA256, &rsa_sig)
            .is_err()
    );

    let err = verify(EC_P256_OTHER_CERT, &HELLO_SHA256, &ec_sig).unwrap_err();
    assert!(matches!(err, HashSignError::VerificationFailed(Algorithm::Ecdsa)));
}

#[test]
fn unsupported_key_type() {
    let err = verify(ED25519_CERT, &HELLO_SHA256, &[0u8; 64]).unwrap_err();
    assert!(matches!(err, HashSignError::UnsupportedKeyType(_)));
}

#[test]
fn digest_length_is_not_checked_for_ecdsa() {
    // a SHA-512 sized digest is truncated to the curve order, not rejected
    let digest = [0x5au8; 64];
    let signature = store().sign_ecdsa(&digest, SignatureFormat::P1363).unwrap();
    verify(EC_P256_CERT, &digest, &signature).unwrap();
}

#[test]
fn short_ecdsa_digests_sign_and_verify() {
    let store = store();
    for len in [0, 8, 15] {
        let digest = vec![0x11u8; len];
        for format in [SignatureFormat::Der, SignatureFormat::P1363] {
            let signature = store.sign_ecdsa(&digest, format).unwrap();
            assert_eq!(verify(EC_P256_CERT, &digest, &signature).unwrap(), Algorithm::Ecdsa);
        }
    }
}

#[test]
fn concurrent_signing_shares_one_store() {
    let store = store();
    std::thread::scope(|scope| {
        for i in 0..8u8 {
            let store = &store;
            scope.spawn(move || {
                let mut digest = HELLO_SHA256;
                digest[0] = i;
                let rsa = store.sign_rsa(&digest).unwrap();
                verify(RSA_CERT, &digest, &rsa).unwrap();
                let ec = store.sign_ecdsa(&digest, SignatureFormat::P1363).unwrap();
                verify(EC_P256_CERT, &digest, &ec).unwrap();
            });
        }
    });
}
