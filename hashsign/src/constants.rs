use der::asn1::ObjectIdentifier;

// Key algorithm identifiers (SubjectPublicKeyInfo / PrivateKeyInfo).
pub const OID_RSA_ENCRYPTION: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
pub const OID_RSASSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");
pub const OID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
pub const OID_DSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");
pub const OID_ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
pub const OID_ED448: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.113");
pub const OID_X25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.110");

// Named curves (ECParameters).
pub const OID_SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
pub const OID_SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
pub const OID_SECP521R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");
pub const OID_SECP224R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.33");

const KEY_ALGORITHM_NAMES: &[(ObjectIdentifier, &str)] = &[
    (OID_RSA_ENCRYPTION, "RSA"),
    (OID_RSASSA_PSS, "RSASSA-PSS"),
    (OID_EC_PUBLIC_KEY, "ECDSA"),
    (OID_DSA, "DSA"),
    (OID_ED25519, "Ed25519"),
    (OID_ED448, "Ed448"),
    (OID_X25519, "X25519"),
];

const CURVE_NAMES: &[(ObjectIdentifier, &str)] = &[
    (OID_SECP256R1, "P-256"),
    (OID_SECP384R1, "P-384"),
    (OID_SECP521R1, "P-521"),
    (OID_SECP224R1, "P-224"),
];

/**
    Human-readable name for a key algorithm OID, used in mismatch and
    unsupported-type errors. Unknown OIDs are rendered in dotted form.
*/
pub fn key_algorithm_name(oid: &ObjectIdentifier) -> String {
    lookup(KEY_ALGORITHM_NAMES, oid)
}

/**
    Human-readable name for a named-curve OID.
*/
pub fn curve_name(oid: &ObjectIdentifier) -> String {
    lookup(CURVE_NAMES, oid)
}

fn lookup(table: &[(ObjectIdentifier, &str)], oid: &ObjectIdentifier) -> String {
    table
        .iter()
        .find(|(known, _)| known == oid)
        .map(|(_, name)| (*name).to_owned())
        .unwrap_or_else(|| oid.to_string())
}
