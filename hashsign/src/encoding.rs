/*!
    ECDSA signature encodings.

    - DER: ASN.1 `SEQUENCE { r INTEGER, s INTEGER }` (RFC 3279 Ecdsa-Sig-Value).
    - P1363: `r || s`, each component a big-endian unsigned integer
      left-padded with zeros to `ceil(bit_size / 8)` bytes.

    RSA signatures are PKCS#1 v1.5 blobs and are not handled here.
*/

use der::asn1::{IntRef, UintRef};
use der::{Decode, Encode, Sequence, SliceReader};

use crate::error::{HashSignError, HashSignResult};
use crate::types::SignatureFormat;
use crate::utils::{left_pad, trim_leading_zeros};

#[derive(Sequence)]
struct EcdsaSigValue<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

// Decoding accepts signed INTEGERs so that a negative component still counts
// as a structurally valid DER signature.
#[derive(Sequence)]
struct SignedEcdsaSigValue<'a> {
    r: IntRef<'a>,
    s: IntRef<'a>,
}

/**
    An ECDSA `(r, s)` pair, held as minimal big-endian unsigned integers.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EcdsaSignature {
    r: Vec<u8>,
    s: Vec<u8>,
}

/**
    Result of attempting to read a signature as DER.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerDecode {
    /// Not an ASN.1 `SEQUENCE` of two INTEGERs.
    NotDer,
    /// Valid DER, but `r` or `s` is negative and can never verify.
    Negative,
    /// Valid DER with two non-negative components.
    Signature(EcdsaSignature),
}

impl EcdsaSignature {
    /**
        Build from big-endian components; leading zero bytes are dropped.
    */
    pub fn new(r: &[u8], s: &[u8]) -> Self {
        Self {
            r: trim_leading_zeros(r).to_vec(),
            s: trim_leading_zeros(s).to_vec(),
        }
    }

    pub fn r(&self) -> &[u8] {
        &self.r
    }

    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /**
        Serialize in the requested format. `bit_size` is the curve size and
        only matters for P1363.
    */
    pub fn encode(&self, format: SignatureFormat, bit_size: usize) -> HashSignResult<Vec<u8>> {
        match format {
            SignatureFormat::Der => self.to_der(),
            SignatureFormat::P1363 => self.to_p1363(bit_size),
        }
    }

    pub fn to_der(&self) -> HashSignResult<Vec<u8>> {
        let der_err = |e: der::Error| HashSignError::SigningFailed {
            algorithm: crate::types::Algorithm::Ecdsa,
            reason: format!("DER encoding: {e}"),
        };
        EcdsaSigValue {
            r: UintRef::new(&self.r).map_err(der_err)?,
            s: UintRef::new(&self.s).map_err(der_err)?,
        }
        .to_der()
        .map_err(der_err)
    }

    /**
        Fixed-width `r || s`. Components are padded, never truncated; a
        component wider than the curve is an error.
    */
    pub fn to_p1363(&self, bit_size: usize) -> HashSignResult<Vec<u8>> {
        let width = bit_size.div_ceil(8);
        let too_long = || HashSignError::InvalidSignatureLength {
            expected: width,
            actual: self.r.len().max(self.s.len()),
        };
        let mut out = left_pad(&self.r, width).ok_or_else(too_long)?;
        out.extend(left_pad(&self.s, width).ok_or_else(too_long)?);
        Ok(out)
    }

    /**
        Read `bytes` as DER. Trailing bytes after the SEQUENCE are ignored.
    */
    pub fn from_der(bytes: &[u8]) -> DerDecode {
        let Ok(mut reader) = SliceReader::new(bytes) else {
            return DerDecode::NotDer;
        };
        let Ok(value) = SignedEcdsaSigValue::decode(&mut reader) else {
            return DerDecode::NotDer;
        };

        let is_negative = |i: &IntRef<'_>| i.as_bytes().first().is_some_and(|b| b & 0x80 != 0);
        if is_negative(&value.r) || is_negative(&value.s) {
            return DerDecode::Negative;
        }

        DerDecode::Signature(Self::new(value.r.as_bytes(), value.s.as_bytes()))
    }

    /**
        Read a fixed-width `r || s` signature. The length must be exactly
        `2 * ceil(bit_size / 8)`.
    */
    pub fn from_p1363(bytes: &[u8], bit_size: usize) -> HashSignResult<Self> {
        let width = bit_size.div_ceil(8);
        if bytes.len() != 2 * width {
            return Err(HashSignError::InvalidSignatureLength {
                expected: 2 * width,
                actual: bytes.len(),
            });
        }
        let (r, s) = bytes.split_at(width);
        Ok(Self::new(r, s))
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn der_known_encoding() {
        let sig = EcdsaSignature::new(&[0x01], &[0x80]);
        // s has its high bit set and gains a 0x00 sign byte
        assert_eq!(sig.to_der().unwrap(), hex!("3007 020101 02020080"));
    }

    #[test]
    fn der_drops_leading_zeros() {
        let sig = EcdsaSignature::new(&[0x00, 0x00, 0x7f], &[0x00, 0x01]);
        assert_eq!(sig.to_der().unwrap(), hex!("3006 02017f 020101"));
    }

    #[test]
    fn p1363_pads_short_components() {
        let sig = EcdsaSignature::new(&[0x01], &[0xff; 32]);
        let encoded = sig.to_p1363(256).unwrap();
        assert_eq!(encoded.len(), 64);
        assert_eq!(&encoded[..31], &[0u8; 31]);
        assert_eq!(encoded[31], 0x01);
        assert_eq!(&encoded[32..], &[0xff; 32]);
    }

    #[test]
    fn p1363_rounds_odd_bit_sizes_up() {
        let sig = EcdsaSignature::new(&[0x01], &[0x02]);
        // 521-bit curves use 66-byte components
        assert_eq!(sig.to_p1363(521).unwrap().len(), 132);
    }

    #[test]
    fn p1363_never_truncates() {
        let sig = EcdsaSignature::new(&[0x01; 33], &[0x01]);
        let err = sig.to_p1363(256).unwrap_err();
        assert!(matches!(
            err,
            HashSignError::InvalidSignatureLength { expected: 32, actual: 33 }
        ));
    }

    #[test]
    fn p1363_decode_preserves_magnitude() {
        let mut bytes = [0u8; 64];
        bytes[31] = 0x05;
        bytes[32] = 0x80;
        let sig = EcdsaSignature::from_p1363(&bytes, 256).unwrap();
        assert_eq!(sig.r(), &[0x05]);
        assert_eq!(sig.s().len(), 32);
        assert_eq!(sig.s()[0], 0x80);
        assert_eq!(sig.to_p1363(256).unwrap(), bytes);
    }

    #[test]
    fn p1363_decode_rejects_wrong_length() {
        for len in [0, 63, 65, 96] {
            let err = EcdsaSignature::from_p1363(&vec![1u8; len], 256).unwrap_err();
            assert!(matches!(
                err,
                HashSignError::InvalidSignatureLength { expected: 64, actual } if actual == len
            ));
        }
    }

    #[test]
    fn der_decode() {
        let decoded = EcdsaSignature::from_der(&hex!("3007 020101 02020080"));
        assert_eq!(
            decoded,
            DerDecode::Signature(EcdsaSignature::new(&[0x01], &[0x80]))
        );
    }

    #[test]
    fn der_decode_ignores_trailing_bytes() {
        let decoded = EcdsaSignature::from_der(&hex!("3006 020101 020102 ffff"));
        assert_eq!(
            decoded,
            DerDecode::Signature(EcdsaSignature::new(&[0x01], &[0x02]))
        );
    }

    #[test]
    fn der_decode_flags_negative_components() {
        assert_eq!(
            EcdsaSignature::from_der(&hex!("3006 0201ff 020101")),
            DerDecode::Negative
        );
    }

    #[test]
    fn der_decode_rejects_non_der() {
        assert_eq!(EcdsaSignature::from_der(&[]), DerDecode::NotDer);
        assert_eq!(EcdsaSignature::from_der(&[0x42; 64]), DerDecode::NotDer);
        // one INTEGER only
        assert_eq!(EcdsaSignature::from_der(&hex!("3003 020101")), DerDecode::NotDer);
        // non-minimal INTEGER
        assert_eq!(
            EcdsaSignature::from_der(&hex!("3007 02020001 020101")),
            DerDecode::NotDer
        );
    }
}
