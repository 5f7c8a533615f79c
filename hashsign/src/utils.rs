use std::sync::LazyLock;

use data_encoding::{BASE64, BASE64URL, Encoding};

use crate::error::{HashSignError, HashSignResult};

const PEM_BEGIN: &str = "-----BEGIN ";
const PEM_END: &str = "-----END ";
const PEM_DASHES: &str = "-----";

static BASE64_WRAPPED: LazyLock<Encoding> = LazyLock::new(|| ignoring_line_breaks(&BASE64));
static BASE64URL_WRAPPED: LazyLock<Encoding> = LazyLock::new(|| ignoring_line_breaks(&BASE64URL));

// CR and LF are skipped anywhere in the input, so values copied from
// column-wrapped files decode like single-line ones.
fn ignoring_line_breaks(base: &Encoding) -> Encoding {
    let mut spec = base.specification();
    spec.ignore.push_str("\r\n");
    spec.encoding().unwrap_or_else(|_| base.clone())
}

/**
    Decode the first PEM block found in `data`, returning its label and DER body.

    Text before the block and anything after its END line is ignored, so key
    files carrying comments or a second block still load their first key.
*/
pub(crate) fn decode_first_pem_block(data: &[u8]) -> HashSignResult<(String, Vec<u8>)> {
    let text = std::str::from_utf8(data)
        .map_err(|_| HashSignError::InvalidPem("file is not valid UTF-8".into()))?;

    let begin = text
        .find(PEM_BEGIN)
        .ok_or_else(|| HashSignError::InvalidPem("no PEM block found".into()))?;
    let block = &text[begin..];

    let label_start = PEM_BEGIN.len();
    let label_len = block[label_start..]
        .find(PEM_DASHES)
        .ok_or_else(|| HashSignError::InvalidPem("unterminated BEGIN line".into()))?;
    let label = &block[label_start..label_start + label_len];

    let end_marker = format!("{PEM_END}{label}{PEM_DASHES}");
    let end = block
        .find(&end_marker)
        .ok_or_else(|| HashSignError::InvalidPem(format!("missing END line for '{label}'")))?;
    let block = &block[..end + end_marker.len()];

    let (label, der) = pem_rfc7468::decode_vec(block.as_bytes())
        .map_err(|e| HashSignError::InvalidPem(e.to_string()))?;
    if der.is_empty() {
        return Err(HashSignError::InvalidPem(format!("empty '{label}' block")));
    }

    Ok((label.to_owned(), der))
}

/**
    Decode standard (padded) base64, naming the field in the error.
    Embedded line breaks are ignored.
*/
pub fn decode_base64(value: &str, field: &str) -> HashSignResult<Vec<u8>> {
    BASE64_WRAPPED
        .decode(value.trim().as_bytes())
        .map_err(|e| HashSignError::InvalidBase64(format!("{field}: {e}")))
}

/**
    Decode standard base64, falling back to the URL-safe alphabet.
*/
pub(crate) fn decode_base64_lenient(value: &str, field: &str) -> HashSignResult<Vec<u8>> {
    let value = value.trim();
    BASE64_WRAPPED
        .decode(value.as_bytes())
        .or_else(|_| BASE64URL_WRAPPED.decode(value.as_bytes()))
        .map_err(|e| HashSignError::InvalidBase64(format!("{field}: {e}")))
}

/**
    Strip leading zero bytes from a big-endian unsigned integer.
*/
pub(crate) fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

/**
    Left-pad a big-endian unsigned integer with zero bytes to exactly `width`.
    Returns `None` if the magnitude does not fit.
*/
pub(crate) fn left_pad(bytes: &[u8], width: usize) -> Option<Vec<u8>> {
    let bytes = trim_leading_zeros(bytes);
    if bytes.len() > width {
        return None;
    }
    let mut out = vec![0u8; width];
    out[width - bytes.len()..].copy_from_slice(bytes);
    Some(out)
}
