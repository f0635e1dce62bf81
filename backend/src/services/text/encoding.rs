//! Base64 and URI percent-encoding of text.
//!
//! Base64 operates on the UTF-8 bytes of the input, so any text round-trips.
//! Percent-encoding follows the browser's `encodeURIComponent` rules:
//! everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::TextError;

/// Standard alphabet, padding optional on decode.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn base64_encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode Base64 into text. Whitespace inside the input is ignored.
pub fn base64_decode(input: &str) -> Result<String, TextError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = LENIENT
        .decode(compact.as_bytes())
        .map_err(|e| TextError::InvalidBase64(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| TextError::InvalidUtf8)
}

/// Bytes `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escape a URI component.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Every `%` must start a two-digit hex escape.
fn escapes_are_well_formed(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'%'
            || bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
    })
}

/// Reverse [`encode_component`].
///
/// Fails on truncated or non-hex escapes and on escapes that do not form
/// valid UTF-8, as the browser does.
pub fn decode_component(text: &str) -> Result<String, TextError> {
    let malformed = || TextError::InvalidPercentEncoding(text.to_string());
    if !escapes_are_well_formed(text) {
        return Err(malformed());
    }
    percent_decode_str(text)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| malformed())
}

/// Decode when possible, otherwise return the input untouched.
pub fn safe_decode(text: &str) -> String {
    decode_component(text).unwrap_or_else(|_| text.to_string())
}
