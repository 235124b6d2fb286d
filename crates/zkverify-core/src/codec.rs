//! Packed-integer encoding used by the passport circuit.
//!
//! The circuit binds byte strings (addresses, ISO 3166 alpha-3 country codes,
//! ASCII `YYMMDD` dates) into a single field element by reading the bytes as
//! one **big-endian** unsigned integer. Public signals carry that integer as a
//! base-10 string of arbitrary width.
//!
//! Leading zero bytes do not survive a round trip: `[0x00, 0x01]` and `[0x01]`
//! share the encoding `"1"`. Comparisons against signals must therefore be
//! done in encoded form (see [`encode_bytes`]), never on decoded bytes.

use chrono::{Datelike, NaiveDate};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::CoreError;

/// Parse a strict base-10 unsigned integer (ASCII digits only, no sign, no
/// whitespace).
pub fn parse_uint(value: &str) -> Result<BigUint, CoreError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidDecimal(value.to_string()));
    }
    BigUint::parse_bytes(value.as_bytes(), 10)
        .ok_or_else(|| CoreError::InvalidDecimal(value.to_string()))
}

/// Encode raw bytes as the decimal form of their big-endian integer value.
pub fn encode_bytes(bytes: &[u8]) -> String {
    BigUint::from_bytes_be(bytes).to_string()
}

/// Decode a decimal signal into minimal big-endian bytes. `"0"` decodes to an
/// empty vector.
pub fn decode_bytes(value: &str) -> Result<Vec<u8>, CoreError> {
    let n = parse_uint(value)?;
    if n.is_zero() {
        return Ok(Vec::new());
    }
    Ok(n.to_bytes_be())
}

/// Encode a UTF-8 string (e.g. `"UKR"` → `"5589842"`).
pub fn encode_str(value: &str) -> String {
    encode_bytes(value.as_bytes())
}

/// Decode a packed signal back into a UTF-8 string.
pub fn decode_str(value: &str) -> Result<String, CoreError> {
    String::from_utf8(decode_bytes(value)?).map_err(|_| CoreError::InvalidUtf8)
}

/// Encode a date as packed ASCII `YYMMDD`.
pub fn encode_date(date: NaiveDate) -> String {
    encode_str(&format!(
        "{:02}{:02}{:02}",
        date.year().rem_euclid(100),
        date.month(),
        date.day()
    ))
}

/// Decode a packed ASCII `YYMMDD` date. The two-digit year is read as `20YY`;
/// callers that deal with dates in the past (birth dates) adjust the century
/// themselves.
pub fn decode_date(value: &str) -> Result<NaiveDate, CoreError> {
    let text = decode_str(value).map_err(|_| CoreError::InvalidDate(value.to_string()))?;
    if text.len() != 6 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidDate(value.to_string()));
    }

    // All six bytes are ASCII digits, so these slices and parses cannot fail.
    let yy: i32 = text[0..2].parse().unwrap_or_default();
    let mm: u32 = text[2..4].parse().unwrap_or_default();
    let dd: u32 = text[4..6].parse().unwrap_or_default();

    NaiveDate::from_ymd_opt(2000 + yy, mm, dd).ok_or_else(|| CoreError::InvalidDate(value.to_string()))
}
