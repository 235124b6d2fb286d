//! Comparison rules over single public signal values.
//!
//! Rules know nothing about the signal layout; the validator decides which
//! rule applies to which position. Every rule except [`required`] treats an
//! empty value as [`Violation::Blank`].

use std::collections::BTreeSet;

use chrono::{Months, NaiveDate};
use num_bigint::BigUint;

use zkverify_core::codec;

use crate::report::Violation;

/// Value must be non-empty.
pub fn required(value: &str) -> Result<(), Violation> {
    if value.is_empty() {
        Err(Violation::Blank)
    } else {
        Ok(())
    }
}

/// Value must equal `expected` exactly.
pub fn equals(value: &str, expected: &str) -> Result<(), Violation> {
    required(value)?;
    if value == expected {
        Ok(())
    } else {
        Err(Violation::NotAllowed)
    }
}

/// Value must be a member of `allowed`.
pub fn one_of(value: &str, allowed: &BTreeSet<String>) -> Result<(), Violation> {
    required(value)?;
    if allowed.contains(value) {
        Ok(())
    } else {
        Err(not_one_of(allowed))
    }
}

fn not_one_of(allowed: &BTreeSet<String>) -> Violation {
    let names: Vec<&str> = allowed.iter().map(String::as_str).collect();
    Violation::NotOneOf(names.join(", "))
}

/// Packed date must fall strictly after `bound`.
pub fn date_after(value: &str, bound: NaiveDate) -> Result<(), Violation> {
    required(value)?;
    let date = codec::decode_date(value).map_err(|_| Violation::InvalidDate)?;
    if date > bound {
        Ok(())
    } else {
        Err(Violation::DateTooEarly)
    }
}

/// Packed date must fall on or before `bound`.
///
/// Packed dates carry a two-digit year. A decoded date later than `pivot` is
/// taken to be from the previous century, which is how birth dates before
/// 2000 arrive.
pub fn date_on_or_before(value: &str, bound: NaiveDate, pivot: NaiveDate) -> Result<(), Violation> {
    required(value)?;
    let mut date = codec::decode_date(value).map_err(|_| Violation::InvalidDate)?;
    if date > pivot {
        date = date
            .checked_sub_months(Months::new(100 * 12))
            .ok_or(Violation::InvalidDate)?;
    }
    if date <= bound {
        Ok(())
    } else {
        Err(Violation::DateTooLate)
    }
}

/// Value must be the packed-integer encoding of `bytes`.
pub fn packed_equals(value: &str, bytes: &[u8]) -> Result<(), Violation> {
    required(value)?;
    match codec::parse_uint(value) {
        Ok(n) if n == BigUint::from_bytes_be(bytes) => Ok(()),
        _ => Err(Violation::NotAllowed),
    }
}

/// Value must decode to a string that is a member of `allowed`.
pub fn packed_one_of(value: &str, allowed: &BTreeSet<String>) -> Result<(), Violation> {
    required(value)?;
    let decoded = codec::decode_str(value).map_err(|_| not_one_of(allowed))?;
    one_of(&decoded, allowed)
}

/// Value must be a decimal integer no greater than `limit`.
pub fn at_most(value: &str, limit: &BigUint) -> Result<(), Violation> {
    required(value)?;
    let n = codec::parse_uint(value).map_err(|_| Violation::InvalidInteger)?;
    if n <= *limit {
        Ok(())
    } else {
        Err(Violation::AboveLimit(limit.to_string()))
    }
}

/// Value must be a decimal integer.
pub fn integer(value: &str) -> Result<(), Violation> {
    required(value)?;
    codec::parse_uint(value)
        .map(|_| ())
        .map_err(|_| Violation::InvalidInteger)
}
