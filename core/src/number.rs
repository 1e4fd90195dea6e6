//! Conversion of raw argument strings to numbers.
//!
//! Integers accept an optional sign, the prefixes `0b`, `0o` and `0x` (any
//! case), and single underscores between digits. The literals `true`, `false`
//! and `null` are read as 1, 0 and 0. Floating point values use the standard
//! Rust grammar (including `inf` and `NaN`) and also accept underscores
//! between digits.
//!
//! # Examples
//!
//! ```
//! use argos_core::{NumberError, parse_number};
//!
//! assert_eq!(parse_number::<i32>("-0xABCD"), Ok(-0xABCD));
//! assert_eq!(parse_number::<u8>("0b1100_1111"), Ok(0b1100_1111));
//! assert_eq!(parse_number::<i64>("true"), Ok(1));
//! assert!(matches!(parse_number::<i8>("128"), Err(NumberError::OutOfRange(_))));
//! assert_eq!(parse_number::<f64>("1_000.5"), Ok(1000.5));
//! ```

use thiserror::Error;

/// Reasons a string could not be converted to a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    /// The string was empty.
    #[error("empty string")]
    Empty,
    /// The string is not a number in any accepted notation.
    #[error("not a number: {0}")]
    Invalid(String),
    /// The number does not fit in the requested type.
    #[error("number out of range: {0}")]
    OutOfRange(String),
}

/// Numeric types that can be read from command-line values.
pub trait ParseNumber: Sized + Copy {
    /// Parses `s` using the notation described in the module docs.
    fn parse_number(s: &str) -> Result<Self, NumberError>;
}

/// Parses `s` as a `T`.
pub fn parse_number<T: ParseNumber>(s: &str) -> Result<T, NumberError> {
    T::parse_number(s)
}

/// Sign and magnitude of an integer literal, before range checks.
fn parse_integer_parts(s: &str) -> Result<(bool, u128), NumberError> {
    match s {
        "" => return Err(NumberError::Empty),
        "true" => return Ok((false, 1)),
        "false" | "null" => return Ok((false, 0)),
        _ => {}
    }

    let (negative, body) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let bytes = body.as_bytes();
    let (radix, digits) = if bytes.len() > 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'b' | b'B' => (2, &body[2..]),
            b'o' | b'O' => (8, &body[2..]),
            b'x' | b'X' => (16, &body[2..]),
            _ => (10, body),
        }
    } else {
        (10, body)
    };

    let magnitude = parse_digits(digits, radix).ok_or_else(|| classify(s, digits, radix))?;
    Ok((negative, magnitude))
}

/// Accumulates `digits` in `radix`, rejecting misplaced underscores.
fn parse_digits(digits: &str, radix: u32) -> Option<u128> {
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }
    let mut value: u128 = 0;
    let mut prev_underscore = false;
    for c in digits.chars() {
        if c == '_' {
            if prev_underscore {
                return None;
            }
            prev_underscore = true;
            continue;
        }
        prev_underscore = false;
        let digit = c.to_digit(radix)?;
        value = value.checked_mul(radix as u128)?.checked_add(digit as u128)?;
    }
    Some(value)
}

/// Distinguishes overflow from malformed input after `parse_digits` failed.
fn classify(s: &str, digits: &str, radix: u32) -> NumberError {
    let well_formed = !digits.is_empty()
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__")
        && digits.chars().all(|c| c == '_' || c.is_digit(radix));
    if well_formed {
        NumberError::OutOfRange(s.to_string())
    } else {
        NumberError::Invalid(s.to_string())
    }
}

macro_rules! impl_parse_signed {
    ($($t:ty),*) => {$(
        impl ParseNumber for $t {
            fn parse_number(s: &str) -> Result<Self, NumberError> {
                let (negative, magnitude) = parse_integer_parts(s)?;
                let out_of_range = || NumberError::OutOfRange(s.to_string());
                let value = if negative {
                    if magnitude > i128::MAX as u128 + 1 {
                        return Err(out_of_range());
                    }
                    (magnitude as i128).wrapping_neg()
                } else {
                    i128::try_from(magnitude).map_err(|_| out_of_range())?
                };
                <$t>::try_from(value).map_err(|_| out_of_range())
            }
        }
    )*};
}

macro_rules! impl_parse_unsigned {
    ($($t:ty),*) => {$(
        impl ParseNumber for $t {
            fn parse_number(s: &str) -> Result<Self, NumberError> {
                let (negative, magnitude) = parse_integer_parts(s)?;
                if negative && magnitude != 0 {
                    return Err(NumberError::OutOfRange(s.to_string()));
                }
                <$t>::try_from(magnitude).map_err(|_| NumberError::OutOfRange(s.to_string()))
            }
        }
    )*};
}

impl_parse_signed!(i8, i16, i32, i64, i128, isize);
impl_parse_unsigned!(u8, u16, u32, u64, u128, usize);

/// Removes underscores that sit between two digits.
fn strip_underscores(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        if c != '_' {
            result.push(c);
            continue;
        }
        let before = i.checked_sub(1).map(|j| bytes[j]);
        let after = bytes.get(i + 1).copied();
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(result)
}

fn is_infinity_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

macro_rules! impl_parse_float {
    ($($t:ty),*) => {$(
        impl ParseNumber for $t {
            fn parse_number(s: &str) -> Result<Self, NumberError> {
                if s.is_empty() {
                    return Err(NumberError::Empty);
                }
                let value = match s.parse::<$t>() {
                    Ok(v) => v,
                    Err(_) => strip_underscores(s)
                        .and_then(|t| t.parse::<$t>().ok())
                        .ok_or_else(|| NumberError::Invalid(s.to_string()))?,
                };
                if value.is_infinite() && !is_infinity_literal(s) {
                    return Err(NumberError::OutOfRange(s.to_string()));
                }
                Ok(value)
            }
        }
    )*};
}

impl_parse_float!(f32, f64);
