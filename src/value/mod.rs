//! Property value grammars (RFC 5545 §3.3).
//!
//! Scalar values live here; the date/time, duration, period and recurrence
//! grammars have their own modules. None of these rules perform calendar
//! validity checking: the grammar recognizes digit shapes, and a month of 13
//! is a problem for a validation pass, not for the recognizer.

pub mod datetime;
pub mod duration;
pub mod period;
pub mod recur;

pub use datetime::{Date, DateTime, Time, UtcOffset};
pub use duration::{DurTime, Duration};
pub use period::Period;
pub use recur::{Frequency, Recur, RecurUntil, Weekday, WeekdayNum};

use crate::cursor::{Cursor, expect_rules};
use crate::error::ParserError;
use crate::grammar::abnf::{is_alphanum, is_digit, read_digit_run};
use crate::grammar::uri::{Uri, read_uri};

/// A GEO property value: `float ";" float`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoValue {
    pub lat: f64,
    pub lon: f64,
}

/// Optional sign prefix shared by integer and float. Returns whether the
/// value is negative.
fn read_sign(cursor: &mut Cursor<'_>) -> bool {
    if cursor.eat(b'-') {
        true
    } else {
        cursor.eat(b'+');
        false
    }
}

/// integer = ["+" / "-"] 1*DIGIT
///
/// Values outside `i32` do not match here; [`expect_integer`] turns that
/// case into a hard [`ParserError::IntegerOverflow`] instead of wrapping.
pub fn read_integer(cursor: &mut Cursor<'_>) -> Option<i32> {
    cursor.attempt(|cursor| {
        let negative = read_sign(cursor);
        let digits = read_digit_run(cursor)?;
        let mut value: i32 = 0;
        for byte in digits.bytes() {
            let digit = i32::from(byte - b'0');
            value = value.checked_mul(10)?;
            value = if negative {
                value.checked_sub(digit)?
            } else {
                value.checked_add(digit)?
            };
        }
        Some(value)
    })
}

/// integer, hard form.
///
/// # Errors
/// [`ParserError::IntegerOverflow`] when the digit run is well-formed but
/// the value does not fit in `i32`; [`ParserError::Syntax`] otherwise.
pub fn expect_integer(cursor: &mut Cursor<'_>) -> Result<i32, ParserError> {
    if let Some(value) = read_integer(cursor) {
        return Ok(value);
    }
    let position = cursor.position();
    let shape_matches = {
        let mark = cursor.mark();
        read_sign(cursor);
        let matched = read_digit_run(cursor).is_some();
        cursor.rewind(mark);
        matched
    };
    if shape_matches {
        Err(ParserError::IntegerOverflow { position })
    } else {
        Err(cursor.syntax_error("integer"))
    }
}

/// float = ["+" / "-"] 1*DIGIT ["." 1*DIGIT]
pub fn read_float(cursor: &mut Cursor<'_>) -> Option<f64> {
    cursor.attempt(|cursor| {
        let mark = cursor.mark();
        read_sign(cursor);
        read_digit_run(cursor)?;
        let _unused = cursor.attempt(|cursor| {
            cursor.eat(b'.').then_some(())?;
            read_digit_run(cursor).map(|_| ())
        });
        let text = String::from_utf8_lossy(cursor.slice_since(mark)).into_owned();
        text.parse().ok()
    })
}

/// boolean = "TRUE" / "FALSE"
pub fn read_boolean(cursor: &mut Cursor<'_>) -> Option<bool> {
    cursor.attempt(|cursor| {
        // Token boundary: "TRUEX" is not a boolean.
        let eaten = if cursor.eat_literal_ci("TRUE") {
            Some(true)
        } else if cursor.eat_literal_ci("FALSE") {
            Some(false)
        } else {
            None
        }?;
        match cursor.peek() {
            Some(byte) if is_alphanum(byte) => None,
            _ => Some(eaten),
        }
    })
}

/// cal-address = uri
pub fn read_cal_address(cursor: &mut Cursor<'_>) -> Option<Uri> {
    read_uri(cursor)
}

#[inline]
fn is_b_char(byte: u8) -> bool {
    is_alphanum(byte) || byte == b'+' || byte == b'/'
}

/// binary = *(4 b-char) [b-end]
///
/// Base64 content is kept encoded; decoding belongs to a consumer that
/// knows what the bytes mean.
pub fn read_binary(cursor: &mut Cursor<'_>) -> Option<String> {
    let mut out = String::new();
    loop {
        let group = cursor.attempt(|cursor| {
            let mut group = String::new();
            for _ in 0..4 {
                group.push(char::from(cursor.eat_if(is_b_char)?));
            }
            Some(group)
        });
        match group {
            Some(group) => out.push_str(&group),
            None => break,
        }
    }
    // b-end = (2 b-char "==") / (3 b-char "=")
    let end = cursor.attempt(|cursor| {
        let mut end = String::new();
        end.push(char::from(cursor.eat_if(is_b_char)?));
        end.push(char::from(cursor.eat_if(is_b_char)?));
        if let Some(third) = cursor.eat_if(is_b_char) {
            end.push(char::from(third));
            cursor.eat(b'=').then_some(())?;
            end.push('=');
        } else {
            cursor.eat(b'=').then_some(())?;
            cursor.eat(b'=').then_some(())?;
            end.push_str("==");
        }
        Some(end)
    });
    if let Some(end) = end {
        out.push_str(&end);
    }
    Some(out)
}

/// geovalue = float ";" float
pub fn read_geo_value(cursor: &mut Cursor<'_>) -> Option<GeoValue> {
    cursor.attempt(|cursor| {
        let lat = read_float(cursor)?;
        cursor.eat(b';').then_some(())?;
        let lon = read_float(cursor)?;
        Some(GeoValue { lat, lon })
    })
}

/// utc-offset = time-numzone = ("+" / "-") time-hour time-minute [time-second]
pub fn read_utc_offset(cursor: &mut Cursor<'_>) -> Option<UtcOffset> {
    datetime::read_utc_offset(cursor)
}

/// 1*2DIGIT helper shared by the recur list grammars.
pub(crate) fn read_one_or_two_digits(cursor: &mut Cursor<'_>) -> Option<u8> {
    cursor.attempt(|cursor| {
        let first = cursor.eat_if(is_digit)?;
        let mut value = first - b'0';
        if let Some(second) = cursor.eat_if(is_digit) {
            value = value * 10 + (second - b'0');
        }
        Some(value)
    })
}

expect_rules! {
    /// float, hard form.
    pub fn expect_float(f64) = read_float, "float";
    /// boolean, hard form.
    pub fn expect_boolean(bool) = read_boolean, "boolean";
    /// cal-address, hard form.
    pub fn expect_cal_address(Uri) = read_cal_address, "cal-address";
    /// binary, hard form.
    pub fn expect_binary(String) = read_binary, "binary";
    /// geovalue, hard form.
    pub fn expect_geo_value(GeoValue) = read_geo_value, "geo value";
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"42", 42)]
    #[case(b"+7", 7)]
    #[case(b"-13", -13)]
    #[case(b"2147483647", i32::MAX)]
    #[case(b"-2147483648", i32::MIN)]
    fn integer_values(#[case] input: &[u8], #[case] expected: i32) {
        assert_eq!(read_integer(&mut Cursor::new(input)), Some(expected));
    }

    #[test]
    fn integer_overflow_is_hard_error() {
        let mut cursor = Cursor::new(b"2147483648");
        assert_eq!(read_integer(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
        assert_eq!(
            expect_integer(&mut cursor),
            Err(ParserError::IntegerOverflow { position: 0 })
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn integer_without_digits_is_syntax_error() {
        let mut cursor = Cursor::new(b"-x");
        assert!(matches!(
            expect_integer(&mut cursor),
            Err(ParserError::Syntax { .. })
        ));
        assert_eq!(cursor.position(), 0);
    }

    #[rstest]
    #[case(b"3.14" as &[u8], 3.14)]
    #[case(b"-17", -17.0)]
    #[case(b"+0.5", 0.5)]
    fn float_values(#[case] input: &[u8], #[case] expected: f64) {
        assert_eq!(read_float(&mut Cursor::new(input)), Some(expected));
    }

    #[test]
    fn float_does_not_eat_bare_dot() {
        let mut cursor = Cursor::new(b"3.x");
        assert_eq!(read_float(&mut cursor), Some(3.0));
        assert_eq!(cursor.peek(), Some(b'.'));
    }

    #[test]
    fn boolean_is_case_insensitive_with_boundary() {
        assert_eq!(read_boolean(&mut Cursor::new(b"true")), Some(true));
        assert_eq!(read_boolean(&mut Cursor::new(b"FALSE")), Some(false));
        assert_eq!(read_boolean(&mut Cursor::new(b"TRUEX")), None);
    }

    #[test]
    fn binary_with_padding() {
        let mut cursor = Cursor::new(b"QUJDRA==");
        assert_eq!(read_binary(&mut cursor).as_deref(), Some("QUJDRA=="));
        assert!(cursor.is_eof());
    }

    #[test]
    fn binary_single_padding() {
        let mut cursor = Cursor::new(b"QUJDREU=");
        assert_eq!(read_binary(&mut cursor).as_deref(), Some("QUJDREU="));
        assert!(cursor.is_eof());
    }

    #[test]
    fn geo_value_pair() {
        let parsed = read_geo_value(&mut Cursor::new(b"37.386013;-122.082932")).unwrap();
        assert_eq!(parsed.lat, 37.386013);
        assert_eq!(parsed.lon, -122.082932);
    }

    #[test]
    fn geo_value_requires_semicolon() {
        let mut cursor = Cursor::new(b"37.0,-122.0");
        assert_eq!(read_geo_value(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }
}
