//! RFC 5234 core ABNF primitives.
//!
//! Byte-class predicates plus the cursor rules built on them. The predicates
//! are reused directly by higher layers that define classes as codepoint
//! ranges (SAFE-CHAR and friends in [`crate::lex`]).

use crate::cursor::{Cursor, expect_rules};

#[inline]
#[must_use]
pub fn is_alpha(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

#[inline]
#[must_use]
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

#[inline]
#[must_use]
pub fn is_alphanum(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

#[inline]
#[must_use]
pub fn is_hexdig(byte: u8) -> bool {
    byte.is_ascii_hexdigit()
}

/// WSP = SP / HTAB
#[inline]
#[must_use]
pub fn is_wsp(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// ALPHA = %x41-5A / %x61-7A
pub fn read_alpha(cursor: &mut Cursor<'_>) -> Option<char> {
    cursor.eat_if(is_alpha).map(char::from)
}

/// DIGIT = %x30-39
pub fn read_digit(cursor: &mut Cursor<'_>) -> Option<char> {
    cursor.eat_if(is_digit).map(char::from)
}

/// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"
pub fn read_hexdig(cursor: &mut Cursor<'_>) -> Option<char> {
    cursor.eat_if(is_hexdig).map(char::from)
}

/// SP = %x20
pub fn read_sp(cursor: &mut Cursor<'_>) -> Option<char> {
    cursor.eat(b' ').then_some(' ')
}

/// HTAB = %x09
pub fn read_htab(cursor: &mut Cursor<'_>) -> Option<char> {
    cursor.eat(b'\t').then_some('\t')
}

/// WSP = SP / HTAB
pub fn read_wsp(cursor: &mut Cursor<'_>) -> Option<char> {
    cursor.eat_if(is_wsp).map(char::from)
}

/// DQUOTE = %x22
pub fn read_dquote(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.eat(b'"').then_some(())
}

/// CRLF = %x0D %x0A
pub fn read_crlf(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.attempt(|cursor| (cursor.eat(b'\r') && cursor.eat(b'\n')).then_some(()))
}

/// Exactly `n` DIGIT bytes, folded into a number.
///
/// Fixed-width digit runs are how RFC 5545 encodes all date/time fields
/// (4-digit year, 2-digit month, ...). Width is at most 9 so the fold cannot
/// overflow `u32`.
pub fn read_fixed_digits(cursor: &mut Cursor<'_>, n: usize) -> Option<u32> {
    debug_assert!(n <= 9);
    cursor.attempt(|cursor| {
        let mut value = 0u32;
        for _ in 0..n {
            let digit = cursor.eat_if(is_digit)?;
            value = value * 10 + u32::from(digit - b'0');
        }
        Some(value)
    })
}

/// 1*DIGIT, returned as the matched text.
pub fn read_digit_run(cursor: &mut Cursor<'_>) -> Option<String> {
    let digits = cursor.repeat1(|cursor| cursor.eat_if(is_digit))?;
    Some(digits.into_iter().map(char::from).collect())
}

/// 1*DIGIT folded into a `u32`; no match when the run does not fit.
pub fn read_digit_value(cursor: &mut Cursor<'_>) -> Option<u32> {
    cursor.attempt(|cursor| {
        let run = read_digit_run(cursor)?;
        run.parse().ok()
    })
}

expect_rules! {
    /// ALPHA, hard form.
    pub fn expect_alpha(char) = read_alpha, "ALPHA";
    /// DIGIT, hard form.
    pub fn expect_digit(char) = read_digit, "DIGIT";
    /// HEXDIG, hard form.
    pub fn expect_hexdig(char) = read_hexdig, "HEXDIG";
    /// WSP, hard form.
    pub fn expect_wsp(char) = read_wsp, "WSP";
    /// CRLF, hard form.
    pub fn expect_crlf(()) = read_crlf, "CRLF";
    /// 1*DIGIT, hard form.
    pub fn expect_digit_run(String) = read_digit_run, "1*DIGIT";
}
