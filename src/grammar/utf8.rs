//! UTF-8 continuation-sequence grammar.
//!
//! RFC 5545 admits non-ASCII text through the NON-US-ASCII class, defined as
//! a well-formed UTF-8 multi-byte sequence (RFC 3629 §4):
//!
//! ```text
//! UTF8-2 = %xC2-DF UTF8-tail
//! UTF8-3 = %xE0 %xA0-BF UTF8-tail / %xE1-EC 2( UTF8-tail ) /
//!          %xED %x80-9F UTF8-tail / %xEE-EF 2( UTF8-tail )
//! UTF8-4 = %xF0 %x90-BF 2( UTF8-tail ) / %xF1-F3 3( UTF8-tail ) /
//!          %xF4 %x80-8F 2( UTF8-tail )
//! UTF8-tail = %x80-BF
//! ```
//!
//! The rules here both recognize and decode: a match consumes the complete
//! sequence and yields the scalar value, so higher layers can build `String`
//! values without re-validating bytes.

use crate::cursor::{Cursor, expect_rules};

#[inline]
fn is_tail(byte: u8) -> bool {
    (0x80..=0xBF).contains(&byte)
}

/// UTF8-2: two-byte sequence, U+0080..U+07FF.
pub fn read_utf8_2(cursor: &mut Cursor<'_>) -> Option<char> {
    cursor.attempt(|cursor| {
        let lead = cursor.eat_if(|b| (0xC2..=0xDF).contains(&b))?;
        let tail = cursor.eat_if(is_tail)?;
        let scalar = (u32::from(lead) & 0x1F) << 6 | u32::from(tail) & 0x3F;
        char::from_u32(scalar)
    })
}

/// UTF8-3: three-byte sequence, U+0800..U+FFFF excluding surrogates.
pub fn read_utf8_3(cursor: &mut Cursor<'_>) -> Option<char> {
    cursor.attempt(|cursor| {
        let lead = cursor.eat_if(|b| (0xE0..=0xEF).contains(&b))?;
        let second = match lead {
            0xE0 => cursor.eat_if(|b| (0xA0..=0xBF).contains(&b))?,
            0xED => cursor.eat_if(|b| (0x80..=0x9F).contains(&b))?,
            _ => cursor.eat_if(is_tail)?,
        };
        let third = cursor.eat_if(is_tail)?;
        let scalar = (u32::from(lead) & 0x0F) << 12
            | (u32::from(second) & 0x3F) << 6
            | u32::from(third) & 0x3F;
        char::from_u32(scalar)
    })
}

/// UTF8-4: four-byte sequence, U+10000..U+10FFFF.
pub fn read_utf8_4(cursor: &mut Cursor<'_>) -> Option<char> {
    cursor.attempt(|cursor| {
        let lead = cursor.eat_if(|b| (0xF0..=0xF4).contains(&b))?;
        let second = match lead {
            0xF0 => cursor.eat_if(|b| (0x90..=0xBF).contains(&b))?,
            0xF4 => cursor.eat_if(|b| (0x80..=0x8F).contains(&b))?,
            _ => cursor.eat_if(is_tail)?,
        };
        let third = cursor.eat_if(is_tail)?;
        let fourth = cursor.eat_if(is_tail)?;
        let scalar = (u32::from(lead) & 0x07) << 18
            | (u32::from(second) & 0x3F) << 12
            | (u32::from(third) & 0x3F) << 6
            | u32::from(fourth) & 0x3F;
        char::from_u32(scalar)
    })
}

/// NON-US-ASCII = UTF8-2 / UTF8-3 / UTF8-4
pub fn read_non_us_ascii(cursor: &mut Cursor<'_>) -> Option<char> {
    read_utf8_2(cursor)
        .or_else(|| read_utf8_3(cursor))
        .or_else(|| read_utf8_4(cursor))
}

expect_rules! {
    /// NON-US-ASCII, hard form.
    pub fn expect_non_us_ascii(char) = read_non_us_ascii, "NON-US-ASCII";
}
