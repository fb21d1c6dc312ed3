//! iCalendar lexical layer: character classes, identifiers, parameter
//! values and line terminators (RFC 5545 §3.1–§3.3).
//!
//! Codepoint ranges are spelled out exactly as the ABNF gives them. All
//! classes fold NON-US-ASCII in through the UTF-8 sequence grammar, so a
//! single call consumes a complete multi-byte character or nothing.

pub mod contentline;
pub use contentline::{ContentLine, RawParam, read_contentline};

use crate::cursor::{Cursor, expect_rules};
use crate::grammar::abnf::{is_alphanum, is_wsp};
use crate::grammar::utf8::read_non_us_ascii;

/// CONTROL = %x00-08 / %x0A-1F / %x7F (all controls except HTAB)
#[inline]
#[must_use]
pub fn is_control(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0A..=0x1F | 0x7F)
}

/// SAFE-CHAR = WSP / %x21 / %x23-2B / %x2D-39 / %x3C-7E / NON-US-ASCII
///
/// Printable ASCII minus DQUOTE, ";", ":", ",".
pub fn read_safe_char(cursor: &mut Cursor<'_>) -> Option<char> {
    if let Some(byte) = cursor.eat_if(|b| {
        is_wsp(b) || b == 0x21 || (0x23..=0x2B).contains(&b) || (0x2D..=0x39).contains(&b)
            || (0x3C..=0x7E).contains(&b)
    }) {
        return Some(char::from(byte));
    }
    read_non_us_ascii(cursor)
}

/// QSAFE-CHAR = WSP / %x21 / %x23-7E / NON-US-ASCII
///
/// Anything printable except DQUOTE.
pub fn read_qsafe_char(cursor: &mut Cursor<'_>) -> Option<char> {
    if let Some(byte) =
        cursor.eat_if(|b| is_wsp(b) || b == 0x21 || (0x23..=0x7E).contains(&b))
    {
        return Some(char::from(byte));
    }
    read_non_us_ascii(cursor)
}

/// VALUE-CHAR = WSP / %x21-7E / NON-US-ASCII
pub fn read_value_char(cursor: &mut Cursor<'_>) -> Option<char> {
    if let Some(byte) = cursor.eat_if(|b| is_wsp(b) || (0x21..=0x7E).contains(&b)) {
        return Some(char::from(byte));
    }
    read_non_us_ascii(cursor)
}

/// TSAFE-CHAR = WSP / %x21 / %x23-2B / %x2D-39 / %x3C-5B / %x5D-7E / NON-US-ASCII
///
/// SAFE-CHAR additionally minus "\" (0x5C); ":" is re-admitted at the `text`
/// level, not here.
pub fn read_tsafe_char(cursor: &mut Cursor<'_>) -> Option<char> {
    if let Some(byte) = cursor.eat_if(|b| {
        is_wsp(b) || b == 0x21 || (0x23..=0x2B).contains(&b) || (0x2D..=0x39).contains(&b)
            || (0x3C..=0x5B).contains(&b) || (0x5D..=0x7E).contains(&b)
    }) {
        return Some(char::from(byte));
    }
    read_non_us_ascii(cursor)
}

/// ESCAPED-CHAR = ("\\" "\\") / ("\\" ";") / ("\\" ",") / ("\\" "N") / ("\\" "n")
///
/// Returned decoded: `\n`/`\N` become a newline.
pub fn read_escaped_char(cursor: &mut Cursor<'_>) -> Option<char> {
    cursor.attempt(|cursor| {
        cursor.eat(b'\\').then_some(())?;
        match cursor.advance()? {
            b'\\' => Some('\\'),
            b';' => Some(';'),
            b',' => Some(','),
            b'N' | b'n' => Some('\n'),
            _ => None,
        }
    })
}

/// text = *( TSAFE-CHAR / ":" / DQUOTE / ESCAPED-CHAR )
///
/// Always matches (possibly empty); escapes come back decoded.
pub fn read_text(cursor: &mut Cursor<'_>) -> Option<String> {
    let mut out = String::new();
    loop {
        if let Some(ch) = read_tsafe_char(cursor) {
            out.push(ch);
        } else if let Some(byte) = cursor.eat_if(|b| b == b':' || b == b'"') {
            out.push(char::from(byte));
        } else if let Some(ch) = read_escaped_char(cursor) {
            out.push(ch);
        } else {
            return Some(out);
        }
    }
}

/// value = *VALUE-CHAR, the fallback value grammar for unknown properties.
pub fn read_raw_value(cursor: &mut Cursor<'_>) -> Option<String> {
    let mut out = String::new();
    while let Some(ch) = read_value_char(cursor) {
        out.push(ch);
    }
    Some(out)
}

#[inline]
fn is_token_char(byte: u8) -> bool {
    is_alphanum(byte) || byte == b'-'
}

/// iana-token = 1*(ALPHA / DIGIT / "-")
pub fn read_iana_token(cursor: &mut Cursor<'_>) -> Option<String> {
    let bytes = cursor.repeat1(|cursor| cursor.eat_if(is_token_char))?;
    Some(bytes.into_iter().map(char::from).collect())
}

/// vendorid = 3*(ALPHA / DIGIT)
pub fn read_vendorid(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        let bytes = cursor.repeat1(|cursor| cursor.eat_if(is_alphanum))?;
        (bytes.len() >= 3).then(|| bytes.into_iter().map(char::from).collect())
    })
}

/// x-name = "X-" [vendorid "-"] 1*(ALPHA / DIGIT / "-")
///
/// Returned with the "X-" prefix intact.
pub fn read_x_name(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        cursor.eat_literal_ci("X-").then_some(())?;
        let mut name = String::from("X-");
        let vendor = cursor.attempt(|cursor| {
            let id = read_vendorid(cursor)?;
            cursor.eat(b'-').then_some(id)
        });
        if let Some(id) = vendor {
            name.push_str(&id);
            name.push('-');
        }
        let rest = read_iana_token(cursor)?;
        name.push_str(&rest);
        Some(name)
    })
}

/// name = iana-token / x-name
///
/// iana-token is tried first; the two alternatives overlap on the "X-"
/// prefix and either match yields the same text, so first-match-wins.
pub fn read_name(cursor: &mut Cursor<'_>) -> Option<String> {
    read_iana_token(cursor).or_else(|| read_x_name(cursor))
}

/// paramtext = *SAFE-CHAR (always matches, possibly empty)
pub fn read_paramtext(cursor: &mut Cursor<'_>) -> Option<String> {
    let mut out = String::new();
    while let Some(ch) = read_safe_char(cursor) {
        out.push(ch);
    }
    Some(out)
}

/// quoted-string = DQUOTE *QSAFE-CHAR DQUOTE
pub fn read_quoted_string(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        cursor.eat(b'"').then_some(())?;
        let mut out = String::new();
        while let Some(ch) = read_qsafe_char(cursor) {
            out.push(ch);
        }
        cursor.eat(b'"').then_some(out)
    })
}

/// param-value = quoted-string / paramtext
///
/// quoted-string MUST be tried first: paramtext matches the empty string, so
/// the published grammar order would "succeed" with zero length on a quote
/// and strand the quoted form.
pub fn read_param_value(cursor: &mut Cursor<'_>) -> Option<String> {
    read_quoted_string(cursor).or_else(|| read_paramtext(cursor))
}

/// Line terminator: CRLF, lone CR, lone LF, or end of input.
///
/// The bare-CR/LF and EOF forms are intentional deviations from RFC 5545,
/// which demands CRLF; real-world feeds drop the CR often enough that the
/// grammar accepts all three, plus an unterminated final line.
pub fn read_line_break(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.attempt(|cursor| match cursor.advance() {
        Some(b'\r') => {
            cursor.eat(b'\n');
            Some(())
        }
        Some(b'\n') => Some(()),
        Some(_) => None,
        None => Some(()),
    })
}

expect_rules! {
    /// iana-token, hard form.
    pub fn expect_iana_token(String) = read_iana_token, "IANA token";
    /// x-name, hard form.
    pub fn expect_x_name(String) = read_x_name, "X-name";
    /// name, hard form.
    pub fn expect_name(String) = read_name, "name";
    /// quoted-string, hard form.
    pub fn expect_quoted_string(String) = read_quoted_string, "quoted string";
    /// param-value, hard form.
    pub fn expect_param_value(String) = read_param_value, "parameter value";
    /// text, hard form.
    pub fn expect_text(String) = read_text, "text";
    /// Line terminator, hard form.
    pub fn expect_line_break(()) = read_line_break, "line break";
}
