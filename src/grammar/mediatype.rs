//! Media-type name syntax (RFC 4288 §4.2), for the FMTTYPE parameter.
//!
//! ```text
//! type-name    = reg-name
//! subtype-name = reg-name
//! reg-name     = 1*127( ALPHA / DIGIT / "!" / "#" / "$" / "&" / "." /
//!                       "+" / "-" / "^" / "_" )
//! ```

use crate::cursor::{Cursor, expect_rules};
use crate::grammar::abnf::is_alphanum;

const REG_NAME_MAX: usize = 127;

#[inline]
fn is_reg_name_char(byte: u8) -> bool {
    is_alphanum(byte)
        || matches!(
            byte,
            b'!' | b'#' | b'$' | b'&' | b'.' | b'+' | b'-' | b'^' | b'_'
        )
}

/// reg-name = 1*127( restricted-name-chars )
pub fn read_reg_name(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        let mut out = String::new();
        while out.len() < REG_NAME_MAX {
            match cursor.eat_if(is_reg_name_char) {
                Some(byte) => out.push(char::from(byte)),
                None => break,
            }
        }
        (!out.is_empty()).then_some(out)
    })
}

/// `type-name "/" subtype-name`, returned as the full media type text.
pub fn read_media_type(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        let type_name = read_reg_name(cursor)?;
        cursor.eat(b'/').then_some(())?;
        let subtype_name = read_reg_name(cursor)?;
        Some(format!("{type_name}/{subtype_name}"))
    })
}

expect_rules! {
    /// Media type, hard form.
    pub fn expect_media_type(String) = read_media_type, "media type";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_media_type() {
        let mut cursor = Cursor::new(b"text/plain");
        assert_eq!(read_media_type(&mut cursor).as_deref(), Some("text/plain"));
        assert!(cursor.is_eof());
    }

    #[test]
    fn punctuated_subtype() {
        let mut cursor = Cursor::new(b"application/vnd.ms-excel");
        assert_eq!(
            read_media_type(&mut cursor).as_deref(),
            Some("application/vnd.ms-excel")
        );
    }

    #[test]
    fn missing_subtype_rewinds() {
        let mut cursor = Cursor::new(b"text/");
        assert_eq!(read_media_type(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn reg_name_length_cap() {
        let long = "a".repeat(200);
        let mut cursor = Cursor::new(long.as_bytes());
        let matched = read_reg_name(&mut cursor).expect("should match");
        assert_eq!(matched.len(), 127);
        assert_eq!(cursor.position(), 127);
    }
}
