//! A recursive-descent, backtracking recognizer for the iCalendar grammar
//! (RFC 5545), layered over reusable sub-grammars for URI syntax (RFC 3986),
//! language tags (RFC 5646), media-type names and UTF-8 sequences.
//!
//! Every grammar rule comes in two forms sharing one implementation:
//!
//! - `read_X(&mut Cursor) -> Option<T>` — never fails hard; on a mismatch the
//!   cursor is rewound to where the rule started, so alternatives can be
//!   tried in sequence.
//! - `expect_X(&mut Cursor) -> Result<T, ParserError>` — for positions where
//!   the preceding context makes the production mandatory.
//!
//! The recognizer checks grammar shape only. Calendar validity (month 13,
//! leap seconds, cardinality of properties) is left to a later pass; the
//! required-presence checks the component grammars do perform are part of the
//! grammar itself (a VEVENT body without DTSTAMP and UID is not an eventprop).
//!
//! ```
//! use ical_grammar::parse_calendar;
//!
//! let input = b"BEGIN:VCALENDAR\r\n\
//! PRODID:-//x//y//EN\r\n\
//! VERSION:2.0\r\n\
//! BEGIN:VEVENT\r\n\
//! DTSTAMP:20190101T000000Z\r\n\
//! UID:abc123\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//! let calendar = parse_calendar(input).unwrap();
//! assert_eq!(calendar.properties.version.value, "2.0");
//! ```

pub mod component;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod lex;
pub mod parameter;
pub mod property;
pub mod value;

pub use component::{Calendar, Component};
pub use cursor::{Checkpoint, Cursor};
pub use error::{ParserError, Position};

/// Parses a complete iCalendar stream into a [`Calendar`].
///
/// Input is expected to be unfolded already; long-line folding is a transport
/// concern handled before the grammar sees the bytes. Trailing input after
/// the closing `END:VCALENDAR` is an error.
///
/// # Errors
///
/// Returns the failure that stopped the match, carrying the byte offset
/// where it happened; [`ParserError::locate`] maps that offset to a
/// line/column [`Position`].
pub fn parse_calendar(input: &[u8]) -> Result<Calendar, ParserError> {
    let mut cursor = Cursor::new(input);
    let calendar = component::expect_icalobject(&mut cursor)?;
    if !cursor.is_eof() {
        let position = cursor.position();
        let token = lex::read_iana_token(&mut cursor)
            .unwrap_or_else(|| String::from_utf8_lossy(&input[position..position + 1]).into_owned());
        return Err(ParserError::UnexpectedToken { position, token });
    }
    Ok(calendar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_garbage_is_rejected() {
        let input = b"BEGIN:VCALENDAR\r\n\
PRODID:p\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTAMP:20190101T000000Z\r\n\
UID:u\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n\
leftover";
        let error = parse_calendar(input).expect_err("should fail");
        assert_eq!(
            error,
            ParserError::UnexpectedToken {
                position: input.len() - b"leftover".len(),
                token: "leftover".into(),
            }
        );
    }

    #[test]
    fn error_offsets_map_to_line_and_column() {
        let input = b"BEGIN:VCALENDAR\r\nnope";
        let error = parse_calendar(input).expect_err("should fail");
        assert_eq!(error.locate(input).line, 2);
    }
}
