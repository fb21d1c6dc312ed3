//! iana-comp / x-comp: generic extension components (RFC 5545 §3.6).
//!
//! The body is an unconstrained run of content lines; only BEGIN/END-named
//! lines are excluded so the block's own delimiters (and any enclosing ones)
//! stay visible. The closing tag must repeat the opening tag.

use crate::component::read_begin;
use crate::cursor::{Cursor, expect_rules};
use crate::lex::{ContentLine, read_contentline, read_iana_token, read_line_break, read_x_name};

#[derive(Debug, Clone, PartialEq)]
pub struct IanaComp {
    pub name: String,
    pub lines: Vec<ContentLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XComp {
    pub name: String,
    pub lines: Vec<ContentLine>,
}

/// A content line whose name is not a component delimiter.
fn read_body_line(cursor: &mut Cursor<'_>) -> Option<ContentLine> {
    cursor.attempt(|cursor| {
        let line = read_contentline(cursor)?;
        let delimiter =
            line.name.eq_ignore_ascii_case("BEGIN") || line.name.eq_ignore_ascii_case("END");
        (!delimiter).then_some(line)
    })
}

fn read_matching_end(cursor: &mut Cursor<'_>, tag: &str) -> Option<()> {
    cursor.attempt(|cursor| {
        cursor.eat_literal_ci("END").then_some(())?;
        cursor.eat(b':').then_some(())?;
        cursor.eat_literal_ci(tag).then_some(())?;
        read_line_break(cursor)
    })
}

/// x-comp = "BEGIN" ":" x-name CRLF 1*contentline "END" ":" x-name CRLF
pub fn read_x_comp(cursor: &mut Cursor<'_>) -> Option<XComp> {
    cursor.attempt(|cursor| {
        cursor.eat_literal_ci("BEGIN").then_some(())?;
        cursor.eat(b':').then_some(())?;
        let name = read_x_name(cursor)?;
        read_line_break(cursor)?;
        let lines = cursor.repeat1(read_body_line)?;
        read_matching_end(cursor, &name)?;
        Some(XComp { name, lines })
    })
}

/// iana-comp = "BEGIN" ":" iana-token CRLF 1*contentline "END" ":"
/// iana-token CRLF
pub fn read_iana_comp(cursor: &mut Cursor<'_>) -> Option<IanaComp> {
    cursor.attempt(|cursor| {
        cursor.eat_literal_ci("BEGIN").then_some(())?;
        cursor.eat(b':').then_some(())?;
        let name = read_iana_token(cursor)?;
        read_line_break(cursor)?;
        let lines = cursor.repeat1(read_body_line)?;
        read_matching_end(cursor, &name)?;
        Some(IanaComp { name, lines })
    })
}

expect_rules! {
    /// x-comp, hard form.
    pub fn expect_x_comp(XComp) = read_x_comp, "X- component";
    /// iana-comp, hard form.
    pub fn expect_iana_comp(IanaComp) = read_iana_comp, "IANA component";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_component_round_trip() {
        let input = b"BEGIN:X-OFFICE-HOURS\r\n\
DAY:MONDAY\r\n\
OPEN:0900\r\n\
END:X-OFFICE-HOURS\r\n";
        let mut cursor = Cursor::new(input);
        let comp = read_x_comp(&mut cursor).expect("should parse");
        assert!(cursor.is_eof());
        assert_eq!(comp.name, "X-OFFICE-HOURS");
        assert_eq!(comp.lines.len(), 2);
        assert_eq!(comp.lines[0].name, "DAY");
    }

    #[test]
    fn mismatched_end_tag_fails() {
        let input = b"BEGIN:X-A\r\nK:V\r\nEND:X-B\r\n";
        let mut cursor = Cursor::new(input);
        assert_eq!(read_x_comp(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn body_cannot_swallow_enclosing_end() {
        // The content-line loop must stop at END:, not consume it as a line.
        let input = b"BEGIN:VAVAILABILITY\r\nUID:u\r\nEND:VAVAILABILITY\r\nEND:VCALENDAR\r\n";
        let mut cursor = Cursor::new(input);
        let comp = read_iana_comp(&mut cursor).expect("should parse");
        assert_eq!(comp.lines.len(), 1);
        assert_eq!(
            &cursor.input()[cursor.position()..cursor.position() + 3],
            b"END"
        );
    }

    #[test]
    fn empty_body_fails() {
        let input = b"BEGIN:X-A\r\nEND:X-A\r\n";
        let mut cursor = Cursor::new(input);
        assert_eq!(read_x_comp(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }
}
