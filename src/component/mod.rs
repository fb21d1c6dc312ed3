//! Component grammars (RFC 5545 §3.6): `BEGIN:TAG ... END:TAG` blocks.
//!
//! Component bodies are unordered Kleene-star property loops: each body rule
//! keeps trying its member productions until none match, then checks that the
//! properties the RFC marks REQUIRED are present at least once. Cardinality
//! beyond presence is not enforced here; that belongs to a validation pass
//! over the finished tree.

use crate::cursor::{Cursor, expect_rules};
use crate::error::ParserError;
use crate::lex::read_line_break;

mod alarm;
pub use alarm::*;
mod calendar;
pub use calendar::*;
mod event;
pub use event::*;
mod extension;
pub use extension::*;
mod freebusy;
pub use freebusy::*;
mod journal;
pub use journal::*;
mod timezone;
pub use timezone::*;
mod todo;
pub use todo::*;

/// One calendar component, tagged by which grammar matched.
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum Component {
    Event(Event),
    Todo(Todo),
    Journal(Journal),
    FreeBusy(FreeBusy),
    Timezone(Timezone),
    Iana(IanaComp),
    X(XComp),
}

/// `"BEGIN" ":" TAG CRLF` for a fixed tag.
pub(crate) fn read_begin(cursor: &mut Cursor<'_>, tag: &str) -> Option<()> {
    read_delimiter(cursor, "BEGIN", tag)
}

/// `"END" ":" TAG CRLF` for a fixed tag.
pub(crate) fn read_end(cursor: &mut Cursor<'_>, tag: &str) -> Option<()> {
    read_delimiter(cursor, "END", tag)
}

fn read_delimiter(cursor: &mut Cursor<'_>, key: &str, tag: &str) -> Option<()> {
    cursor.attempt(|cursor| {
        cursor.eat_literal_ci(key).then_some(())?;
        cursor.eat(b':').then_some(())?;
        cursor.eat_literal_ci(tag).then_some(())?;
        read_line_break(cursor)
    })
}

/// Hard form of [`read_end`]: once a component body has been consumed, its
/// closing delimiter is mandatory.
pub(crate) fn expect_end(cursor: &mut Cursor<'_>, tag: &str) -> Result<(), ParserError> {
    read_end(cursor, tag).ok_or_else(|| ParserError::KeyValuePairExpected {
        position: cursor.position(),
        key: "END".into(),
        value: tag.to_owned(),
    })
}

/// Defines a component-body property enum and its alternation rule. Specific
/// properties are tried in declaration order; the IANA/X extension fallback
/// always comes last so it cannot shadow a registered property.
macro_rules! component_props {
    ($(#[$meta:meta])* $enum:ident, $read:ident {
        $($variant:ident($ty:ty) = $rule:path,)+
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $enum {
            $($variant($ty),)+
            Ext($crate::property::ExtProp),
        }

        pub fn $read(
            cursor: &mut $crate::cursor::Cursor<'_>,
        ) -> Option<$enum> {
            $(
                if let Some(prop) = $rule(cursor) {
                    return Some($enum::$variant(prop));
                }
            )+
            $crate::property::read_ext_prop(cursor).map($enum::Ext)
        }
    };
}
pub(crate) use component_props;

/// component = 1*(eventc / todoc / journalc / freebusyc / timezonec /
///               iana-comp / x-comp)
///
/// The named grammars go first; the generic IANA form would otherwise match
/// any `BEGIN:` tag, including the registered ones.
pub fn read_component_single(cursor: &mut Cursor<'_>) -> Option<Component> {
    if let Some(event) = read_event(cursor) {
        return Some(event.into());
    }
    if let Some(todo) = read_todo(cursor) {
        return Some(todo.into());
    }
    if let Some(journal) = read_journal(cursor) {
        return Some(journal.into());
    }
    if let Some(freebusy) = read_freebusy_comp(cursor) {
        return Some(freebusy.into());
    }
    if let Some(timezone) = read_timezone(cursor) {
        return Some(timezone.into());
    }
    if let Some(x_comp) = read_x_comp(cursor) {
        return Some(x_comp.into());
    }
    read_iana_comp(cursor).map(Component::Iana)
}

/// At least one component.
pub fn read_component(cursor: &mut Cursor<'_>) -> Option<Vec<Component>> {
    cursor.repeat1(read_component_single)
}

expect_rules! {
    /// component-single, hard form.
    pub fn expect_component_single(Component) = read_component_single, "component";
    /// component, hard form.
    pub fn expect_component(Vec<Component>) = read_component, "at least one component";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_end_delimiters() {
        let mut cursor = Cursor::new(b"BEGIN:VEVENT\r\n");
        assert_eq!(read_begin(&mut cursor, "VEVENT"), Some(()));
        assert!(cursor.is_eof());

        let mut cursor = Cursor::new(b"BEGIN:VEVENT\r\n");
        assert_eq!(read_begin(&mut cursor, "VTODO"), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn expect_end_reports_the_marker() {
        let mut cursor = Cursor::new(b"SUMMARY:x\r\n");
        let error = expect_end(&mut cursor, "VEVENT").expect_err("should fail");
        assert_eq!(
            error,
            ParserError::KeyValuePairExpected {
                position: 0,
                key: "END".into(),
                value: "VEVENT".into(),
            }
        );
    }

    #[test]
    fn named_component_wins_over_generic() {
        let input = b"BEGIN:VEVENT\r\nDTSTAMP:20190101T000000Z\r\nUID:abc\r\nEND:VEVENT\r\n";
        let mut cursor = Cursor::new(input);
        let component = read_component_single(&mut cursor).expect("should parse");
        assert!(matches!(component, Component::Event(_)));
    }

    #[test]
    fn unknown_tag_falls_through_to_iana() {
        let input = b"BEGIN:VAVAILABILITY\r\nUID:a1\r\nEND:VAVAILABILITY\r\n";
        let mut cursor = Cursor::new(input);
        let component = read_component_single(&mut cursor).expect("should parse");
        assert!(matches!(component, Component::Iana(_)));
    }
}
