//! The top-level `icalobject` grammar and calendar header properties
//! (RFC 5545 §3.4, §3.6).

use crate::component::{Component, expect_end, read_begin, read_component, read_end};
use crate::cursor::{Cursor, expect_rules};
use crate::error::ParserError;
use crate::property::{
    CalScale, ExtProp, Method, ProdId, Version, read_calscale, read_ext_prop, read_method,
    read_prodid, read_version,
};

/// The calendar header: `calprops` with PRODID and VERSION required.
///
/// Extra occurrences of a single-slot property overwrite the previous one;
/// counting them is a validation concern, not a recognition one.
#[derive(Debug, Clone, PartialEq)]
pub struct CalProps {
    pub prod_id: ProdId,
    pub version: Version,
    pub calscale: Option<CalScale>,
    pub method: Option<Method>,
    pub extensions: Vec<ExtProp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    pub properties: CalProps,
    pub components: Vec<Component>,
}

/// calprops = *(prodid / version / calscale / method / x-prop / iana-prop)
pub fn read_calprops(cursor: &mut Cursor<'_>) -> Option<CalProps> {
    cursor.attempt(|cursor| {
        let mut prod_id = None;
        let mut version = None;
        let mut calscale = None;
        let mut method = None;
        let mut extensions = Vec::new();
        loop {
            if let Some(prop) = read_prodid(cursor) {
                prod_id = Some(prop);
            } else if let Some(prop) = read_version(cursor) {
                version = Some(prop);
            } else if let Some(prop) = read_calscale(cursor) {
                calscale = Some(prop);
            } else if let Some(prop) = read_method(cursor) {
                method = Some(prop);
            } else if let Some(prop) = read_ext_prop(cursor) {
                extensions.push(prop);
            } else {
                break;
            }
        }
        Some(CalProps {
            prod_id: prod_id?,
            version: version?,
            calscale,
            method,
            extensions,
        })
    })
}

/// icalobject = "BEGIN" ":" "VCALENDAR" CRLF icalbody "END" ":" "VCALENDAR"
/// CRLF, with icalbody = calprops component.
pub fn read_icalobject(cursor: &mut Cursor<'_>) -> Option<Calendar> {
    cursor.attempt(|cursor| {
        read_begin(cursor, "VCALENDAR")?;
        let properties = read_calprops(cursor)?;
        let components = read_component(cursor)?;
        read_end(cursor, "VCALENDAR")?;
        Some(Calendar {
            properties,
            components,
        })
    })
}

expect_rules! {
    /// calprops, hard form.
    pub fn expect_calprops(CalProps) = read_calprops, "calendar properties";
}

/// icalobject, hard form. The closing delimiter failure is reported as the
/// missing END marker rather than a generic mismatch.
pub fn expect_icalobject(cursor: &mut Cursor<'_>) -> Result<Calendar, ParserError> {
    if read_begin(cursor, "VCALENDAR").is_none() {
        return Err(ParserError::KeyValuePairExpected {
            position: cursor.position(),
            key: "BEGIN".into(),
            value: "VCALENDAR".into(),
        });
    }
    let properties =
        read_calprops(cursor).ok_or_else(|| cursor.syntax_error("calendar properties"))?;
    let components = read_component(cursor).ok_or_else(|| cursor.syntax_error("component"))?;
    expect_end(cursor, "VCALENDAR")?;
    Ok(Calendar {
        properties,
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &[u8] = b"BEGIN:VCALENDAR\r\n\
PRODID:-//x//y//EN\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTAMP:20190101T000000Z\r\n\
UID:abc123\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test]
    fn minimal_calendar() {
        let mut cursor = Cursor::new(MINIMAL);
        let calendar = read_icalobject(&mut cursor).expect("should parse");
        assert!(cursor.is_eof());
        assert_eq!(calendar.properties.prod_id.value, "-//x//y//EN");
        assert_eq!(calendar.properties.version.value, "2.0");
        assert_eq!(calendar.components.len(), 1);
        assert!(matches!(calendar.components[0], Component::Event(_)));
    }

    #[test]
    fn missing_version_fails() {
        let input = b"BEGIN:VCALENDAR\r\n\
PRODID:-//x//y//EN\r\n\
BEGIN:VEVENT\r\n\
DTSTAMP:20190101T000000Z\r\n\
UID:abc123\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let mut cursor = Cursor::new(input);
        assert_eq!(read_icalobject(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn calendar_without_components_fails() {
        let input = b"BEGIN:VCALENDAR\r\nPRODID:p\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
        let mut cursor = Cursor::new(input);
        assert_eq!(read_icalobject(&mut cursor), None);
        let error = expect_icalobject(&mut cursor).expect_err("should fail");
        assert!(error.position() > 0);
    }

    #[test]
    fn header_properties_in_any_order() {
        let input = b"BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
CALSCALE:GREGORIAN\r\n\
X-WR-CALNAME:Team\r\n\
PRODID:p\r\n\
BEGIN:VEVENT\r\n\
DTSTAMP:20190101T000000Z\r\n\
UID:u\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let mut cursor = Cursor::new(input);
        let calendar = read_icalobject(&mut cursor).expect("should parse");
        assert!(calendar.properties.calscale.is_some());
        assert_eq!(calendar.properties.extensions.len(), 1);
    }
}
