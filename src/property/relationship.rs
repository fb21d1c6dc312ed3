//! Relationship and miscellaneous component properties (RFC 5545 §3.8.4,
//! §3.8.8.3).

use crate::cursor::Cursor;
use crate::grammar::abnf::read_digit_value;
use crate::grammar::uri::{Uri, read_uri};
use crate::lex::read_text;
use crate::parameter::Parameter;
use crate::property::{DateOrDateTime, plain, property, read_date_or_date_time};
use crate::value::read_cal_address;

/// rstatus value: `statcode ";" statdesc [";" extdata]`.
///
/// `statcode = 1*DIGIT 1*2("." 1*DIGIT)`, stored as two or three numeric
/// groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestStatusValue {
    pub statcode: Vec<u32>,
    pub statdesc: String,
    pub extdata: Option<String>,
}

fn read_statcode(cursor: &mut Cursor<'_>) -> Option<Vec<u32>> {
    cursor.attempt(|cursor| {
        let mut code = vec![read_digit_value(cursor)?];
        for _ in 0..2 {
            let Some(part) = cursor.attempt(|cursor| {
                cursor.eat(b'.').then_some(())?;
                read_digit_value(cursor)
            }) else {
                break;
            };
            code.push(part);
        }
        (code.len() >= 2).then_some(code)
    })
}

fn read_request_status_value(
    cursor: &mut Cursor<'_>,
    _params: &[Parameter],
) -> Option<RequestStatusValue> {
    cursor.attempt(|cursor| {
        let statcode = read_statcode(cursor)?;
        cursor.eat(b';').then_some(())?;
        let statdesc = read_text(cursor)?;
        let extdata = cursor.attempt(|cursor| {
            cursor.eat(b';').then_some(())?;
            read_text(cursor)
        });
        Some(RequestStatusValue {
            statcode,
            statdesc,
            extdata,
        })
    })
}

property! {
    /// attendee = "ATTENDEE" attparam ":" cal-address CRLF
    "ATTENDEE", Attendee(Uri), read_attendee / expect_attendee = plain!(read_cal_address);
    /// contact = "CONTACT" contparam ":" text CRLF
    "CONTACT", Contact(String), read_contact / expect_contact = plain!(read_text);
    /// organizer = "ORGANIZER" orgparam ":" cal-address CRLF
    "ORGANIZER", Organizer(Uri), read_organizer / expect_organizer = plain!(read_cal_address);
    /// recurid = "RECURRENCE-ID" ridparam ":" ridval CRLF
    "RECURRENCE-ID", RecurrenceId(DateOrDateTime),
        read_recurrence_id / expect_recurrence_id = read_date_or_date_time;
    /// related = "RELATED-TO" relparam ":" text CRLF
    "RELATED-TO", RelatedTo(String), read_related_to / expect_related_to = plain!(read_text);
    /// url = "URL" urlparam ":" uri CRLF
    "URL", Url(Uri), read_url / expect_url = plain!(read_uri);
    /// uid = "UID" uidparam ":" text CRLF
    "UID", Uid(String), read_uid / expect_uid = plain!(read_text);
    /// rstatus = "REQUEST-STATUS" rstatparam ":" statcode ";" statdesc [";" extdata]
    "REQUEST-STATUS", RequestStatus(RequestStatusValue),
        read_request_status / expect_request_status = read_request_status_value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::{PartStat, Role};

    #[test]
    fn attendee_with_typed_params() {
        let mut cursor = Cursor::new(
            b"ATTENDEE;ROLE=REQ-PARTICIPANT;PARTSTAT=TENTATIVE:mailto:joecool@example.com\r\n",
        );
        let prop = read_attendee(&mut cursor).expect("should parse");
        assert!(cursor.is_eof());
        assert_eq!(prop.value.scheme, "mailto");
        assert_eq!(
            prop.params,
            vec![
                Parameter::Role(Role::ReqParticipant),
                Parameter::PartStat(PartStat::Tentative),
            ]
        );
    }

    #[test]
    fn organizer_is_a_cal_address() {
        let mut cursor = Cursor::new(b"ORGANIZER;CN=John Smith:mailto:jsmith@example.com\r\n");
        let prop = read_organizer(&mut cursor).expect("should parse");
        assert_eq!(prop.value.hier_part, "jsmith@example.com");
    }

    #[test]
    fn uid_is_plain_text() {
        let mut cursor = Cursor::new(b"UID:19960401T080045Z-4000F192713-0052@example.com\r\n");
        let prop = read_uid(&mut cursor).expect("should parse");
        assert_eq!(prop.value, "19960401T080045Z-4000F192713-0052@example.com");
    }

    #[test]
    fn request_status_with_extdata() {
        let mut cursor =
            Cursor::new(b"REQUEST-STATUS:3.7;Invalid calendar user;ATTENDEE:mailto:j@x.com\r\n");
        let prop = read_request_status(&mut cursor).expect("should parse");
        assert_eq!(prop.value.statcode, vec![3, 7]);
        assert_eq!(prop.value.statdesc, "Invalid calendar user");
        assert_eq!(
            prop.value.extdata.as_deref(),
            Some("ATTENDEE:mailto:j@x.com")
        );
    }

    #[test]
    fn statcode_needs_at_least_two_groups() {
        let mut cursor = Cursor::new(b"REQUEST-STATUS:3;oops\r\n");
        assert_eq!(read_request_status(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }
}
