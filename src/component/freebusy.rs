//! freebusyc: the VFREEBUSY component grammar (RFC 5545 §3.6.4).

use crate::component::{component_props, read_begin, read_end};
use crate::cursor::{Cursor, expect_rules};
use crate::property::{
    Attendee, Comment, Contact, DtEnd, DtStamp, DtStart, FreeBusy as FreeBusyProp, Organizer,
    RequestStatus, Uid, Url, read_attendee, read_comment, read_contact, read_dtend, read_dtstamp,
    read_dtstart, read_freebusy, read_organizer, read_request_status, read_uid, read_url,
};

component_props! {
    /// One member of the fbprop alternation.
    FbProp, read_fbprop {
        DtStamp(DtStamp) = read_dtstamp,
        Uid(Uid) = read_uid,
        Contact(Contact) = read_contact,
        DtStart(DtStart) = read_dtstart,
        DtEnd(DtEnd) = read_dtend,
        Organizer(Organizer) = read_organizer,
        Url(Url) = read_url,
        Attendee(Attendee) = read_attendee,
        Comment(Comment) = read_comment,
        FreeBusy(FreeBusyProp) = read_freebusy,
        RequestStatus(RequestStatus) = read_request_status,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FreeBusy {
    pub properties: Vec<FbProp>,
}

/// freebusyc = "BEGIN" ":" "VFREEBUSY" CRLF fbprop "END" ":" "VFREEBUSY" CRLF
pub fn read_freebusy_comp(cursor: &mut Cursor<'_>) -> Option<FreeBusy> {
    cursor.attempt(|cursor| {
        read_begin(cursor, "VFREEBUSY")?;
        let properties = cursor.repeat(read_fbprop);
        read_end(cursor, "VFREEBUSY")?;
        let has_dtstamp = properties
            .iter()
            .any(|prop| matches!(prop, FbProp::DtStamp(_)));
        let has_uid = properties.iter().any(|prop| matches!(prop, FbProp::Uid(_)));
        (has_dtstamp && has_uid).then_some(FreeBusy { properties })
    })
}

expect_rules! {
    /// freebusyc, hard form.
    pub fn expect_freebusy_comp(FreeBusy) = read_freebusy_comp, "VFREEBUSY";
}
