//! journalc: the VJOURNAL component grammar (RFC 5545 §3.6.3).

use crate::component::{component_props, read_begin, read_end};
use crate::cursor::{Cursor, expect_rules};
use crate::property::{
    Attach, Attendee, Categories, Class, Comment, Contact, Created, Description, DtStamp,
    DtStart, ExDate, LastModified, Organizer, RDate, RRule, RecurrenceId, RelatedTo,
    RequestStatus, Sequence, Status, Summary, Uid, Url, read_attach, read_attendee,
    read_categories, read_class, read_comment, read_contact, read_created, read_description,
    read_dtstamp, read_dtstart, read_exdate, read_last_modified, read_organizer, read_rdate,
    read_recurrence_id, read_related_to, read_request_status, read_rrule, read_sequence,
    read_status, read_summary, read_uid, read_url,
};

component_props! {
    /// One member of the jourprop alternation.
    JournalProp, read_journalprop {
        DtStamp(DtStamp) = read_dtstamp,
        Uid(Uid) = read_uid,
        Class(Class) = read_class,
        Created(Created) = read_created,
        DtStart(DtStart) = read_dtstart,
        LastModified(LastModified) = read_last_modified,
        Organizer(Organizer) = read_organizer,
        RecurrenceId(RecurrenceId) = read_recurrence_id,
        Sequence(Sequence) = read_sequence,
        Status(Status) = read_status,
        Summary(Summary) = read_summary,
        Url(Url) = read_url,
        RRule(RRule) = read_rrule,
        Attach(Attach) = read_attach,
        Attendee(Attendee) = read_attendee,
        Categories(Categories) = read_categories,
        Comment(Comment) = read_comment,
        Contact(Contact) = read_contact,
        Description(Description) = read_description,
        ExDate(ExDate) = read_exdate,
        RelatedTo(RelatedTo) = read_related_to,
        RDate(RDate) = read_rdate,
        RequestStatus(RequestStatus) = read_request_status,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Journal {
    pub properties: Vec<JournalProp>,
}

/// journalc = "BEGIN" ":" "VJOURNAL" CRLF jourprop "END" ":" "VJOURNAL" CRLF
pub fn read_journal(cursor: &mut Cursor<'_>) -> Option<Journal> {
    cursor.attempt(|cursor| {
        read_begin(cursor, "VJOURNAL")?;
        let properties = cursor.repeat(read_journalprop);
        read_end(cursor, "VJOURNAL")?;
        let has_dtstamp = properties
            .iter()
            .any(|prop| matches!(prop, JournalProp::DtStamp(_)));
        let has_uid = properties
            .iter()
            .any(|prop| matches!(prop, JournalProp::Uid(_)));
        (has_dtstamp && has_uid).then_some(Journal { properties })
    })
}

expect_rules! {
    /// journalc, hard form.
    pub fn expect_journal(Journal) = read_journal, "VJOURNAL";
}
