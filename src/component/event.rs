//! eventc: the VEVENT component grammar (RFC 5545 §3.6.1).

use crate::component::{Alarm, component_props, expect_end, read_alarm, read_begin, read_end};
use crate::cursor::{Cursor, expect_rules};
use crate::property::{
    Attach, Attendee, Categories, Class, Comment, Contact, Created, Description, DtEnd, DtStamp,
    DtStart, DurationProp, ExDate, Geo, LastModified, Location, Organizer, Priority, RDate, RRule,
    RecurrenceId, RelatedTo, RequestStatus, Resources, Sequence, Status, Summary, Transp, Uid,
    Url, read_attach, read_attendee, read_categories, read_class, read_comment, read_contact,
    read_created, read_description, read_dtend, read_dtstamp, read_dtstart, read_duration_prop,
    read_exdate, read_geo, read_last_modified, read_location, read_organizer, read_priority,
    read_rdate, read_recurrence_id, read_related_to, read_request_status, read_resources,
    read_rrule, read_sequence, read_status, read_summary, read_transp, read_uid, read_url,
};

component_props! {
    /// One member of the eventprop alternation.
    EventProp, read_eventprop {
        DtStamp(DtStamp) = read_dtstamp,
        Uid(Uid) = read_uid,
        DtStart(DtStart) = read_dtstart,
        Class(Class) = read_class,
        Created(Created) = read_created,
        Description(Description) = read_description,
        Geo(Geo) = read_geo,
        LastModified(LastModified) = read_last_modified,
        Location(Location) = read_location,
        Organizer(Organizer) = read_organizer,
        Priority(Priority) = read_priority,
        Sequence(Sequence) = read_sequence,
        Status(Status) = read_status,
        Summary(Summary) = read_summary,
        Transp(Transp) = read_transp,
        Url(Url) = read_url,
        RecurrenceId(RecurrenceId) = read_recurrence_id,
        RRule(RRule) = read_rrule,
        DtEnd(DtEnd) = read_dtend,
        Duration(DurationProp) = read_duration_prop,
        Attach(Attach) = read_attach,
        Attendee(Attendee) = read_attendee,
        Categories(Categories) = read_categories,
        Comment(Comment) = read_comment,
        Contact(Contact) = read_contact,
        ExDate(ExDate) = read_exdate,
        RequestStatus(RequestStatus) = read_request_status,
        RelatedTo(RelatedTo) = read_related_to,
        Resources(Resources) = read_resources,
        RDate(RDate) = read_rdate,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub properties: Vec<EventProp>,
    pub alarms: Vec<Alarm>,
}

/// eventc = "BEGIN" ":" "VEVENT" CRLF eventprop *alarmc "END" ":" "VEVENT"
/// CRLF — properties and alarms may interleave; DTSTAMP and UID must be
/// present for the body to count as an eventprop at all.
pub fn read_event(cursor: &mut Cursor<'_>) -> Option<Event> {
    cursor.attempt(|cursor| {
        read_begin(cursor, "VEVENT")?;
        let mut properties = Vec::new();
        let mut alarms = Vec::new();
        loop {
            if let Some(prop) = read_eventprop(cursor) {
                properties.push(prop);
            } else if let Some(alarm) = read_alarm(cursor) {
                alarms.push(alarm);
            } else {
                break;
            }
        }
        read_end(cursor, "VEVENT")?;
        let has_dtstamp = properties
            .iter()
            .any(|prop| matches!(prop, EventProp::DtStamp(_)));
        let has_uid = properties
            .iter()
            .any(|prop| matches!(prop, EventProp::Uid(_)));
        (has_dtstamp && has_uid).then_some(Event { properties, alarms })
    })
}

/// eventc, hard form: demanded when the BEGIN marker has already committed
/// the caller to an event.
pub fn expect_event(cursor: &mut Cursor<'_>) -> Result<Event, crate::error::ParserError> {
    if let Some(event) = read_event(cursor) {
        return Ok(event);
    }
    // Re-run the delimiter to pick the most useful error.
    if read_begin(cursor, "VEVENT").is_some() {
        return Err(cursor.syntax_error("event properties"));
    }
    Err(cursor.syntax_error("VEVENT"))
}

expect_rules! {
    /// eventprop member, hard form.
    pub fn expect_eventprop(EventProp) = read_eventprop, "event property";
}
