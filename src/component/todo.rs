//! todoc: the VTODO component grammar (RFC 5545 §3.6.2).

use crate::component::{Alarm, component_props, read_alarm, read_begin, read_end};
use crate::cursor::{Cursor, expect_rules};
use crate::property::{
    Attach, Attendee, Categories, Class, Comment, Completed, Contact, Created, Description,
    DtStamp, DtStart, Due, DurationProp, ExDate, Geo, LastModified, Location, Organizer,
    PercentComplete, Priority, RDate, RRule, RecurrenceId, RelatedTo, RequestStatus, Resources,
    Sequence, Status, Summary, Uid, Url, read_attach, read_attendee, read_categories, read_class,
    read_comment, read_completed, read_contact, read_created, read_description, read_dtstamp,
    read_dtstart, read_due, read_duration_prop, read_exdate, read_geo, read_last_modified,
    read_location, read_organizer, read_percent_complete, read_priority, read_rdate,
    read_recurrence_id, read_related_to, read_request_status, read_resources, read_rrule,
    read_sequence, read_status, read_summary, read_uid, read_url,
};

component_props! {
    /// One member of the todoprop alternation.
    TodoProp, read_todoprop {
        DtStamp(DtStamp) = read_dtstamp,
        Uid(Uid) = read_uid,
        Class(Class) = read_class,
        Completed(Completed) = read_completed,
        Created(Created) = read_created,
        Description(Description) = read_description,
        DtStart(DtStart) = read_dtstart,
        Geo(Geo) = read_geo,
        LastModified(LastModified) = read_last_modified,
        Location(Location) = read_location,
        Organizer(Organizer) = read_organizer,
        PercentComplete(PercentComplete) = read_percent_complete,
        Priority(Priority) = read_priority,
        RecurrenceId(RecurrenceId) = read_recurrence_id,
        Sequence(Sequence) = read_sequence,
        Status(Status) = read_status,
        Summary(Summary) = read_summary,
        Url(Url) = read_url,
        RRule(RRule) = read_rrule,
        Due(Due) = read_due,
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
pub struct Todo {
    pub properties: Vec<TodoProp>,
    pub alarms: Vec<Alarm>,
}

/// todoc = "BEGIN" ":" "VTODO" CRLF todoprop *alarmc "END" ":" "VTODO" CRLF
pub fn read_todo(cursor: &mut Cursor<'_>) -> Option<Todo> {
    cursor.attempt(|cursor| {
        read_begin(cursor, "VTODO")?;
        let mut properties = Vec::new();
        let mut alarms = Vec::new();
        loop {
            if let Some(prop) = read_todoprop(cursor) {
                properties.push(prop);
            } else if let Some(alarm) = read_alarm(cursor) {
                alarms.push(alarm);
            } else {
                break;
            }
        }
        read_end(cursor, "VTODO")?;
        let has_dtstamp = properties
            .iter()
            .any(|prop| matches!(prop, TodoProp::DtStamp(_)));
        let has_uid = properties
            .iter()
            .any(|prop| matches!(prop, TodoProp::Uid(_)));
        (has_dtstamp && has_uid).then_some(Todo { properties, alarms })
    })
}

expect_rules! {
    /// todoc, hard form.
    pub fn expect_todo(Todo) = read_todo, "VTODO";
}
