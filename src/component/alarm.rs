//! alarmc: the VALARM component grammar (RFC 5545 §3.6.6).
//!
//! The body is a disjoint union of audioprop, dispprop and emailprop,
//! disambiguated by which required properties are present. The email form
//! demands the largest required set (ACTION, DESCRIPTION, TRIGGER, SUMMARY),
//! so it is tried first: a laxer form's required subset would otherwise match
//! an email alarm and strand its SUMMARY line before END:VALARM.

use crate::component::{component_props, read_begin, read_end};
use crate::cursor::{Cursor, expect_rules};
use crate::property::{
    Action, Attach, Attendee, Description, DurationProp, Repeat, Summary, Trigger, read_action,
    read_attach, read_attendee, read_description, read_duration_prop, read_repeat, read_summary,
    read_trigger,
};

component_props! {
    /// One member of the audioprop alternation.
    AudioAlarmProp, read_audio_alarm_prop {
        Action(Action) = read_action,
        Trigger(Trigger) = read_trigger,
        Duration(DurationProp) = read_duration_prop,
        Repeat(Repeat) = read_repeat,
        Attach(Attach) = read_attach,
    }
}

component_props! {
    /// One member of the dispprop alternation.
    DisplayAlarmProp, read_display_alarm_prop {
        Action(Action) = read_action,
        Description(Description) = read_description,
        Trigger(Trigger) = read_trigger,
        Duration(DurationProp) = read_duration_prop,
        Repeat(Repeat) = read_repeat,
    }
}

component_props! {
    /// One member of the emailprop alternation.
    EmailAlarmProp, read_email_alarm_prop {
        Action(Action) = read_action,
        Description(Description) = read_description,
        Trigger(Trigger) = read_trigger,
        Summary(Summary) = read_summary,
        Attendee(Attendee) = read_attendee,
        Duration(DurationProp) = read_duration_prop,
        Repeat(Repeat) = read_repeat,
        Attach(Attach) = read_attach,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioAlarm {
    pub properties: Vec<AudioAlarmProp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayAlarm {
    pub properties: Vec<DisplayAlarmProp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailAlarm {
    pub properties: Vec<EmailAlarmProp>,
}

#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum Alarm {
    Audio(AudioAlarm),
    Display(DisplayAlarm),
    Email(EmailAlarm),
}

fn read_email_alarm(cursor: &mut Cursor<'_>) -> Option<EmailAlarm> {
    cursor.attempt(|cursor| {
        read_begin(cursor, "VALARM")?;
        let properties = cursor.repeat(read_email_alarm_prop);
        read_end(cursor, "VALARM")?;
        let has_action = properties
            .iter()
            .any(|prop| matches!(prop, EmailAlarmProp::Action(_)));
        let has_description = properties
            .iter()
            .any(|prop| matches!(prop, EmailAlarmProp::Description(_)));
        let has_trigger = properties
            .iter()
            .any(|prop| matches!(prop, EmailAlarmProp::Trigger(_)));
        let has_summary = properties
            .iter()
            .any(|prop| matches!(prop, EmailAlarmProp::Summary(_)));
        (has_action && has_description && has_trigger && has_summary)
            .then_some(EmailAlarm { properties })
    })
}

fn read_display_alarm(cursor: &mut Cursor<'_>) -> Option<DisplayAlarm> {
    cursor.attempt(|cursor| {
        read_begin(cursor, "VALARM")?;
        let properties = cursor.repeat(read_display_alarm_prop);
        read_end(cursor, "VALARM")?;
        let has_action = properties
            .iter()
            .any(|prop| matches!(prop, DisplayAlarmProp::Action(_)));
        let has_description = properties
            .iter()
            .any(|prop| matches!(prop, DisplayAlarmProp::Description(_)));
        let has_trigger = properties
            .iter()
            .any(|prop| matches!(prop, DisplayAlarmProp::Trigger(_)));
        (has_action && has_description && has_trigger).then_some(DisplayAlarm { properties })
    })
}

fn read_audio_alarm(cursor: &mut Cursor<'_>) -> Option<AudioAlarm> {
    cursor.attempt(|cursor| {
        read_begin(cursor, "VALARM")?;
        let properties = cursor.repeat(read_audio_alarm_prop);
        read_end(cursor, "VALARM")?;
        let has_action = properties
            .iter()
            .any(|prop| matches!(prop, AudioAlarmProp::Action(_)));
        let has_trigger = properties
            .iter()
            .any(|prop| matches!(prop, AudioAlarmProp::Trigger(_)));
        (has_action && has_trigger).then_some(AudioAlarm { properties })
    })
}

/// alarmc = "BEGIN" ":" "VALARM" CRLF (audioprop / dispprop / emailprop)
/// "END" ":" "VALARM" CRLF
pub fn read_alarm(cursor: &mut Cursor<'_>) -> Option<Alarm> {
    if let Some(email) = read_email_alarm(cursor) {
        return Some(email.into());
    }
    if let Some(display) = read_display_alarm(cursor) {
        return Some(display.into());
    }
    read_audio_alarm(cursor).map(Alarm::Audio)
}

expect_rules! {
    /// alarmc, hard form.
    pub fn expect_alarm(Alarm) = read_alarm, "VALARM";
}
