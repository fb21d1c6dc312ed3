//! timezonec: the VTIMEZONE component grammar with its STANDARD and
//! DAYLIGHT sub-blocks (RFC 5545 §3.6.5).

use crate::component::{component_props, read_begin, read_end};
use crate::cursor::{Cursor, expect_rules};
use crate::property::{
    Comment, DtStart, LastModified, RDate, RRule, TzId, TzName, TzOffsetFrom, TzOffsetTo, TzUrl,
    read_comment, read_dtstart, read_last_modified, read_rdate, read_rrule, read_tzid,
    read_tzname, read_tzoffsetfrom, read_tzoffsetto, read_tzurl,
};

component_props! {
    /// Direct VTIMEZONE properties (the observance blocks are separate).
    TzProp, read_tzprop {
        TzId(TzId) = read_tzid,
        LastModified(LastModified) = read_last_modified,
        TzUrl(TzUrl) = read_tzurl,
    }
}

component_props! {
    /// One member of the tzprop alternation inside STANDARD or DAYLIGHT.
    ObservanceProp, read_observance_prop {
        DtStart(DtStart) = read_dtstart,
        TzOffsetTo(TzOffsetTo) = read_tzoffsetto,
        TzOffsetFrom(TzOffsetFrom) = read_tzoffsetfrom,
        RRule(RRule) = read_rrule,
        Comment(Comment) = read_comment,
        RDate(RDate) = read_rdate,
        TzName(TzName) = read_tzname,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservanceKind {
    Standard,
    Daylight,
}

/// standardc / daylightc: identical bodies behind different tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Observance {
    pub kind: ObservanceKind,
    pub properties: Vec<ObservanceProp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timezone {
    pub properties: Vec<TzProp>,
    pub observances: Vec<Observance>,
}

fn read_observance_with(cursor: &mut Cursor<'_>, kind: ObservanceKind) -> Option<Observance> {
    let tag = match kind {
        ObservanceKind::Standard => "STANDARD",
        ObservanceKind::Daylight => "DAYLIGHT",
    };
    cursor.attempt(|cursor| {
        read_begin(cursor, tag)?;
        let properties = cursor.repeat(read_observance_prop);
        read_end(cursor, tag)?;
        let has_dtstart = properties
            .iter()
            .any(|prop| matches!(prop, ObservanceProp::DtStart(_)));
        let has_to = properties
            .iter()
            .any(|prop| matches!(prop, ObservanceProp::TzOffsetTo(_)));
        let has_from = properties
            .iter()
            .any(|prop| matches!(prop, ObservanceProp::TzOffsetFrom(_)));
        (has_dtstart && has_to && has_from).then_some(Observance { kind, properties })
    })
}

pub fn read_observance(cursor: &mut Cursor<'_>) -> Option<Observance> {
    read_observance_with(cursor, ObservanceKind::Standard)
        .or_else(|| read_observance_with(cursor, ObservanceKind::Daylight))
}

/// timezonec = "BEGIN" ":" "VTIMEZONE" CRLF *(tzid / last-mod / tzurl /
/// standardc / daylightc / x-prop / iana-prop) "END" ":" "VTIMEZONE" CRLF
///
/// TZID and at least one observance must be present.
pub fn read_timezone(cursor: &mut Cursor<'_>) -> Option<Timezone> {
    cursor.attempt(|cursor| {
        read_begin(cursor, "VTIMEZONE")?;
        let mut properties = Vec::new();
        let mut observances = Vec::new();
        loop {
            if let Some(observance) = read_observance(cursor) {
                observances.push(observance);
            } else if let Some(prop) = read_tzprop(cursor) {
                properties.push(prop);
            } else {
                break;
            }
        }
        read_end(cursor, "VTIMEZONE")?;
        let has_tzid = properties
            .iter()
            .any(|prop| matches!(prop, TzProp::TzId(_)));
        (has_tzid && !observances.is_empty()).then_some(Timezone {
            properties,
            observances,
        })
    })
}

expect_rules! {
    /// observance block, hard form.
    pub fn expect_observance(Observance) = read_observance, "STANDARD or DAYLIGHT";
    /// timezonec, hard form.
    pub fn expect_timezone(Timezone) = read_timezone, "VTIMEZONE";
}
