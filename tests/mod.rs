use ical_grammar::component::{
    Component, read_alarm, read_component_single, read_event, read_icalobject,
};
use ical_grammar::cursor::Cursor;
use ical_grammar::error::ParserError;
use ical_grammar::lex::{read_contentline, read_param_value};
use ical_grammar::parse_calendar;
use ical_grammar::property::{read_dtstart, read_summary};
use ical_grammar::value::datetime::{expect_time, read_time};
use ical_grammar::value::duration::read_dur_value;
use ical_grammar::value::period::read_period;
use ical_grammar::value::recur::read_recur;

use rstest::rstest;
use similar_asserts::assert_eq;

const MINIMAL: &[u8] = b"BEGIN:VCALENDAR\r\n\
PRODID:-//x//y//EN\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTAMP:20190101T000000Z\r\n\
UID:abc123\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

#[test]
fn minimal_calendar_shape() {
    let calendar = parse_calendar(MINIMAL).expect("should parse");
    assert_eq!(calendar.properties.prod_id.value, "-//x//y//EN");
    assert_eq!(calendar.properties.version.value, "2.0");
    assert_eq!(calendar.components.len(), 1);
    let Component::Event(event) = &calendar.components[0] else {
        panic!("expected an event, got {:?}", calendar.components[0]);
    };
    use ical_grammar::component::EventProp;
    assert!(
        event
            .properties
            .iter()
            .any(|prop| matches!(prop, EventProp::DtStamp(_)))
    );
    assert!(
        event
            .properties
            .iter()
            .any(|prop| matches!(prop, EventProp::Uid(_)))
    );
}

// Every rule must restore the cursor on failure, no matter how deep the
// failing sub-rule sat. Each case is a prefix that gets partway through the
// production before mismatching.
#[rstest]
#[case::event(&b"BEGIN:VEVENT\r\nDTSTAMP:20190101T000000Z\r\n"[..])]
#[case::contentline(&b"SUMMARY;LANGUAGE=en"[..])]
#[case::alarm(&b"BEGIN:VALARM\r\nACTION:DISPLAY\r\nEND:VALARM\r\n"[..])]
#[case::recur(&b"FREQ=DAILY;UNTIL="[..])]
#[case::period(&b"19970101T180000Z/nope"[..])]
#[case::duration(&b"P1X"[..])]
fn rewind_invariant_on_failure(#[case] input: &[u8]) {
    let rules: &[(&str, fn(&mut Cursor) -> bool)] = &[
        ("event", |cursor| read_event(cursor).is_some()),
        ("alarm", |cursor| read_alarm(cursor).is_some()),
        ("recur", |cursor| read_recur(cursor).is_some()),
        ("period", |cursor| read_period(cursor).is_some()),
        ("duration", |cursor| read_dur_value(cursor).is_some()),
        ("contentline", |cursor| read_contentline(cursor).is_some()),
    ];
    for (name, rule) in rules {
        let mut cursor = Cursor::new(input);
        if !rule(&mut cursor) {
            assert_eq!(cursor.position(), 0, "{name} leaked consumption");
        }
    }
}

// expect_X succeeds with V exactly when read_X returns Some(V), and both end
// at the same position.
#[rstest]
#[case::valid(&b"235960Z"[..])]
#[case::invalid(&b"23596"[..])]
fn expect_read_equivalence(#[case] input: &[u8]) {
    let mut read_cursor = Cursor::new(input);
    let mut expect_cursor = Cursor::new(input);
    let read_result = read_time(&mut read_cursor);
    let expect_result = expect_time(&mut expect_cursor);
    match (read_result, expect_result) {
        (Some(value), Ok(expected)) => {
            assert_eq!(value, expected);
            assert_eq!(read_cursor.position(), expect_cursor.position());
        }
        (None, Err(ParserError::Syntax { position, .. })) => {
            assert_eq!(read_cursor.position(), 0);
            assert_eq!(position, 0);
        }
        (read, expect) => panic!("diverged: {read:?} vs {expect:?}"),
    }
}

#[test]
fn quoted_string_before_paramtext() {
    // paramtext matches the empty string, so trying it first would "match"
    // zero characters in front of the quote and strand the rest.
    let mut cursor = Cursor::new(b"\"foo\"");
    assert_eq!(read_param_value(&mut cursor), Some("foo".to_owned()));
    assert!(cursor.is_eof());
}

#[test]
fn quoted_param_inside_a_property() {
    let input = b"SUMMARY;X-NOTE=\"a;b,c\":hello\r\n";
    let prop = read_summary(&mut Cursor::new(input)).expect("should parse");
    assert_eq!(prop.params.len(), 1);
    assert_eq!(prop.value, "hello");
}

#[test]
fn valarm_summary_selects_email_form() {
    let input = b"BEGIN:VALARM\r\n\
ACTION:EMAIL\r\n\
DESCRIPTION:agenda\r\n\
TRIGGER:-P2D\r\n\
SUMMARY:send it\r\n\
END:VALARM\r\n";
    let mut cursor = Cursor::new(input);
    let alarm = read_alarm(&mut cursor).expect("should parse");
    assert!(cursor.is_eof());
    assert!(matches!(alarm, ical_grammar::component::Alarm::Email(_)));
}

#[test]
fn leap_second_is_tolerated() {
    let mut cursor = Cursor::new(b"235960Z");
    let time = read_time(&mut cursor).expect("should parse");
    assert_eq!(time.second, 60);
    assert!(time.utc);
}

#[test]
fn empty_event_fails_the_whole_parse() {
    let input = b"BEGIN:VCALENDAR\r\n\
PRODID:p\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
    let mut cursor = Cursor::new(&input[..]);
    assert!(read_icalobject(&mut cursor).is_none());
    assert_eq!(cursor.position(), 0);
    assert!(parse_calendar(input).is_err());

    // The component alternation itself finds no match either.
    let mut cursor = Cursor::new(&b"BEGIN:VEVENT\r\nEND:VEVENT\r\n"[..]);
    assert!(read_component_single(&mut cursor).is_none());
    assert_eq!(cursor.position(), 0);
}

#[test]
fn reparsing_yields_equal_trees() {
    let input = b"BEGIN:VCALENDAR\r\n\
PRODID:-//Example//Product//EN\r\n\
VERSION:2.0\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:America/New_York\r\n\
BEGIN:STANDARD\r\n\
DTSTART:19671029T020000\r\n\
RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU\r\n\
TZOFFSETFROM:-0400\r\n\
TZOFFSETTO:-0500\r\n\
END:STANDARD\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
DTSTAMP:20190101T000000Z\r\n\
UID:abc123\r\n\
DTSTART;TZID=America/New_York:20190105T093000\r\n\
SUMMARY:Planning\r\n\
RRULE:FREQ=WEEKLY;BYDAY=SA\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
DESCRIPTION:Planning\r\n\
TRIGGER:-PT15M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
    let first = parse_calendar(input).expect("should parse");
    let second = parse_calendar(input).expect("should parse");
    assert_eq!(first, second);
}

#[rstest]
#[case::crlf(&b"SUMMARY:x\r\n"[..])]
#[case::lone_lf(&b"SUMMARY:x\n"[..])]
#[case::lone_cr(&b"SUMMARY:x\r"[..])]
#[case::eof(&b"SUMMARY:x"[..])]
fn line_terminator_forms(#[case] input: &[u8]) {
    let mut cursor = Cursor::new(input);
    let prop = read_summary(&mut cursor).expect("should parse");
    assert_eq!(prop.value, "x");
    assert!(cursor.is_eof());
}

#[test]
fn contentline_is_the_generic_fallback() {
    let mut cursor = Cursor::new(b"ITEM;A=1;B=x,y:some value\r\n");
    let line = read_contentline(&mut cursor).expect("should parse");
    assert_eq!(line.name, "ITEM");
    assert_eq!(line.params.len(), 2);
    assert_eq!(line.params[1].values, vec!["x", "y"]);
    assert_eq!(line.value, "some value");
}

#[test]
fn dtstart_accepts_both_value_forms() {
    // date is a prefix of date-time; the shape recognizer tries the longer
    // form first and falls back, so a bare date matches even without the
    // VALUE=DATE parameter.
    let mut cursor = Cursor::new(&b"DTSTART:19980118\r\n"[..]);
    let prop = read_dtstart(&mut cursor).expect("should parse");
    assert!(matches!(
        prop.value,
        ical_grammar::property::DateOrDateTime::Date(_)
    ));
    let mut cursor = Cursor::new(&b"DTSTART:19980118T120000\r\n"[..]);
    let prop = read_dtstart(&mut cursor).expect("should parse");
    assert!(matches!(
        prop.value,
        ical_grammar::property::DateOrDateTime::DateTime(_)
    ));
}
