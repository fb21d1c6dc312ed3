//! Alarm component properties (RFC 5545 §3.8.6).

use crate::cursor::Cursor;
use crate::lex::read_name;
use crate::parameter::{Parameter, ValueType};
use crate::property::{declared_value_type, plain, property};
use crate::value::datetime::{DateTime, read_date_time};
use crate::value::duration::{Duration, read_dur_value};
use crate::value::read_integer;

/// actionvalue = "AUDIO" / "DISPLAY" / "EMAIL" / iana-token / x-name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionValue {
    Audio,
    Display,
    Email,
    XName(String),
    Iana(String),
}

fn read_action_value(cursor: &mut Cursor<'_>, _params: &[Parameter]) -> Option<ActionValue> {
    let token = read_name(cursor)?;
    let upper = token.to_ascii_uppercase();
    match upper.as_str() {
        "AUDIO" => Some(ActionValue::Audio),
        "DISPLAY" => Some(ActionValue::Display),
        "EMAIL" => Some(ActionValue::Email),
        _ if upper.starts_with("X-") => Some(ActionValue::XName(token)),
        _ => Some(ActionValue::Iana(token)),
    }
}

/// TRIGGER value: a duration relative to the event by default, an absolute
/// date-time under `VALUE=DATE-TIME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerValue {
    Duration(Duration),
    DateTime(DateTime),
}

fn read_trigger_value(cursor: &mut Cursor<'_>, params: &[Parameter]) -> Option<TriggerValue> {
    if matches!(declared_value_type(params), Some(ValueType::DateTime)) {
        return read_date_time(cursor).map(TriggerValue::DateTime);
    }
    read_dur_value(cursor).map(TriggerValue::Duration)
}

property! {
    /// action = "ACTION" actionparam ":" actionvalue CRLF
    "ACTION", Action(ActionValue), read_action / expect_action = read_action_value;
    /// repeat = "REPEAT" repparam ":" integer CRLF
    "REPEAT", Repeat(i32), read_repeat / expect_repeat = plain!(read_integer);
    /// trigger = "TRIGGER" (trigrel ":" dur-value) / (trigabs ":" date-time) CRLF
    "TRIGGER", Trigger(TriggerValue), read_trigger / expect_trigger = read_trigger_value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::Related;

    #[test]
    fn action_keywords() {
        let mut cursor = Cursor::new(b"ACTION:DISPLAY\r\n");
        let prop = read_action(&mut cursor).expect("should parse");
        assert_eq!(prop.value, ActionValue::Display);
    }

    #[test]
    fn trigger_default_is_a_duration() {
        let mut cursor = Cursor::new(b"TRIGGER:-PT15M\r\n");
        let prop = read_trigger(&mut cursor).expect("should parse");
        let TriggerValue::Duration(duration) = prop.value else {
            panic!("wrong variant: {:?}", prop.value);
        };
        assert!(duration.is_negative());
    }

    #[test]
    fn trigger_related_end() {
        let mut cursor = Cursor::new(b"TRIGGER;RELATED=END:PT5M\r\n");
        let prop = read_trigger(&mut cursor).expect("should parse");
        assert_eq!(prop.params, vec![Parameter::Related(Related::End)]);
    }

    #[test]
    fn trigger_absolute_form() {
        let mut cursor = Cursor::new(b"TRIGGER;VALUE=DATE-TIME:19980101T050000Z\r\n");
        let prop = read_trigger(&mut cursor).expect("should parse");
        assert!(matches!(prop.value, TriggerValue::DateTime(_)));
    }

    #[test]
    fn repeat_count() {
        let mut cursor = Cursor::new(b"REPEAT:4\r\n");
        assert_eq!(read_repeat(&mut cursor).map(|p| p.value), Some(4));
    }
}
