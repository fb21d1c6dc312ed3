//! Date/time and change-management component properties (RFC 5545 §3.8.2,
//! §3.8.7).

use crate::cursor::Cursor;
use crate::parameter::Parameter;
use crate::property::{
    DateOrDateTime, plain, property, read_date_or_date_time, read_value_list,
};
use crate::value::datetime::{DateTime, read_date_time};
use crate::value::duration::{Duration, read_dur_value};
use crate::value::period::{Period, read_period};
use crate::value::read_integer;

fn read_period_list(cursor: &mut Cursor<'_>, params: &[Parameter]) -> Option<Vec<Period>> {
    read_value_list(cursor, params, plain!(read_period))
}

property! {
    /// completed = "COMPLETED" compparam ":" date-time CRLF
    "COMPLETED", Completed(DateTime), read_completed / expect_completed = plain!(read_date_time);
    /// dtend = "DTEND" dtendparam ":" dtendval CRLF
    "DTEND", DtEnd(DateOrDateTime), read_dtend / expect_dtend = read_date_or_date_time;
    /// due = "DUE" dueparam ":" dueval CRLF
    "DUE", Due(DateOrDateTime), read_due / expect_due = read_date_or_date_time;
    /// dtstart = "DTSTART" dtstparam ":" dtstval CRLF
    "DTSTART", DtStart(DateOrDateTime), read_dtstart / expect_dtstart = read_date_or_date_time;
    /// duration = "DURATION" durparam ":" dur-value CRLF
    "DURATION", DurationProp(Duration),
        read_duration_prop / expect_duration_prop = plain!(read_dur_value);
    /// freebusy = "FREEBUSY" fbparam ":" fbvalue CRLF, fbvalue = period *("," period)
    "FREEBUSY", FreeBusy(Vec<Period>), read_freebusy / expect_freebusy = read_period_list;
    /// created = "CREATED" creaparam ":" date-time CRLF
    "CREATED", Created(DateTime), read_created / expect_created = plain!(read_date_time);
    /// dtstamp = "DTSTAMP" stmparam ":" date-time CRLF
    "DTSTAMP", DtStamp(DateTime), read_dtstamp / expect_dtstamp = plain!(read_date_time);
    /// last-mod = "LAST-MODIFIED" lstparam ":" date-time CRLF
    "LAST-MODIFIED", LastModified(DateTime),
        read_last_modified / expect_last_modified = plain!(read_date_time);
    /// seq = "SEQUENCE" seqparam ":" integer CRLF
    "SEQUENCE", Sequence(i32), read_sequence / expect_sequence = plain!(read_integer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::{TzIdParam, ValueType};

    #[test]
    fn dtstamp_requires_full_date_time() {
        let mut cursor = Cursor::new(b"DTSTAMP:19971210T080000Z\r\n");
        let prop = read_dtstamp(&mut cursor).expect("should parse");
        assert!(prop.value.time.utc);
        let mut cursor = Cursor::new(b"DTSTAMP:19971210\r\n");
        assert_eq!(read_dtstamp(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn dtstart_with_tzid_parameter() {
        let mut cursor = Cursor::new(b"DTSTART;TZID=America/New_York:19980119T020000\r\n");
        let prop = read_dtstart(&mut cursor).expect("should parse");
        assert!(matches!(prop.value, DateOrDateTime::DateTime(_)));
        assert_eq!(
            prop.params,
            vec![Parameter::TzId(TzIdParam {
                global: false,
                name: "America/New_York".into(),
            })]
        );
    }

    #[test]
    fn dtstart_value_date() {
        let mut cursor = Cursor::new(b"DTSTART;VALUE=DATE:19980118\r\n");
        let prop = read_dtstart(&mut cursor).expect("should parse");
        assert!(matches!(prop.value, DateOrDateTime::Date(_)));
        assert_eq!(prop.params, vec![Parameter::Value(ValueType::Date)]);
    }

    #[test]
    fn duration_property() {
        let mut cursor = Cursor::new(b"DURATION:PT1H0M0S\r\n");
        let prop = read_duration_prop(&mut cursor).expect("should parse");
        assert!(!prop.value.is_negative());
    }

    #[test]
    fn freebusy_period_list() {
        let mut cursor = Cursor::new(
            b"FREEBUSY:19970308T160000Z/PT3H,19970308T200000Z/PT1H\r\n",
        );
        let prop = read_freebusy(&mut cursor).expect("should parse");
        assert_eq!(prop.value.len(), 2);
    }

    #[test]
    fn sequence_is_an_integer() {
        let mut cursor = Cursor::new(b"SEQUENCE:3\r\n");
        assert_eq!(read_sequence(&mut cursor).map(|p| p.value), Some(3));
    }
}
