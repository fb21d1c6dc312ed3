//! Recurrence component properties (RFC 5545 §3.8.5).

use crate::cursor::Cursor;
use crate::parameter::Parameter;
use crate::property::{
    DateOrDateTime, DateTimeOrPeriod, plain, property, read_date_or_date_time,
    read_date_time_or_period, read_value_list,
};
use crate::value::recur::{Recur, read_recur};

fn read_exdate_value(
    cursor: &mut Cursor<'_>,
    params: &[Parameter],
) -> Option<Vec<DateOrDateTime>> {
    read_value_list(cursor, params, read_date_or_date_time)
}

fn read_rdate_value(
    cursor: &mut Cursor<'_>,
    params: &[Parameter],
) -> Option<Vec<DateTimeOrPeriod>> {
    read_value_list(cursor, params, read_date_time_or_period)
}

property! {
    /// exdate = "EXDATE" exdtparam ":" exdtval *("," exdtval) CRLF
    "EXDATE", ExDate(Vec<DateOrDateTime>), read_exdate / expect_exdate = read_exdate_value;
    /// rdate = "RDATE" rdtparam ":" rdtval *("," rdtval) CRLF
    "RDATE", RDate(Vec<DateTimeOrPeriod>), read_rdate / expect_rdate = read_rdate_value;
    /// rrule = "RRULE" rrulparam ":" recur CRLF
    "RRULE", RRule(Recur), read_rrule / expect_rrule = plain!(read_recur);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::recur::Frequency;

    #[test]
    fn exdate_list_of_date_times() {
        let mut cursor =
            Cursor::new(b"EXDATE:19960402T010000Z,19960403T010000Z,19960404T010000Z\r\n");
        let prop = read_exdate(&mut cursor).expect("should parse");
        assert_eq!(prop.value.len(), 3);
        assert!(
            prop.value
                .iter()
                .all(|v| matches!(v, DateOrDateTime::DateTime(_)))
        );
    }

    #[test]
    fn rdate_period_form() {
        let mut cursor = Cursor::new(
            b"RDATE;VALUE=PERIOD:19960403T020000Z/19960403T040000Z,19960404T010000Z/PT3H\r\n",
        );
        let prop = read_rdate(&mut cursor).expect("should parse");
        assert_eq!(prop.value.len(), 2);
        assert!(
            prop.value
                .iter()
                .all(|v| matches!(v, DateTimeOrPeriod::Period(_)))
        );
    }

    #[test]
    fn rdate_date_form() {
        let mut cursor = Cursor::new(b"RDATE;VALUE=DATE:19970101,19970120\r\n");
        let prop = read_rdate(&mut cursor).expect("should parse");
        assert!(
            prop.value
                .iter()
                .all(|v| matches!(v, DateTimeOrPeriod::Date(_)))
        );
    }

    #[test]
    fn rrule_value_is_a_recur() {
        let mut cursor = Cursor::new(b"RRULE:FREQ=WEEKLY;INTERVAL=2;WKST=SU\r\n");
        let prop = read_rrule(&mut cursor).expect("should parse");
        assert_eq!(prop.value.freq, Some(Frequency::Weekly));
    }

    #[test]
    fn malformed_rrule_rewinds() {
        let mut cursor = Cursor::new(b"RRULE:FREQ=NEVER\r\n");
        assert_eq!(read_rrule(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }
}
