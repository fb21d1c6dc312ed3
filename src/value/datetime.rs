//! DATE, TIME, DATE-TIME and UTC-OFFSET value grammars (RFC 5545 §3.3.4,
//! §3.3.5, §3.3.12, §3.3.14).
//!
//! All fields are fixed-width digit runs. The grammar deliberately performs
//! no calendar validity checking: month 13, day 32 and second 60 (leap
//! seconds!) all match; rejecting them is a semantic-validation concern.

use crate::cursor::{Cursor, expect_rules};
use crate::grammar::abnf::read_fixed_digits;

/// date = date-fullyear date-month date-mday (YYYYMMDD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// time = time-hour time-minute time-second [time-utc] (HHMMSS[Z])
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub utc: bool,
}

/// date-time = date "T" time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
}

/// utc-offset = ("+" / "-") time-hour time-minute [time-second]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcOffset {
    pub positive: bool,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

/// date = 4DIGIT 2DIGIT 2DIGIT
pub fn read_date(cursor: &mut Cursor<'_>) -> Option<Date> {
    cursor.attempt(|cursor| {
        let year = read_fixed_digits(cursor, 4)?;
        let month = read_fixed_digits(cursor, 2)?;
        let day = read_fixed_digits(cursor, 2)?;
        #[expect(clippy::cast_possible_truncation, reason = "widths bound the values")]
        Some(Date {
            year: year as u16,
            month: month as u8,
            day: day as u8,
        })
    })
}

/// time = 2DIGIT 2DIGIT 2DIGIT ["Z"]
pub fn read_time(cursor: &mut Cursor<'_>) -> Option<Time> {
    cursor.attempt(|cursor| {
        let hour = read_fixed_digits(cursor, 2)?;
        let minute = read_fixed_digits(cursor, 2)?;
        let second = read_fixed_digits(cursor, 2)?;
        let utc = cursor.eat(b'Z') || cursor.eat(b'z');
        #[expect(clippy::cast_possible_truncation, reason = "widths bound the values")]
        Some(Time {
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
            utc,
        })
    })
}

/// date-time = date "T" time
pub fn read_date_time(cursor: &mut Cursor<'_>) -> Option<DateTime> {
    cursor.attempt(|cursor| {
        let date = read_date(cursor)?;
        cursor.eat_if(|b| b == b'T' || b == b't')?;
        let time = read_time(cursor)?;
        Some(DateTime { date, time })
    })
}

/// utc-offset = ("+" / "-") 2DIGIT 2DIGIT [2DIGIT]
pub fn read_utc_offset(cursor: &mut Cursor<'_>) -> Option<UtcOffset> {
    cursor.attempt(|cursor| {
        let positive = match cursor.advance()? {
            b'+' => true,
            b'-' => false,
            _ => return None,
        };
        let hours = read_fixed_digits(cursor, 2)?;
        let minutes = read_fixed_digits(cursor, 2)?;
        let seconds = read_fixed_digits(cursor, 2).unwrap_or(0);
        #[expect(clippy::cast_possible_truncation, reason = "widths bound the values")]
        Some(UtcOffset {
            positive,
            hours: hours as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
        })
    })
}

expect_rules! {
    /// date, hard form.
    pub fn expect_date(Date) = read_date, "date";
    /// time, hard form.
    pub fn expect_time(Time) = read_time, "time";
    /// date-time, hard form.
    pub fn expect_date_time(DateTime) = read_date_time, "date-time";
    /// utc-offset, hard form.
    pub fn expect_utc_offset(UtcOffset) = read_utc_offset, "UTC offset";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_fixed_widths() {
        let parsed = read_date(&mut Cursor::new(b"20190114")).unwrap();
        assert_eq!(
            parsed,
            Date {
                year: 2019,
                month: 1,
                day: 14,
            }
        );
    }

    #[test]
    fn date_accepts_impossible_month() {
        // Validity checking is out of scope for the recognizer.
        let parsed = read_date(&mut Cursor::new(b"20191332")).unwrap();
        assert_eq!(parsed.month, 13);
        assert_eq!(parsed.day, 32);
    }

    #[test]
    fn date_rejects_short_run() {
        let mut cursor = Cursor::new(b"2019011");
        assert_eq!(read_date(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn time_with_utc_marker() {
        let parsed = read_time(&mut Cursor::new(b"083000Z")).unwrap();
        assert_eq!(
            parsed,
            Time {
                hour: 8,
                minute: 30,
                second: 0,
                utc: true,
            }
        );
    }

    #[test]
    fn time_leap_second() {
        let parsed = read_time(&mut Cursor::new(b"235960Z")).unwrap();
        assert_eq!(parsed.second, 60);
        assert!(parsed.utc);
    }

    #[test]
    fn date_time_requires_separator() {
        let mut cursor = Cursor::new(b"20190114083000");
        assert_eq!(read_date_time(&mut cursor), None);
        assert_eq!(cursor.position(), 0);

        let parsed = read_date_time(&mut Cursor::new(b"20190114T083000")).unwrap();
        assert_eq!(parsed.date.day, 14);
        assert!(!parsed.time.utc);
    }

    #[test]
    fn utc_offset_forms() {
        assert_eq!(
            read_utc_offset(&mut Cursor::new(b"-0500")),
            Some(UtcOffset {
                positive: false,
                hours: 5,
                minutes: 0,
                seconds: 0,
            })
        );
        assert_eq!(
            read_utc_offset(&mut Cursor::new(b"+013045")),
            Some(UtcOffset {
                positive: true,
                hours: 1,
                minutes: 30,
                seconds: 45,
            })
        );
    }

    #[test]
    fn utc_offset_requires_sign() {
        let mut cursor = Cursor::new(b"0500");
        assert_eq!(read_utc_offset(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }
}
