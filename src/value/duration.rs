//! DURATION value grammar (RFC 5545 §3.3.6).
//!
//! ```text
//! dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
//! dur-date   = dur-day [dur-time]
//! dur-time   = "T" (dur-hour / dur-minute / dur-second)
//! dur-hour   = 1*DIGIT "H" [dur-minute]
//! dur-minute = 1*DIGIT "M" [dur-second]
//! dur-second = 1*DIGIT "S"
//! dur-day    = 1*DIGIT "D"
//! dur-week   = 1*DIGIT "W"
//! ```
//!
//! The hour/minute/second cascade is what allows compound durations such as
//! `PT1H30M`; the AST keeps each unit optional so `PT1H` and `PT1H0M` stay
//! distinguishable.

use crate::cursor::{Cursor, expect_rules};
use crate::grammar::abnf::read_digit_value;

/// The time part of a duration. At least one field is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurTime {
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
}

/// A parsed dur-value, one variant per top-level alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duration {
    Week {
        negative: bool,
        weeks: u32,
    },
    Date {
        negative: bool,
        days: u32,
        time: Option<DurTime>,
    },
    Time {
        negative: bool,
        time: DurTime,
    },
}

impl Duration {
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Duration::Week { negative, .. }
            | Duration::Date { negative, .. }
            | Duration::Time { negative, .. } => *negative,
        }
    }
}

/// `1*DIGIT unit` with a fixed unit letter.
fn read_unit(cursor: &mut Cursor<'_>, unit: u8) -> Option<u32> {
    cursor.attempt(|cursor| {
        let value = read_digit_value(cursor)?;
        cursor
            .eat_if(|b| b.eq_ignore_ascii_case(&unit))
            .map(|_| value)
    })
}

/// dur-time = "T" (dur-hour / dur-minute / dur-second)
fn read_dur_time(cursor: &mut Cursor<'_>) -> Option<DurTime> {
    cursor.attempt(|cursor| {
        cursor.eat_if(|b| b == b'T' || b == b't')?;
        if let Some(hours) = read_unit(cursor, b'H') {
            let minutes = read_unit(cursor, b'M');
            let seconds = match minutes {
                Some(_) => read_unit(cursor, b'S'),
                None => None,
            };
            return Some(DurTime {
                hours: Some(hours),
                minutes,
                seconds,
            });
        }
        if let Some(minutes) = read_unit(cursor, b'M') {
            let seconds = read_unit(cursor, b'S');
            return Some(DurTime {
                hours: None,
                minutes: Some(minutes),
                seconds,
            });
        }
        let seconds = read_unit(cursor, b'S')?;
        Some(DurTime {
            hours: None,
            minutes: None,
            seconds: Some(seconds),
        })
    })
}

/// dur-value = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
pub fn read_dur_value(cursor: &mut Cursor<'_>) -> Option<Duration> {
    cursor.attempt(|cursor| {
        let negative = if cursor.eat(b'-') {
            true
        } else {
            cursor.eat(b'+');
            false
        };
        cursor.eat_if(|b| b == b'P' || b == b'p')?;

        if let Some(days) = read_unit(cursor, b'D') {
            let time = read_dur_time(cursor);
            return Some(Duration::Date {
                negative,
                days,
                time,
            });
        }
        if let Some(time) = read_dur_time(cursor) {
            return Some(Duration::Time { negative, time });
        }
        let weeks = read_unit(cursor, b'W')?;
        Some(Duration::Week { negative, weeks })
    })
}

expect_rules! {
    /// dur-value, hard form.
    pub fn expect_dur_value(Duration) = read_dur_value, "duration";
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dur(input: &str) -> Duration {
        let mut cursor = Cursor::new(input.as_bytes());
        let parsed = read_dur_value(&mut cursor).expect("should parse");
        assert!(cursor.is_eof(), "trailing input after {input:?}");
        parsed
    }

    #[test]
    fn weeks() {
        assert_eq!(
            dur("P7W"),
            Duration::Week {
                negative: false,
                weeks: 7,
            }
        );
    }

    #[test]
    fn days_with_time() {
        assert_eq!(
            dur("P15DT5H0M20S"),
            Duration::Date {
                negative: false,
                days: 15,
                time: Some(DurTime {
                    hours: Some(5),
                    minutes: Some(0),
                    seconds: Some(20),
                }),
            }
        );
    }

    #[test]
    fn compound_time() {
        assert_eq!(
            dur("PT1H30M"),
            Duration::Time {
                negative: false,
                time: DurTime {
                    hours: Some(1),
                    minutes: Some(30),
                    seconds: None,
                },
            }
        );
    }

    #[rstest]
    #[case("-PT15M")]
    #[case("-P2D")]
    fn negative_durations(#[case] input: &str) {
        assert!(dur(input).is_negative());
    }

    #[test]
    fn explicit_plus_is_positive() {
        assert!(!dur("+P1D").is_negative());
    }

    #[test]
    fn seconds_cannot_precede_minutes() {
        // "PT5S30M": dur-second terminates the cascade; the tail is left
        // unconsumed, which fails an end-anchored caller.
        let mut cursor = Cursor::new(b"PT5S30M");
        assert!(read_dur_value(&mut cursor).is_some());
        assert_eq!(cursor.peek(), Some(b'3'));
    }

    #[test]
    fn bare_p_rewinds() {
        let mut cursor = Cursor::new(b"P");
        assert_eq!(read_dur_value(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }
}
