//! PERIOD value grammar (RFC 5545 §3.3.9).
//!
//! ```text
//! period          = period-explicit / period-start
//! period-explicit = date-time "/" date-time
//! period-start    = date-time "/" dur-value
//! ```
//!
//! Both alternatives share the same `date-time "/"` prefix, so the explicit
//! form is tried first and the start form picks up after a full rewind.

use crate::cursor::{Cursor, expect_rules};
use crate::value::datetime::{DateTime, read_date_time};
use crate::value::duration::{Duration, read_dur_value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Explicit { start: DateTime, end: DateTime },
    Start { start: DateTime, duration: Duration },
}

fn read_period_explicit(cursor: &mut Cursor<'_>) -> Option<Period> {
    cursor.attempt(|cursor| {
        let start = read_date_time(cursor)?;
        cursor.eat(b'/').then_some(())?;
        let end = read_date_time(cursor)?;
        Some(Period::Explicit { start, end })
    })
}

fn read_period_start(cursor: &mut Cursor<'_>) -> Option<Period> {
    cursor.attempt(|cursor| {
        let start = read_date_time(cursor)?;
        cursor.eat(b'/').then_some(())?;
        let duration = read_dur_value(cursor)?;
        Some(Period::Start { start, duration })
    })
}

/// period = period-explicit / period-start
pub fn read_period(cursor: &mut Cursor<'_>) -> Option<Period> {
    read_period_explicit(cursor).or_else(|| read_period_start(cursor))
}

expect_rules! {
    /// period, hard form.
    pub fn expect_period(Period) = read_period, "period";
}
