//! RECUR value grammar (RFC 5545 §3.3.10).
//!
//! A recurrence rule is a `;`-separated list of `NAME=value` rule parts. The
//! part list is recognized shape-only: parts may appear in any order and any
//! number of times (last occurrence wins), but an unknown part name or a
//! malformed part value fails the whole rule.

use phf::phf_map;

use crate::cursor::{Cursor, expect_rules};
use crate::grammar::abnf::{is_alpha, is_digit, read_digit_value};
use crate::value::datetime::{Date, DateTime, read_date, read_date_time};
use crate::value::read_one_or_two_digits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

static FREQUENCIES: phf::Map<&'static str, Frequency> = phf_map! {
    "SECONDLY" => Frequency::Secondly,
    "MINUTELY" => Frequency::Minutely,
    "HOURLY" => Frequency::Hourly,
    "DAILY" => Frequency::Daily,
    "WEEKLY" => Frequency::Weekly,
    "MONTHLY" => Frequency::Monthly,
    "YEARLY" => Frequency::Yearly,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

static WEEKDAYS: phf::Map<&'static str, Weekday> = phf_map! {
    "SU" => Weekday::Sunday,
    "MO" => Weekday::Monday,
    "TU" => Weekday::Tuesday,
    "WE" => Weekday::Wednesday,
    "TH" => Weekday::Thursday,
    "FR" => Weekday::Friday,
    "SA" => Weekday::Saturday,
};

/// weekdaynum = [[plus / minus] ordwk] weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    pub ordinal: Option<i8>,
    pub weekday: Weekday,
}

/// enddate = date / date-time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurUntil {
    Date(Date),
    DateTime(DateTime),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recur {
    pub freq: Option<Frequency>,
    pub until: Option<RecurUntil>,
    pub count: Option<u32>,
    pub interval: Option<u32>,
    pub by_second: Vec<u8>,
    pub by_minute: Vec<u8>,
    pub by_hour: Vec<u8>,
    pub by_day: Vec<WeekdayNum>,
    pub by_month_day: Vec<i8>,
    pub by_year_day: Vec<i16>,
    pub by_week_no: Vec<i8>,
    pub by_month: Vec<u8>,
    pub by_set_pos: Vec<i16>,
    pub week_start: Option<Weekday>,
}

/// An uppercased run of letters, classified against `map`.
fn read_keyword<T: Copy>(cursor: &mut Cursor<'_>, map: &phf::Map<&'static str, T>) -> Option<T> {
    cursor.attempt(|cursor| {
        let mark = cursor.mark();
        while cursor.eat_if(is_alpha).is_some() {}
        let word = std::str::from_utf8(cursor.slice_since(mark)).ok()?;
        map.get(word.to_ascii_uppercase().as_str()).copied()
    })
}

fn read_weekday(cursor: &mut Cursor<'_>) -> Option<Weekday> {
    read_keyword(cursor, &WEEKDAYS)
}

fn read_freq(cursor: &mut Cursor<'_>) -> Option<Frequency> {
    read_keyword(cursor, &FREQUENCIES)
}

fn read_until(cursor: &mut Cursor<'_>) -> Option<RecurUntil> {
    // date is a strict prefix of date-time, so the longer form goes first.
    read_date_time(cursor)
        .map(RecurUntil::DateTime)
        .or_else(|| read_date(cursor).map(RecurUntil::Date))
}

/// ([plus / minus] 1*2DIGIT), e.g. monthdaynum and weeknum.
fn read_signed_two_digit(cursor: &mut Cursor<'_>) -> Option<i8> {
    cursor.attempt(|cursor| {
        let negative = if cursor.eat(b'-') {
            true
        } else {
            cursor.eat(b'+');
            false
        };
        let magnitude = i8::try_from(read_one_or_two_digits(cursor)?).ok()?;
        Some(if negative { -magnitude } else { magnitude })
    })
}

/// ([plus / minus] 1*3DIGIT), e.g. yeardaynum and setposday.
fn read_signed_three_digit(cursor: &mut Cursor<'_>) -> Option<i16> {
    cursor.attempt(|cursor| {
        let negative = if cursor.eat(b'-') {
            true
        } else {
            cursor.eat(b'+');
            false
        };
        let mut value: i16 = 0;
        let mut count = 0;
        while count < 3 {
            let Some(digit) = cursor.eat_if(is_digit) else {
                break;
            };
            value = value * 10 + i16::from(digit - b'0');
            count += 1;
        }
        (count > 0).then_some(if negative { -value } else { value })
    })
}

fn read_weekdaynum(cursor: &mut Cursor<'_>) -> Option<WeekdayNum> {
    cursor.attempt(|cursor| {
        let ordinal = read_signed_two_digit(cursor);
        let weekday = read_weekday(cursor)?;
        Some(WeekdayNum { ordinal, weekday })
    })
}

/// item *("," item)
fn read_list<T>(
    cursor: &mut Cursor<'_>,
    item: impl Fn(&mut Cursor<'_>) -> Option<T>,
) -> Option<Vec<T>> {
    cursor.attempt(|cursor| {
        let mut out = vec![item(cursor)?];
        while let Some(next) = cursor.attempt(|cursor| {
            cursor.eat(b',').then_some(())?;
            item(cursor)
        }) {
            out.push(next);
        }
        Some(out)
    })
}

/// The `NAME=` prefix of a rule part.
fn read_part_name(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        let mark = cursor.mark();
        cursor.eat_if(is_alpha)?;
        while cursor.eat_if(is_alpha).is_some() {}
        let name = std::str::from_utf8(cursor.slice_since(mark))
            .ok()?
            .to_ascii_uppercase();
        cursor.eat(b'=').then_some(name)
    })
}

fn read_rule_part(cursor: &mut Cursor<'_>, recur: &mut Recur) -> Option<()> {
    let name = read_part_name(cursor)?;
    match name.as_str() {
        "FREQ" => recur.freq = Some(read_freq(cursor)?),
        "UNTIL" => recur.until = Some(read_until(cursor)?),
        "COUNT" => recur.count = Some(read_digit_value(cursor)?),
        "INTERVAL" => recur.interval = Some(read_digit_value(cursor)?),
        "BYSECOND" => recur.by_second = read_list(cursor, read_one_or_two_digits)?,
        "BYMINUTE" => recur.by_minute = read_list(cursor, read_one_or_two_digits)?,
        "BYHOUR" => recur.by_hour = read_list(cursor, read_one_or_two_digits)?,
        "BYDAY" => recur.by_day = read_list(cursor, read_weekdaynum)?,
        "BYMONTHDAY" => recur.by_month_day = read_list(cursor, read_signed_two_digit)?,
        "BYYEARDAY" => recur.by_year_day = read_list(cursor, read_signed_three_digit)?,
        "BYWEEKNO" => recur.by_week_no = read_list(cursor, read_signed_two_digit)?,
        "BYMONTH" => recur.by_month = read_list(cursor, read_one_or_two_digits)?,
        "BYSETPOS" => recur.by_set_pos = read_list(cursor, read_signed_three_digit)?,
        "WKST" => recur.week_start = Some(read_weekday(cursor)?),
        _ => return None,
    }
    Some(())
}

/// recur = recur-rule-part *( ";" recur-rule-part )
pub fn read_recur(cursor: &mut Cursor<'_>) -> Option<Recur> {
    cursor.attempt(|cursor| {
        let mut recur = Recur::default();
        read_rule_part(cursor, &mut recur)?;
        loop {
            let more = cursor.attempt(|cursor| {
                cursor.eat(b';').then_some(())?;
                read_rule_part(cursor, &mut recur)
            });
            if more.is_none() {
                break;
            }
        }
        Some(recur)
    })
}

expect_rules! {
    /// recur, hard form.
    pub fn expect_recur(Recur) = read_recur, "recurrence rule";
}
