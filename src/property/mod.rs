//! Property grammars (RFC 5545 §3.7/§3.8).
//!
//! Every property follows the same shape:
//!
//! ```text
//! KEYWORD *(";" icalparameter) ":" value CRLF
//! ```
//!
//! The [`property!`] macro stamps out a struct plus the read/expect rule pair
//! for that shape; only the keyword and the value rule differ per property.
//! Properties whose value form is switched by a `VALUE=` parameter get a rule
//! that inspects the already-parsed parameter list, trying the longer
//! alternative first when forms share a prefix.

use crate::cursor::{Cursor, expect_rules};
use crate::lex::{read_iana_token, read_line_break, read_raw_value, read_x_name};
use crate::parameter::{Parameter, ValueType, read_icalparameter};
use crate::value::datetime::{Date, DateTime, read_date, read_date_time};
use crate::value::period::{Period, read_period};

mod alarm;
pub use alarm::*;
mod calendar;
pub use calendar::*;
mod datetime;
pub use datetime::*;
mod descriptive;
pub use descriptive::*;
mod recurrence;
pub use recurrence::*;
mod relationship;
pub use relationship::*;
mod timezone;
pub use timezone::*;

/// `*(";" icalparameter)` — the parameter list between keyword and ":".
pub(crate) fn read_property_params(cursor: &mut Cursor<'_>) -> Vec<Parameter> {
    cursor.repeat(|cursor| {
        cursor.eat(b';').then_some(())?;
        read_icalparameter(cursor)
    })
}

/// The `VALUE=` parameter of a parsed parameter list, if present.
pub(crate) fn declared_value_type(params: &[Parameter]) -> Option<&ValueType> {
    params.iter().find_map(|param| match param {
        Parameter::Value(value_type) => Some(value_type),
        _ => None,
    })
}

/// `item *("," item)` at value position.
pub(crate) fn read_value_list<T>(
    cursor: &mut Cursor<'_>,
    params: &[Parameter],
    item: impl Fn(&mut Cursor<'_>, &[Parameter]) -> Option<T>,
) -> Option<Vec<T>> {
    cursor.attempt(|cursor| {
        let mut out = vec![item(cursor, params)?];
        while let Some(next) = cursor.attempt(|cursor| {
            cursor.eat(b',').then_some(())?;
            item(cursor, params)
        }) {
            out.push(next);
        }
        Some(out)
    })
}

/// A value that is either a date-time or, under `VALUE=DATE`, a bare date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrDateTime {
    Date(Date),
    DateTime(DateTime),
}

/// date is a prefix of date-time, so the longer form is tried first unless
/// `VALUE=DATE` pins the short one.
pub(crate) fn read_date_or_date_time(
    cursor: &mut Cursor<'_>,
    params: &[Parameter],
) -> Option<DateOrDateTime> {
    if matches!(declared_value_type(params), Some(ValueType::Date)) {
        return read_date(cursor).map(DateOrDateTime::Date);
    }
    read_date_time(cursor)
        .map(DateOrDateTime::DateTime)
        .or_else(|| read_date(cursor).map(DateOrDateTime::Date))
}

/// RDATE value form: date-time, date, or period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeOrPeriod {
    Date(Date),
    DateTime(DateTime),
    Period(Period),
}

pub(crate) fn read_date_time_or_period(
    cursor: &mut Cursor<'_>,
    params: &[Parameter],
) -> Option<DateTimeOrPeriod> {
    match declared_value_type(params) {
        Some(ValueType::Date) => read_date(cursor).map(DateTimeOrPeriod::Date),
        Some(ValueType::Period) => read_period(cursor).map(DateTimeOrPeriod::Period),
        _ => read_period(cursor)
            .map(DateTimeOrPeriod::Period)
            .or_else(|| read_date_time(cursor).map(DateTimeOrPeriod::DateTime))
            .or_else(|| read_date(cursor).map(DateTimeOrPeriod::Date)),
    }
}

/// Defines a property struct and its read/expect rule pair.
///
/// The value rule receives the parameter list so `VALUE=`-switched properties
/// can pick the right alternative.
macro_rules! property {
    ($(
        $(#[$meta:meta])*
        $keyword:literal, $name:ident($value:ty), $read:ident / $expect:ident = $rule:expr;
    )+) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub params: Vec<$crate::parameter::Parameter>,
            pub value: $value,
        }

        pub fn $read(cursor: &mut $crate::cursor::Cursor<'_>) -> Option<$name> {
            cursor.attempt(|cursor| {
                cursor.eat_literal_ci($keyword).then_some(())?;
                let params = $crate::property::read_property_params(cursor);
                cursor.eat(b':').then_some(())?;
                let value = ($rule)(cursor, params.as_slice())?;
                $crate::lex::read_line_break(cursor)?;
                Some($name { params, value })
            })
        }

        $crate::cursor::expect_rules! {
            pub fn $expect($name) = $read, $keyword;
        }
    )+};
}
pub(crate) use property;

/// Adapts a plain value rule to the parameter-aware signature [`property!`]
/// expects.
macro_rules! plain {
    ($rule:path) => {
        |cursor: &mut $crate::cursor::Cursor<'_>,
         _params: &[$crate::parameter::Parameter]| { $rule(cursor) }
    };
}
pub(crate) use plain;

/// x-prop = x-name *(";" icalparameter) ":" value CRLF
#[derive(Debug, Clone, PartialEq)]
pub struct XProp {
    pub name: String,
    pub params: Vec<Parameter>,
    pub value: String,
}

pub fn read_x_prop(cursor: &mut Cursor<'_>) -> Option<XProp> {
    cursor.attempt(|cursor| {
        let name = read_x_name(cursor)?;
        let params = read_property_params(cursor);
        cursor.eat(b':').then_some(())?;
        let value = read_raw_value(cursor)?;
        read_line_break(cursor)?;
        Some(XProp {
            name,
            params,
            value,
        })
    })
}

/// iana-prop = iana-token *(";" icalparameter) ":" value CRLF
///
/// BEGIN and END are not property names; accepting them here would swallow
/// component delimiters inside the unordered property loops.
#[derive(Debug, Clone, PartialEq)]
pub struct IanaProp {
    pub name: String,
    pub params: Vec<Parameter>,
    pub value: String,
}

pub fn read_iana_prop(cursor: &mut Cursor<'_>) -> Option<IanaProp> {
    cursor.attempt(|cursor| {
        let name = read_iana_token(cursor)?;
        if name.eq_ignore_ascii_case("BEGIN") || name.eq_ignore_ascii_case("END") {
            return None;
        }
        let params = read_property_params(cursor);
        cursor.eat(b':').then_some(())?;
        let value = read_raw_value(cursor)?;
        read_line_break(cursor)?;
        Some(IanaProp {
            name,
            params,
            value,
        })
    })
}

/// An extension property: `x-prop / iana-prop`.
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum ExtProp {
    X(XProp),
    Iana(IanaProp),
}

pub fn read_ext_prop(cursor: &mut Cursor<'_>) -> Option<ExtProp> {
    read_x_prop(cursor)
        .map(ExtProp::X)
        .or_else(|| read_iana_prop(cursor).map(ExtProp::Iana))
}

expect_rules! {
    /// x-prop, hard form.
    pub fn expect_x_prop(XProp) = read_x_prop, "X- property";
    /// iana-prop, hard form.
    pub fn expect_iana_prop(IanaProp) = read_iana_prop, "IANA property";
    /// ext-prop, hard form.
    pub fn expect_ext_prop(ExtProp) = read_ext_prop, "extension property";
}
