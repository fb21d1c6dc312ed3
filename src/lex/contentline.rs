//! Generic content-line grammar (RFC 5545 §3.1).
//!
//! `contentline = name *(";" param) ":" value CRLF`
//!
//! This is the fallback recognizer used inside IANA/X extension components,
//! whose bodies are unconstrained. Typed property rules elsewhere re-derive
//! the same shape with specific parameter and value grammars.

use crate::cursor::{Cursor, expect_rules};
use crate::lex::{read_line_break, read_name, read_param_value, read_raw_value};

/// One untyped `name=value1,value2` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParam {
    pub name: String,
    pub values: Vec<String>,
}

/// One untyped content line: non-empty name, zero or more params, exactly
/// one (possibly empty) value string. The terminating line break is consumed
/// but not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub name: String,
    pub params: Vec<RawParam>,
    pub value: String,
}

/// param = param-name "=" param-value *("," param-value)
pub fn read_param(cursor: &mut Cursor<'_>) -> Option<RawParam> {
    cursor.attempt(|cursor| {
        let name = read_name(cursor)?;
        cursor.eat(b'=').then_some(())?;
        let first = read_param_value(cursor)?;
        let mut values = vec![first];
        while cursor.eat(b',') {
            values.push(read_param_value(cursor)?);
        }
        Some(RawParam { name, values })
    })
}

/// contentline = name *(";" param) ":" value CRLF
pub fn read_contentline(cursor: &mut Cursor<'_>) -> Option<ContentLine> {
    cursor.attempt(|cursor| {
        let name = read_name(cursor)?;
        let mut params = Vec::new();
        while cursor.eat(b';') {
            params.push(read_param(cursor)?);
        }
        cursor.eat(b':').then_some(())?;
        let value = read_raw_value(cursor)?;
        read_line_break(cursor)?;
        Some(ContentLine {
            name,
            params,
            value,
        })
    })
}

expect_rules! {
    /// param, hard form.
    pub fn expect_param(RawParam) = read_param, "parameter";
    /// contentline, hard form.
    pub fn expect_contentline(ContentLine) = read_contentline, "content line";
}
