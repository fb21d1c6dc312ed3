//! Property parameter grammars (RFC 5545 §3.2) and the `icalparameter`
//! dispatcher.
//!
//! Each parameter rule has the shape `NAME "=" value-set`. The dispatcher
//! tries every specific rule before falling through to the generic
//! `other-param`, so a registered parameter can never be shadowed by the
//! IANA/X fallback. Enumerated value sets go through `phf` keyword tables;
//! sets the RFC leaves open-ended fall back to an `XName`/`Iana` variant.

use crate::cursor::{Cursor, expect_rules};
use crate::grammar::langtag::read_language_tag;
use crate::grammar::mediatype::read_media_type;
use crate::grammar::uri::{Uri, read_uri};
use crate::lex::{read_iana_token, read_name, read_param_value, read_paramtext};

/// CUTYPE: calendar user type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CuType {
    Individual,
    Group,
    Resource,
    Room,
    Unknown,
    XName(String),
    Iana(String),
}

/// ENCODING: inline encoding. Closed set, no extension slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    EightBit,
    Base64,
}

/// FBTYPE: free/busy time type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FbType {
    Free,
    Busy,
    BusyUnavailable,
    BusyTentative,
    XName(String),
    Iana(String),
}

/// PARTSTAT: participation status (union of the event/todo/journal sets).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartStat {
    NeedsAction,
    Accepted,
    Declined,
    Tentative,
    Delegated,
    Completed,
    InProcess,
    XName(String),
    Iana(String),
}

/// RANGE: recurrence identifier range. RFC 5545 retains only THISANDFUTURE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    ThisAndFuture,
}

/// RELATED: alarm trigger anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Related {
    Start,
    End,
}

/// RELTYPE: relationship type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelType {
    Parent,
    Child,
    Sibling,
    XName(String),
    Iana(String),
}

/// ROLE: participation role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Chair,
    ReqParticipant,
    OptParticipant,
    NonParticipant,
    XName(String),
    Iana(String),
}

/// TZID parameter: optional leading "/" marks a globally unique identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TzIdParam {
    pub global: bool,
    pub name: String,
}

/// VALUE: explicit value data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    UtcOffset,
    XName(String),
    Iana(String),
}

/// Unrecognized parameter: `iana-param / x-param`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherParam {
    pub name: String,
    pub values: Vec<String>,
}

/// One parsed parameter, tagged by which rule matched.
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum Parameter {
    AltRep(Uri),
    Cn(String),
    #[from]
    CuType(CuType),
    DelegatedFrom(Vec<Uri>),
    DelegatedTo(Vec<Uri>),
    Dir(Uri),
    #[from]
    Encoding(Encoding),
    FmtType(String),
    #[from]
    FbType(FbType),
    Language(String),
    Member(Vec<Uri>),
    #[from]
    PartStat(PartStat),
    #[from]
    Range(Range),
    #[from]
    Related(Related),
    #[from]
    RelType(RelType),
    #[from]
    Role(Role),
    Rsvp(bool),
    SentBy(Uri),
    #[from]
    TzId(TzIdParam),
    #[from]
    Value(ValueType),
    #[from]
    Other(OtherParam),
}

static CUTYPES: phf::Map<&'static str, CuType> = phf::phf_map! {
    "INDIVIDUAL" => CuType::Individual,
    "GROUP" => CuType::Group,
    "RESOURCE" => CuType::Resource,
    "ROOM" => CuType::Room,
    "UNKNOWN" => CuType::Unknown,
};

static FBTYPES: phf::Map<&'static str, FbType> = phf::phf_map! {
    "FREE" => FbType::Free,
    "BUSY" => FbType::Busy,
    "BUSY-UNAVAILABLE" => FbType::BusyUnavailable,
    "BUSY-TENTATIVE" => FbType::BusyTentative,
};

static PARTSTATS: phf::Map<&'static str, PartStat> = phf::phf_map! {
    "NEEDS-ACTION" => PartStat::NeedsAction,
    "ACCEPTED" => PartStat::Accepted,
    "DECLINED" => PartStat::Declined,
    "TENTATIVE" => PartStat::Tentative,
    "DELEGATED" => PartStat::Delegated,
    "COMPLETED" => PartStat::Completed,
    "IN-PROCESS" => PartStat::InProcess,
};

static RELTYPES: phf::Map<&'static str, RelType> = phf::phf_map! {
    "PARENT" => RelType::Parent,
    "CHILD" => RelType::Child,
    "SIBLING" => RelType::Sibling,
};

static ROLES: phf::Map<&'static str, Role> = phf::phf_map! {
    "CHAIR" => Role::Chair,
    "REQ-PARTICIPANT" => Role::ReqParticipant,
    "OPT-PARTICIPANT" => Role::OptParticipant,
    "NON-PARTICIPANT" => Role::NonParticipant,
};

static VALUE_TYPES: phf::Map<&'static str, ValueType> = phf::phf_map! {
    "BINARY" => ValueType::Binary,
    "BOOLEAN" => ValueType::Boolean,
    "CAL-ADDRESS" => ValueType::CalAddress,
    "DATE" => ValueType::Date,
    "DATE-TIME" => ValueType::DateTime,
    "DURATION" => ValueType::Duration,
    "FLOAT" => ValueType::Float,
    "INTEGER" => ValueType::Integer,
    "PERIOD" => ValueType::Period,
    "RECUR" => ValueType::Recur,
    "TEXT" => ValueType::Text,
    "TIME" => ValueType::Time,
    "URI" => ValueType::Uri,
    "UTC-OFFSET" => ValueType::UtcOffset,
};

/// `NAME "="` prefix shared by every parameter rule.
fn eat_param_name(cursor: &mut Cursor<'_>, name: &str) -> Option<()> {
    cursor.attempt(|cursor| {
        cursor.eat_literal_ci(name).then_some(())?;
        cursor.eat(b'=').then_some(())
    })
}

/// One token from an open enumerated set, classified through `table` with
/// x-name/iana-token fallback.
fn read_open_enum<T: Clone>(
    cursor: &mut Cursor<'_>,
    table: &phf::Map<&'static str, T>,
    fallback: fn(String) -> T,
    iana: fn(String) -> T,
) -> Option<T> {
    let token = read_name(cursor)?;
    let upper = token.to_ascii_uppercase();
    if let Some(known) = table.get(upper.as_str()) {
        return Some(known.clone());
    }
    if upper.starts_with("X-") {
        Some(fallback(token))
    } else {
        Some(iana(token))
    }
}

/// One token from a closed enumerated set; unknown tokens do not match.
fn read_closed_enum<T: Clone>(
    cursor: &mut Cursor<'_>,
    table: &phf::Map<&'static str, T>,
) -> Option<T> {
    cursor.attempt(|cursor| {
        let token = read_iana_token(cursor)?;
        table.get(token.to_ascii_uppercase().as_str()).cloned()
    })
}

/// DQUOTE uri DQUOTE — the quoted cal-address / URI form.
fn read_quoted_uri(cursor: &mut Cursor<'_>) -> Option<Uri> {
    cursor.attempt(|cursor| {
        cursor.eat(b'"').then_some(())?;
        let uri = read_uri(cursor)?;
        cursor.eat(b'"').then_some(uri)
    })
}

/// Comma-separated list of quoted cal-addresses (DELEGATED-FROM/TO, MEMBER).
fn read_quoted_uri_list(cursor: &mut Cursor<'_>) -> Option<Vec<Uri>> {
    cursor.attempt(|cursor| {
        let first = read_quoted_uri(cursor)?;
        let mut list = vec![first];
        loop {
            let next = cursor.attempt(|cursor| {
                cursor.eat(b',').then_some(())?;
                read_quoted_uri(cursor)
            });
            match next {
                Some(uri) => list.push(uri),
                None => break,
            }
        }
        Some(list)
    })
}

/// altrepparam = "ALTREP" "=" DQUOTE uri DQUOTE
pub fn read_altrep_param(cursor: &mut Cursor<'_>) -> Option<Uri> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "ALTREP")?;
        read_quoted_uri(cursor)
    })
}

/// cnparam = "CN" "=" param-value
pub fn read_cn_param(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "CN")?;
        read_param_value(cursor)
    })
}

/// cutypeparam = "CUTYPE" "=" ("INDIVIDUAL" / ... / x-name / iana-token)
pub fn read_cutype_param(cursor: &mut Cursor<'_>) -> Option<CuType> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "CUTYPE")?;
        read_open_enum(cursor, &CUTYPES, CuType::XName, CuType::Iana)
    })
}

/// delfromparam = "DELEGATED-FROM" "=" DQUOTE cal-address DQUOTE *("," ...)
pub fn read_delegated_from_param(cursor: &mut Cursor<'_>) -> Option<Vec<Uri>> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "DELEGATED-FROM")?;
        read_quoted_uri_list(cursor)
    })
}

/// deltoparam = "DELEGATED-TO" "=" DQUOTE cal-address DQUOTE *("," ...)
pub fn read_delegated_to_param(cursor: &mut Cursor<'_>) -> Option<Vec<Uri>> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "DELEGATED-TO")?;
        read_quoted_uri_list(cursor)
    })
}

/// dirparam = "DIR" "=" DQUOTE uri DQUOTE
pub fn read_dir_param(cursor: &mut Cursor<'_>) -> Option<Uri> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "DIR")?;
        read_quoted_uri(cursor)
    })
}

/// encodingparam = "ENCODING" "=" ("8BIT" / "BASE64")
pub fn read_encoding_param(cursor: &mut Cursor<'_>) -> Option<Encoding> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "ENCODING")?;
        let token = read_iana_token(cursor)?;
        match token.to_ascii_uppercase().as_str() {
            "8BIT" => Some(Encoding::EightBit),
            "BASE64" => Some(Encoding::Base64),
            _ => None,
        }
    })
}

/// fmttypeparam = "FMTTYPE" "=" type-name "/" subtype-name
pub fn read_fmttype_param(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "FMTTYPE")?;
        read_media_type(cursor)
    })
}

/// fbtypeparam = "FBTYPE" "=" ("FREE" / "BUSY" / ... / x-name / iana-token)
pub fn read_fbtype_param(cursor: &mut Cursor<'_>) -> Option<FbType> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "FBTYPE")?;
        read_open_enum(cursor, &FBTYPES, FbType::XName, FbType::Iana)
    })
}

/// languageparam = "LANGUAGE" "=" language-tag
pub fn read_language_param(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "LANGUAGE")?;
        read_language_tag(cursor)
    })
}

/// memberparam = "MEMBER" "=" DQUOTE cal-address DQUOTE *("," ...)
pub fn read_member_param(cursor: &mut Cursor<'_>) -> Option<Vec<Uri>> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "MEMBER")?;
        read_quoted_uri_list(cursor)
    })
}

/// partstatparam = "PARTSTAT" "=" (statvalue / x-name / iana-token)
pub fn read_partstat_param(cursor: &mut Cursor<'_>) -> Option<PartStat> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "PARTSTAT")?;
        read_open_enum(cursor, &PARTSTATS, PartStat::XName, PartStat::Iana)
    })
}

/// rangeparam = "RANGE" "=" "THISANDFUTURE"
pub fn read_range_param(cursor: &mut Cursor<'_>) -> Option<Range> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "RANGE")?;
        let token = read_iana_token(cursor)?;
        token
            .eq_ignore_ascii_case("THISANDFUTURE")
            .then_some(Range::ThisAndFuture)
    })
}

/// trigrelparam = "RELATED" "=" ("START" / "END")
pub fn read_related_param(cursor: &mut Cursor<'_>) -> Option<Related> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "RELATED")?;
        let token = read_iana_token(cursor)?;
        match token.to_ascii_uppercase().as_str() {
            "START" => Some(Related::Start),
            "END" => Some(Related::End),
            _ => None,
        }
    })
}

/// reltypeparam = "RELTYPE" "=" ("PARENT" / "CHILD" / "SIBLING" / x / iana)
pub fn read_reltype_param(cursor: &mut Cursor<'_>) -> Option<RelType> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "RELTYPE")?;
        read_open_enum(cursor, &RELTYPES, RelType::XName, RelType::Iana)
    })
}

/// roleparam = "ROLE" "=" ("CHAIR" / ... / x-name / iana-token)
pub fn read_role_param(cursor: &mut Cursor<'_>) -> Option<Role> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "ROLE")?;
        read_open_enum(cursor, &ROLES, Role::XName, Role::Iana)
    })
}

/// rsvpparam = "RSVP" "=" ("TRUE" / "FALSE")
pub fn read_rsvp_param(cursor: &mut Cursor<'_>) -> Option<bool> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "RSVP")?;
        let token = read_iana_token(cursor)?;
        match token.to_ascii_uppercase().as_str() {
            "TRUE" => Some(true),
            "FALSE" => Some(false),
            _ => None,
        }
    })
}

/// sentbyparam = "SENT-BY" "=" DQUOTE cal-address DQUOTE
pub fn read_sent_by_param(cursor: &mut Cursor<'_>) -> Option<Uri> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "SENT-BY")?;
        read_quoted_uri(cursor)
    })
}

/// tzidparam = "TZID" "=" [tzidprefix] paramtext, tzidprefix = "/"
pub fn read_tzid_param(cursor: &mut Cursor<'_>) -> Option<TzIdParam> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "TZID")?;
        let global = cursor.eat(b'/');
        let name = read_paramtext(cursor)?;
        (!name.is_empty()).then_some(TzIdParam { global, name })
    })
}

/// valuetypeparam = "VALUE" "=" valuetype
pub fn read_value_type_param(cursor: &mut Cursor<'_>) -> Option<ValueType> {
    cursor.attempt(|cursor| {
        eat_param_name(cursor, "VALUE")?;
        read_open_enum(cursor, &VALUE_TYPES, ValueType::XName, ValueType::Iana)
    })
}

/// other-param = iana-param / x-param
///
/// `iana-param = iana-token "=" param-value *("," param-value)` and the x-
/// form are the same shape; `read_name` covers both spellings.
pub fn read_other_param(cursor: &mut Cursor<'_>) -> Option<OtherParam> {
    cursor.attempt(|cursor| {
        let name = read_name(cursor)?;
        cursor.eat(b'=').then_some(())?;
        let first = read_param_value(cursor)?;
        let mut values = vec![first];
        while cursor.eat(b',') {
            values.push(read_param_value(cursor)?);
        }
        Some(OtherParam { name, values })
    })
}

/// icalparameter: every specific rule in a fixed order, generic fallback
/// last so it can never shadow a registered parameter.
pub fn read_icalparameter(cursor: &mut Cursor<'_>) -> Option<Parameter> {
    if let Some(uri) = read_altrep_param(cursor) {
        return Some(Parameter::AltRep(uri));
    }
    if let Some(cn) = read_cn_param(cursor) {
        return Some(Parameter::Cn(cn));
    }
    if let Some(cutype) = read_cutype_param(cursor) {
        return Some(cutype.into());
    }
    if let Some(list) = read_delegated_from_param(cursor) {
        return Some(Parameter::DelegatedFrom(list));
    }
    if let Some(list) = read_delegated_to_param(cursor) {
        return Some(Parameter::DelegatedTo(list));
    }
    if let Some(uri) = read_dir_param(cursor) {
        return Some(Parameter::Dir(uri));
    }
    if let Some(encoding) = read_encoding_param(cursor) {
        return Some(encoding.into());
    }
    if let Some(fmttype) = read_fmttype_param(cursor) {
        return Some(Parameter::FmtType(fmttype));
    }
    if let Some(fbtype) = read_fbtype_param(cursor) {
        return Some(fbtype.into());
    }
    if let Some(tag) = read_language_param(cursor) {
        return Some(Parameter::Language(tag));
    }
    if let Some(list) = read_member_param(cursor) {
        return Some(Parameter::Member(list));
    }
    if let Some(partstat) = read_partstat_param(cursor) {
        return Some(partstat.into());
    }
    if let Some(range) = read_range_param(cursor) {
        return Some(range.into());
    }
    if let Some(related) = read_related_param(cursor) {
        return Some(related.into());
    }
    if let Some(reltype) = read_reltype_param(cursor) {
        return Some(reltype.into());
    }
    if let Some(role) = read_role_param(cursor) {
        return Some(role.into());
    }
    if let Some(rsvp) = read_rsvp_param(cursor) {
        return Some(Parameter::Rsvp(rsvp));
    }
    if let Some(uri) = read_sent_by_param(cursor) {
        return Some(Parameter::SentBy(uri));
    }
    if let Some(tzid) = read_tzid_param(cursor) {
        return Some(tzid.into());
    }
    if let Some(value_type) = read_value_type_param(cursor) {
        return Some(value_type.into());
    }
    read_other_param(cursor).map(Parameter::Other)
}

expect_rules! {
    /// icalparameter, hard form.
    pub fn expect_icalparameter(Parameter) = read_icalparameter, "parameter";
    /// other-param, hard form.
    pub fn expect_other_param(OtherParam) = read_other_param, "IANA or X- parameter";
    /// tzidparam, hard form.
    pub fn expect_tzid_param(TzIdParam) = read_tzid_param, "TZID parameter";
    /// valuetypeparam, hard form.
    pub fn expect_value_type_param(ValueType) = read_value_type_param, "VALUE parameter";
}
