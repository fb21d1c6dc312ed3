//! Descriptive component properties (RFC 5545 §3.8.1).

use phf::phf_map;

use crate::cursor::Cursor;
use crate::grammar::uri::{Uri, read_uri};
use crate::lex::read_text;
use crate::parameter::{Parameter, ValueType};
use crate::property::{declared_value_type, plain, property, read_value_list};
use crate::value::{GeoValue, read_binary, read_geo_value, read_integer};

/// classvalue = "PUBLIC" / "PRIVATE" / "CONFIDENTIAL" / x-name / iana-token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassValue {
    Public,
    Private,
    Confidential,
    XName(String),
    Iana(String),
}

static CLASSES: phf::Map<&'static str, ClassValue> = phf_map! {
    "PUBLIC" => ClassValue::Public,
    "PRIVATE" => ClassValue::Private,
    "CONFIDENTIAL" => ClassValue::Confidential,
};

fn read_class_value(cursor: &mut Cursor<'_>, _params: &[Parameter]) -> Option<ClassValue> {
    let token = crate::lex::read_name(cursor)?;
    let upper = token.to_ascii_uppercase();
    if let Some(known) = CLASSES.get(upper.as_str()) {
        return Some(known.clone());
    }
    if upper.starts_with("X-") {
        Some(ClassValue::XName(token))
    } else {
        Some(ClassValue::Iana(token))
    }
}

/// statvalue: the union of the event, todo and journal status sets. Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusValue {
    Tentative,
    Confirmed,
    Cancelled,
    Completed,
    NeedsAction,
    InProcess,
    Draft,
    Final,
}

static STATUSES: phf::Map<&'static str, StatusValue> = phf_map! {
    "TENTATIVE" => StatusValue::Tentative,
    "CONFIRMED" => StatusValue::Confirmed,
    "CANCELLED" => StatusValue::Cancelled,
    "COMPLETED" => StatusValue::Completed,
    "NEEDS-ACTION" => StatusValue::NeedsAction,
    "IN-PROCESS" => StatusValue::InProcess,
    "DRAFT" => StatusValue::Draft,
    "FINAL" => StatusValue::Final,
};

fn read_status_value(cursor: &mut Cursor<'_>, _params: &[Parameter]) -> Option<StatusValue> {
    cursor.attempt(|cursor| {
        let token = crate::lex::read_iana_token(cursor)?;
        STATUSES.get(token.to_ascii_uppercase().as_str()).copied()
    })
}

/// transvalue = "OPAQUE" / "TRANSPARENT". Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranspValue {
    Opaque,
    Transparent,
}

fn read_transp_value(cursor: &mut Cursor<'_>, _params: &[Parameter]) -> Option<TranspValue> {
    cursor.attempt(|cursor| {
        let token = crate::lex::read_iana_token(cursor)?;
        match token.to_ascii_uppercase().as_str() {
            "OPAQUE" => Some(TranspValue::Opaque),
            "TRANSPARENT" => Some(TranspValue::Transparent),
            _ => None,
        }
    })
}

/// ATTACH value: a URI by default, inline binary under `VALUE=BINARY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachValue {
    Uri(Uri),
    Binary(String),
}

fn read_attach_value(cursor: &mut Cursor<'_>, params: &[Parameter]) -> Option<AttachValue> {
    if matches!(declared_value_type(params), Some(ValueType::Binary)) {
        return read_binary(cursor).map(AttachValue::Binary);
    }
    read_uri(cursor).map(AttachValue::Uri)
}

fn read_text_list(cursor: &mut Cursor<'_>, params: &[Parameter]) -> Option<Vec<String>> {
    read_value_list(cursor, params, plain!(read_text))
}

property! {
    /// attach = "ATTACH" attachparam ":" (uri / binary) CRLF
    "ATTACH", Attach(AttachValue), read_attach / expect_attach = read_attach_value;
    /// categories = "CATEGORIES" catparam ":" text *("," text) CRLF
    "CATEGORIES", Categories(Vec<String>), read_categories / expect_categories = read_text_list;
    /// class = "CLASS" classparam ":" classvalue CRLF
    "CLASS", Class(ClassValue), read_class / expect_class = read_class_value;
    /// comment = "COMMENT" commparam ":" text CRLF
    "COMMENT", Comment(String), read_comment / expect_comment = plain!(read_text);
    /// description = "DESCRIPTION" descparam ":" text CRLF
    "DESCRIPTION", Description(String), read_description / expect_description = plain!(read_text);
    /// geo = "GEO" geoparam ":" geovalue CRLF
    "GEO", Geo(GeoValue), read_geo / expect_geo = plain!(read_geo_value);
    /// location = "LOCATION" locparam ":" text CRLF
    "LOCATION", Location(String), read_location / expect_location = plain!(read_text);
    /// percent = "PERCENT-COMPLETE" pctparam ":" integer CRLF
    "PERCENT-COMPLETE", PercentComplete(i32),
        read_percent_complete / expect_percent_complete = plain!(read_integer);
    /// priority = "PRIORITY" prioparam ":" priovalue CRLF
    "PRIORITY", Priority(i32), read_priority / expect_priority = plain!(read_integer);
    /// resources = "RESOURCES" resrcparam ":" text *("," text) CRLF
    "RESOURCES", Resources(Vec<String>), read_resources / expect_resources = read_text_list;
    /// status = "STATUS" statparam ":" statvalue CRLF
    "STATUS", Status(StatusValue), read_status / expect_status = read_status_value;
    /// summary = "SUMMARY" summparam ":" text CRLF
    "SUMMARY", Summary(String), read_summary / expect_summary = plain!(read_text);
    /// transp = "TRANSP" transparam ":" transvalue CRLF
    "TRANSP", Transp(TranspValue), read_transp / expect_transp = read_transp_value;
}
