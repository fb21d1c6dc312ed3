//! Foundational grammars with no iCalendar-specific knowledge.
//!
//! These sub-grammars come from the standards RFC 5545 leans on: RFC 5234
//! core ABNF classes, UTF-8 continuation sequences, RFC 3986 URI syntax,
//! RFC 4288 media-type names, and RFC 5646 language tags. They are pure
//! functions from cursor state to an optional match, producing nothing
//! richer than strings and the small [`uri::Uri`]/[`uri::Authority`] structs.

pub mod abnf;
pub mod langtag;
pub mod mediatype;
pub mod uri;
pub mod utf8;
