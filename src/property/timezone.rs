//! Time-zone component properties (RFC 5545 §3.8.3).

use crate::grammar::uri::{Uri, read_uri};
use crate::lex::read_text;
use crate::property::{plain, property};
use crate::value::datetime::{UtcOffset, read_utc_offset};

property! {
    /// tzid = "TZID" tzidpropparam ":" [tzidprefix] text CRLF
    ///
    /// The "/" global prefix is a text character, so the value keeps it.
    "TZID", TzId(String), read_tzid / expect_tzid = plain!(read_text);
    /// tzname = "TZNAME" tznparam ":" text CRLF
    "TZNAME", TzName(String), read_tzname / expect_tzname = plain!(read_text);
    /// tzoffsetfrom = "TZOFFSETFROM" frmparam ":" utc-offset CRLF
    "TZOFFSETFROM", TzOffsetFrom(UtcOffset),
        read_tzoffsetfrom / expect_tzoffsetfrom = plain!(read_utc_offset);
    /// tzoffsetto = "TZOFFSETTO" toparam ":" utc-offset CRLF
    "TZOFFSETTO", TzOffsetTo(UtcOffset),
        read_tzoffsetto / expect_tzoffsetto = plain!(read_utc_offset);
    /// tzurl = "TZURL" tzurlparam ":" uri CRLF
    "TZURL", TzUrl(Uri), read_tzurl / expect_tzurl = plain!(read_uri);
}
