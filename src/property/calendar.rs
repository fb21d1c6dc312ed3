//! Calendar-header properties (RFC 5545 §3.7).

use crate::lex::{read_iana_token, read_text};
use crate::property::{plain, property};

property! {
    /// prodid = "PRODID" pidparam ":" pidvalue CRLF
    "PRODID", ProdId(String), read_prodid / expect_prodid = plain!(read_text);
    /// version = "VERSION" verparam ":" vervalue CRLF
    "VERSION", Version(String), read_version / expect_version = plain!(read_text);
    /// calscale = "CALSCALE" calparam ":" calvalue CRLF
    "CALSCALE", CalScale(String), read_calscale / expect_calscale = plain!(read_iana_token);
    /// method = "METHOD" metparam ":" metvalue CRLF
    "METHOD", Method(String), read_method / expect_method = plain!(read_iana_token);
}
