//! Generic URI syntax (RFC 3986).
//!
//! Used by the cal-address, URL, ALTREP/DIR/SENT-BY and ATTACH grammars.
//! The rules recognize the full URI production including authority and all
//! host forms; the output stays deliberately flat (matched text plus the
//! [`Uri`]/[`Authority`] structs) since iCalendar never looks inside a URI.

use crate::cursor::{Cursor, expect_rules};
use crate::grammar::abnf::{
    is_alpha, is_alphanum, is_hexdig, read_digit_run, read_fixed_digits,
};

/// A parsed URI: `scheme ":" hier-part [ "?" query ] [ "#" fragment ]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri {
    pub scheme: String,
    pub hier_part: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.scheme, self.hier_part)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// `authority = [ userinfo "@" ] host [ ":" port ]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority {
    pub userinfo: Option<String>,
    pub host: String,
    pub port: Option<u32>,
}

#[inline]
fn is_unreserved(byte: u8) -> bool {
    is_alphanum(byte) || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

#[inline]
fn is_sub_delim(byte: u8) -> bool {
    matches!(
        byte,
        b'!' | b'$' | b'&' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
    )
}

/// pct-encoded = "%" HEXDIG HEXDIG, kept in its encoded form.
pub fn read_pct_encoded(cursor: &mut Cursor<'_>, out: &mut String) -> Option<()> {
    cursor.attempt(|cursor| {
        cursor.eat(b'%').then_some(())?;
        let hi = cursor.eat_if(is_hexdig)?;
        let lo = cursor.eat_if(is_hexdig)?;
        out.push('%');
        out.push(char::from(hi));
        out.push(char::from(lo));
        Some(())
    })
}

/// pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
fn read_pchar(cursor: &mut Cursor<'_>, out: &mut String) -> Option<()> {
    if let Some(byte) =
        cursor.eat_if(|b| is_unreserved(b) || is_sub_delim(b) || b == b':' || b == b'@')
    {
        out.push(char::from(byte));
        return Some(());
    }
    read_pct_encoded(cursor, out)
}

/// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
pub fn read_scheme(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        let first = cursor.eat_if(is_alpha)?;
        let mut scheme = String::new();
        scheme.push(char::from(first));
        while let Some(byte) =
            cursor.eat_if(|b| is_alphanum(b) || matches!(b, b'+' | b'-' | b'.'))
        {
            scheme.push(char::from(byte));
        }
        Some(scheme)
    })
}

/// userinfo = *( unreserved / pct-encoded / sub-delims / ":" )
fn read_userinfo(cursor: &mut Cursor<'_>) -> String {
    let mut out = String::new();
    loop {
        if let Some(byte) = cursor.eat_if(|b| is_unreserved(b) || is_sub_delim(b) || b == b':') {
            out.push(char::from(byte));
        } else if read_pct_encoded(cursor, &mut out).is_none() {
            break;
        }
    }
    out
}

/// dec-octet = DIGIT / %x31-39 DIGIT / "1" 2DIGIT / "2" %x30-34 DIGIT / "25" %x30-35
pub fn read_dec_octet(cursor: &mut Cursor<'_>) -> Option<String> {
    // Longest alternatives first: "250".."255", "200".."249", "100".."199",
    // then two digits, then one.
    for width in [3usize, 2, 1] {
        let matched = cursor.attempt(|cursor| {
            let mark = cursor.mark();
            let value = read_fixed_digits(cursor, width)?;
            if value > 255 {
                return None;
            }
            // No redundant leading zeros: width must match the value.
            let text = String::from_utf8_lossy(cursor.slice_since(mark)).into_owned();
            if width > 1 && text.starts_with('0') {
                return None;
            }
            Some(text)
        });
        if let Some(text) = matched {
            return Some(text);
        }
    }
    None
}

/// IPv4address = dec-octet "." dec-octet "." dec-octet "." dec-octet
pub fn read_ipv4_address(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        let mut out = read_dec_octet(cursor)?;
        for _ in 0..3 {
            cursor.eat(b'.').then_some(())?;
            out.push('.');
            out.push_str(&read_dec_octet(cursor)?);
        }
        Some(out)
    })
}

/// h16 = 1*4HEXDIG
fn read_h16(cursor: &mut Cursor<'_>, out: &mut String) -> Option<()> {
    cursor.attempt(|cursor| {
        let first = cursor.eat_if(is_hexdig)?;
        out.push(char::from(first));
        for _ in 0..3 {
            match cursor.eat_if(is_hexdig) {
                Some(byte) => out.push(char::from(byte)),
                None => break,
            }
        }
        Some(())
    })
}

/// ls32 = ( h16 ":" h16 ) / IPv4address
fn read_ls32(cursor: &mut Cursor<'_>, out: &mut String) -> Option<()> {
    let paired = cursor.attempt(|cursor| {
        let mut text = String::new();
        read_h16(cursor, &mut text)?;
        cursor.eat(b':').then_some(())?;
        text.push(':');
        read_h16(cursor, &mut text)?;
        Some(text)
    });
    if let Some(text) = paired {
        out.push_str(&text);
        return Some(());
    }
    let v4 = read_ipv4_address(cursor)?;
    out.push_str(&v4);
    Some(())
}

/// Exactly `n` repetitions of `h16 ":"`.
fn read_h16_colon_n(cursor: &mut Cursor<'_>, n: usize, out: &mut String) -> Option<()> {
    cursor.attempt(|cursor| {
        let mut text = String::new();
        for _ in 0..n {
            read_h16(cursor, &mut text)?;
            // Reject "h16::" being split as "h16:" + ":".
            if cursor.peek() == Some(b':') && cursor.peek_at(1) == Some(b':') {
                return None;
            }
            cursor.eat(b':').then_some(())?;
            text.push(':');
        }
        out.push_str(&text);
        Some(())
    })
}

/// Up to `max` repetitions of `h16 ":"` followed by a final h16 (the
/// bracketed prefix before `::` in the IPv6 grammar).
fn read_ipv6_prefix(cursor: &mut Cursor<'_>, max: usize, out: &mut String) -> Option<()> {
    cursor.attempt(|cursor| {
        let mut text = String::new();
        let mut groups = 0;
        while groups < max {
            let more = cursor.attempt(|cursor| {
                let mut part = String::new();
                read_h16(cursor, &mut part)?;
                if cursor.peek() == Some(b':') && cursor.peek_at(1) != Some(b':') {
                    cursor.eat(b':');
                    part.push(':');
                    Some((part, true))
                } else {
                    Some((part, false))
                }
            });
            match more {
                Some((part, true)) => {
                    text.push_str(&part);
                    groups += 1;
                }
                Some((part, false)) => {
                    text.push_str(&part);
                    out.push_str(&text);
                    return Some(());
                }
                None => return None,
            }
        }
        // max "h16 :" groups consumed; a final bare h16 is still required.
        read_h16(cursor, &mut text)?;
        out.push_str(&text);
        Some(())
    })
}

/// IPv6address, all nine alternatives of RFC 3986 §3.2.2.
pub fn read_ipv6_address(cursor: &mut Cursor<'_>) -> Option<String> {
    // 6( h16 ":" ) ls32
    let full = cursor.attempt(|cursor| {
        let mut out = String::new();
        read_h16_colon_n(cursor, 6, &mut out)?;
        read_ls32(cursor, &mut out)?;
        Some(out)
    });
    if full.is_some() {
        return full;
    }

    // The remaining alternatives share the shape
    //   [ prefix ] "::" suffix
    // where the prefix allows up to `pre` leading "h16 :" groups plus a
    // final h16, and the suffix is `post` "h16 :" groups plus ls32 (or a
    // single h16, or nothing).
    for (pre, post) in [
        (None, Some(5)),
        (Some(0), Some(4)),
        (Some(1), Some(3)),
        (Some(2), Some(2)),
        (Some(3), Some(1)),
        (Some(4), Some(0)),
    ] {
        let matched = cursor.attempt(|cursor| {
            let mut out = String::new();
            if let Some(max) = pre {
                let _unused = cursor.attempt(|cursor| {
                    let mut prefix = String::new();
                    read_ipv6_prefix(cursor, max, &mut prefix)?;
                    out.push_str(&prefix);
                    Some(())
                });
            }
            cursor.eat_literal_ci("::").then_some(())?;
            out.push_str("::");
            if let Some(n) = post {
                read_h16_colon_n(cursor, n, &mut out)?;
            }
            read_ls32(cursor, &mut out)?;
            Some(out)
        });
        if matched.is_some() {
            return matched;
        }
    }

    // [ *5( h16 ":" ) h16 ] "::" h16
    let single = cursor.attempt(|cursor| {
        let mut out = String::new();
        let _unused = cursor.attempt(|cursor| {
            let mut prefix = String::new();
            read_ipv6_prefix(cursor, 5, &mut prefix)?;
            out.push_str(&prefix);
            Some(())
        });
        cursor.eat_literal_ci("::").then_some(())?;
        out.push_str("::");
        read_h16(cursor, &mut out)?;
        Some(out)
    });
    if single.is_some() {
        return single;
    }

    // [ *6( h16 ":" ) h16 ] "::"
    cursor.attempt(|cursor| {
        let mut out = String::new();
        let _unused = cursor.attempt(|cursor| {
            let mut prefix = String::new();
            read_ipv6_prefix(cursor, 6, &mut prefix)?;
            out.push_str(&prefix);
            Some(())
        });
        cursor.eat_literal_ci("::").then_some(())?;
        out.push_str("::");
        Some(out)
    })
}

/// IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
fn read_ipvfuture(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        cursor.eat_if(|b| b == b'v' || b == b'V')?;
        let mut out = String::from("v");
        let digits = cursor.repeat1(|cursor| cursor.eat_if(is_hexdig))?;
        out.extend(digits.into_iter().map(char::from));
        cursor.eat(b'.').then_some(())?;
        out.push('.');
        let tail =
            cursor.repeat1(|cursor| cursor.eat_if(|b| is_unreserved(b) || is_sub_delim(b) || b == b':'))?;
        out.extend(tail.into_iter().map(char::from));
        Some(out)
    })
}

/// IP-literal = "[" ( IPv6address / IPvFuture ) "]"
fn read_ip_literal(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        cursor.eat(b'[').then_some(())?;
        let inner = read_ipv6_address(cursor).or_else(|| read_ipvfuture(cursor))?;
        cursor.eat(b']').then_some(())?;
        Some(format!("[{inner}]"))
    })
}

/// reg-name = *( unreserved / pct-encoded / sub-delims )
fn read_reg_name(cursor: &mut Cursor<'_>) -> String {
    let mut out = String::new();
    loop {
        if let Some(byte) = cursor.eat_if(|b| is_unreserved(b) || is_sub_delim(b)) {
            out.push(char::from(byte));
        } else if read_pct_encoded(cursor, &mut out).is_none() {
            break;
        }
    }
    out
}

/// host = IP-literal / IPv4address / reg-name
pub fn read_host(cursor: &mut Cursor<'_>) -> Option<String> {
    if let Some(literal) = read_ip_literal(cursor) {
        return Some(literal);
    }
    // IPv4address must not be a prefix of a longer reg-name ("1.2.3.4.example").
    let v4 = cursor.attempt(|cursor| {
        let addr = read_ipv4_address(cursor)?;
        match cursor.peek() {
            Some(b) if is_unreserved(b) || is_sub_delim(b) || b == b'%' => None,
            _ => Some(addr),
        }
    });
    if let Some(addr) = v4 {
        return Some(addr);
    }
    // reg-name may be empty, so the host rule always matches.
    Some(read_reg_name(cursor))
}

/// authority = [ userinfo "@" ] host [ ":" port ]
pub fn read_authority(cursor: &mut Cursor<'_>) -> Option<Authority> {
    cursor.attempt(|cursor| {
        let userinfo = cursor.attempt(|cursor| {
            let info = read_userinfo(cursor);
            cursor.eat(b'@').then_some(info)
        });
        let host = read_host(cursor)?;
        let port = cursor.attempt(|cursor| {
            cursor.eat(b':').then_some(())?;
            let digits = read_digit_run(cursor)?;
            digits.parse().ok()
        });
        Some(Authority {
            userinfo,
            host,
            port,
        })
    })
}

/// segment = *pchar
fn read_segment(cursor: &mut Cursor<'_>) -> String {
    let mut out = String::new();
    while read_pchar(cursor, &mut out).is_some() {}
    out
}

/// segment-nz = 1*pchar
fn read_segment_nz(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        let segment = read_segment(cursor);
        (!segment.is_empty()).then_some(segment)
    })
}

/// path-abempty = *( "/" segment )
fn read_path_abempty(cursor: &mut Cursor<'_>) -> String {
    let mut out = String::new();
    while cursor.eat(b'/') {
        out.push('/');
        out.push_str(&read_segment(cursor));
    }
    out
}

/// path-absolute = "/" [ segment-nz *( "/" segment ) ]
fn read_path_absolute(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        cursor.eat(b'/').then_some(())?;
        let mut out = String::from("/");
        if let Some(first) = read_segment_nz(cursor) {
            out.push_str(&first);
            out.push_str(&read_path_abempty(cursor));
        }
        Some(out)
    })
}

/// path-rootless = segment-nz *( "/" segment )
fn read_path_rootless(cursor: &mut Cursor<'_>) -> Option<String> {
    cursor.attempt(|cursor| {
        let mut out = read_segment_nz(cursor)?;
        out.push_str(&read_path_abempty(cursor));
        Some(out)
    })
}

/// hier-part = "//" authority path-abempty / path-absolute / path-rootless / path-empty
pub fn read_hier_part(cursor: &mut Cursor<'_>) -> Option<String> {
    let with_authority = cursor.attempt(|cursor| {
        cursor.eat_literal_ci("//").then_some(())?;
        let authority = read_authority(cursor)?;
        let path = read_path_abempty(cursor);
        let mut out = String::from("//");
        if let Some(info) = &authority.userinfo {
            out.push_str(info);
            out.push('@');
        }
        out.push_str(&authority.host);
        if let Some(port) = authority.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
        out.push_str(&path);
        Some(out)
    });
    if with_authority.is_some() {
        return with_authority;
    }
    if let Some(path) = read_path_absolute(cursor) {
        return Some(path);
    }
    if let Some(path) = read_path_rootless(cursor) {
        return Some(path);
    }
    // path-empty always matches.
    Some(String::new())
}

/// *( pchar / "/" / "?" ), shared by query and fragment.
fn read_query_or_fragment(cursor: &mut Cursor<'_>) -> String {
    let mut out = String::new();
    loop {
        if let Some(byte) = cursor.eat_if(|b| b == b'/' || b == b'?') {
            out.push(char::from(byte));
        } else if read_pchar(cursor, &mut out).is_none() {
            break;
        }
    }
    out
}

/// URI = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
pub fn read_uri(cursor: &mut Cursor<'_>) -> Option<Uri> {
    cursor.attempt(|cursor| {
        let scheme = read_scheme(cursor)?;
        cursor.eat(b':').then_some(())?;
        let hier_part = read_hier_part(cursor)?;
        let query = cursor.attempt(|cursor| {
            cursor.eat(b'?').then_some(())?;
            Some(read_query_or_fragment(cursor))
        });
        let fragment = cursor.attempt(|cursor| {
            cursor.eat(b'#').then_some(())?;
            Some(read_query_or_fragment(cursor))
        });
        Some(Uri {
            scheme,
            hier_part,
            query,
            fragment,
        })
    })
}

expect_rules! {
    /// URI, hard form.
    pub fn expect_uri(Uri) = read_uri, "URI";
    /// authority, hard form.
    pub fn expect_authority(Authority) = read_authority, "authority";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(input: &str) -> Uri {
        let mut cursor = Cursor::new(input.as_bytes());
        let uri = read_uri(&mut cursor).expect("should parse");
        assert!(cursor.is_eof(), "trailing input after {input:?}");
        uri
    }

    #[test]
    fn mailto_address() {
        let parsed = uri("mailto:jane@example.com");
        assert_eq!(parsed.scheme, "mailto");
        assert_eq!(parsed.hier_part, "jane@example.com");
        assert_eq!(parsed.query, None);
    }

    #[test]
    fn http_with_authority_and_query() {
        let parsed = uri("http://user@example.com:8080/a/b?x=1#frag");
        assert_eq!(parsed.scheme, "http");
        assert_eq!(parsed.hier_part, "//user@example.com:8080/a/b");
        assert_eq!(parsed.query.as_deref(), Some("x=1"));
        assert_eq!(parsed.fragment.as_deref(), Some("frag"));
    }

    #[test]
    fn display_round_trips() {
        let text = "http://example.com/p?q=1#f";
        assert_eq!(uri(text).to_string(), text);
    }

    #[test]
    fn ipv4_host() {
        let mut cursor = Cursor::new(b"192.168.0.1");
        assert_eq!(read_host(&mut cursor).as_deref(), Some("192.168.0.1"));
        assert!(cursor.is_eof());
    }

    #[test]
    fn dotted_name_is_reg_name_not_ipv4() {
        let mut cursor = Cursor::new(b"1.2.3.4.example.com");
        assert_eq!(
            read_host(&mut cursor).as_deref(),
            Some("1.2.3.4.example.com")
        );
    }

    #[test]
    fn dec_octet_bounds() {
        assert_eq!(
            read_dec_octet(&mut Cursor::new(b"255")).as_deref(),
            Some("255")
        );
        // 256 matches as "25" leaving "6".
        let mut cursor = Cursor::new(b"256");
        assert_eq!(read_dec_octet(&mut cursor).as_deref(), Some("25"));
        assert_eq!(cursor.peek(), Some(b'6'));
    }

    #[test]
    fn ipv6_full_and_compressed() {
        for addr in [
            "2001:db8:0:0:0:0:2:1",
            "2001:db8::2:1",
            "::1",
            "::",
            "fe80::1:2:3:4",
            "::ffff:192.0.2.1",
        ] {
            let mut cursor = Cursor::new(addr.as_bytes());
            let matched = read_ipv6_address(&mut cursor);
            assert_eq!(matched.as_deref(), Some(addr), "address {addr}");
            assert!(cursor.is_eof(), "trailing input for {addr}");
        }
    }

    #[test]
    fn ip_literal_host() {
        let parsed = uri("http://[2001:db8::1]:80/x");
        assert_eq!(parsed.hier_part, "//[2001:db8::1]:80/x");
    }

    #[test]
    fn scheme_must_start_with_alpha() {
        let mut cursor = Cursor::new(b"1http://x");
        assert_eq!(read_uri(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn pct_encoded_kept_verbatim() {
        let parsed = uri("http://example.com/a%20b");
        assert_eq!(parsed.hier_part, "//example.com/a%20b");
    }

    #[test]
    fn expect_uri_reports_position() {
        let mut cursor = Cursor::new(b"::notauri");
        let err = expect_uri(&mut cursor).unwrap_err();
        assert_eq!(err.position(), 0);
        assert_eq!(cursor.position(), 0);
    }
}
