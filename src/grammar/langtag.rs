//! Language-tag syntax (RFC 5646 §2.1), for the LANGUAGE parameter.
//!
//! ```text
//! Language-Tag = langtag / privateuse / grandfathered
//! langtag      = language ["-" script] ["-" region] *("-" variant)
//!                *("-" extension) ["-" privateuse]
//! ```
//!
//! Rules here only consume; the matched tag is returned as its source text.
//! Every subtag ends at a non-alphanumeric boundary, which is what keeps the
//! greedy alternatives (script vs. variant vs. extension) from stealing
//! bytes from each other.

use crate::cursor::{Cursor, expect_rules};
use crate::grammar::abnf::{is_alpha, is_alphanum, is_digit};

/// Irregular grandfathered tags (RFC 5646 §2.2.8). The regular ones all
/// match the `langtag` production and need no table.
static IRREGULAR: phf::Set<&'static str> = phf::phf_set! {
    "en-gb-oed", "i-ami", "i-bnn", "i-default", "i-enochian", "i-hak",
    "i-klingon", "i-lux", "i-mingo", "i-navajo", "i-pwn", "i-tao",
    "i-tay", "i-tsu", "sgn-be-fr", "sgn-be-nl", "sgn-ch-de",
};

/// Consume between `min` and `max` bytes accepted by `pred`, requiring a
/// subtag boundary (next byte not alphanumeric) afterwards.
fn eat_subtag(cursor: &mut Cursor<'_>, min: usize, max: usize, pred: fn(u8) -> bool) -> Option<usize> {
    cursor.attempt(|cursor| {
        let mut len = 0;
        while len < max && cursor.eat_if(pred).is_some() {
            len += 1;
        }
        if len < min {
            return None;
        }
        match cursor.peek() {
            Some(byte) if is_alphanum(byte) => None,
            _ => Some(len),
        }
    })
}

/// extlang = 3ALPHA *2("-" 3ALPHA)
fn eat_extlang(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.attempt(|cursor| {
        cursor.eat(b'-').then_some(())?;
        eat_subtag(cursor, 3, 3, is_alpha)?;
        for _ in 0..2 {
            let more = cursor.attempt(|cursor| {
                cursor.eat(b'-').then_some(())?;
                eat_subtag(cursor, 3, 3, is_alpha)
            });
            if more.is_none() {
                break;
            }
        }
        Some(())
    })
}

/// language = 2*3ALPHA ["-" extlang] / 4ALPHA / 5*8ALPHA
fn eat_language(cursor: &mut Cursor<'_>) -> Option<()> {
    let len = eat_subtag(cursor, 2, 8, is_alpha)?;
    if len <= 3 {
        let _unused = eat_extlang(cursor);
    }
    Some(())
}

/// script = 4ALPHA
fn eat_script(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.attempt(|cursor| {
        cursor.eat(b'-').then_some(())?;
        eat_subtag(cursor, 4, 4, is_alpha).map(|_| ())
    })
}

/// region = 2ALPHA / 3DIGIT
fn eat_region(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.attempt(|cursor| {
        cursor.eat(b'-').then_some(())?;
        eat_subtag(cursor, 2, 2, is_alpha)
            .or_else(|| eat_subtag(cursor, 3, 3, is_digit))
            .map(|_| ())
    })
}

/// variant = 5*8alphanum / (DIGIT 3alphanum)
fn eat_variant(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.attempt(|cursor| {
        cursor.eat(b'-').then_some(())?;
        if eat_subtag(cursor, 5, 8, is_alphanum).is_some() {
            return Some(());
        }
        cursor.attempt(|cursor| {
            cursor.eat_if(is_digit)?;
            eat_subtag(cursor, 3, 3, is_alphanum).map(|_| ())
        })
    })
}

/// singleton = DIGIT / ALPHA except "x"
fn is_singleton(byte: u8) -> bool {
    is_alphanum(byte) && byte != b'x' && byte != b'X'
}

/// extension = singleton 1*("-" (2*8alphanum))
fn eat_extension(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.attempt(|cursor| {
        cursor.eat(b'-').then_some(())?;
        cursor.eat_if(is_singleton)?;
        // The singleton itself must sit on a subtag boundary.
        if cursor.peek().is_some_and(is_alphanum) {
            return None;
        }
        let mut count = 0;
        loop {
            let more = cursor.attempt(|cursor| {
                cursor.eat(b'-').then_some(())?;
                eat_subtag(cursor, 2, 8, is_alphanum)
            });
            if more.is_none() {
                break;
            }
            count += 1;
        }
        (count >= 1).then_some(())
    })
}

/// privateuse = "x" 1*("-" (1*8alphanum))
fn eat_privateuse(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.attempt(|cursor| {
        cursor.eat_if(|b| b == b'x' || b == b'X')?;
        if cursor.peek().is_some_and(is_alphanum) {
            return None;
        }
        let mut count = 0;
        loop {
            let more = cursor.attempt(|cursor| {
                cursor.eat(b'-').then_some(())?;
                eat_subtag(cursor, 1, 8, is_alphanum)
            });
            if more.is_none() {
                break;
            }
            count += 1;
        }
        (count >= 1).then_some(())
    })
}

fn eat_langtag(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.attempt(|cursor| {
        eat_language(cursor)?;
        let _unused = eat_script(cursor);
        let _unused = eat_region(cursor);
        while eat_variant(cursor).is_some() {}
        while eat_extension(cursor).is_some() {}
        let _unused = cursor.attempt(|cursor| {
            cursor.eat(b'-').then_some(())?;
            eat_privateuse(cursor)
        });
        Some(())
    })
}

/// Grandfathered irregular tags, matched as a whole run against the table.
fn eat_irregular(cursor: &mut Cursor<'_>) -> Option<()> {
    cursor.attempt(|cursor| {
        let mark = cursor.mark();
        while cursor.eat_if(|b| is_alphanum(b) || b == b'-').is_some() {}
        let run = String::from_utf8_lossy(cursor.slice_since(mark)).to_ascii_lowercase();
        IRREGULAR.contains(run.as_str()).then_some(())
    })
}

/// Language-Tag = langtag / privateuse / grandfathered
///
/// Irregular grandfathered tags are tried first: they are full-tag matches
/// that the `langtag` production would otherwise consume a prefix of.
pub fn read_language_tag(cursor: &mut Cursor<'_>) -> Option<String> {
    let mark = cursor.mark();
    if eat_irregular(cursor).is_some()
        || eat_langtag(cursor).is_some()
        || eat_privateuse(cursor).is_some()
    {
        Some(String::from_utf8_lossy(cursor.slice_since(mark)).into_owned())
    } else {
        None
    }
}

expect_rules! {
    /// Language-Tag, hard form.
    pub fn expect_language_tag(String) = read_language_tag, "language tag";
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tag(input: &str) -> Option<(String, usize)> {
        let mut cursor = Cursor::new(input.as_bytes());
        read_language_tag(&mut cursor).map(|t| (t, cursor.position()))
    }

    #[rstest]
    #[case("en")]
    #[case("en-US")]
    #[case("zh-Hant")]
    #[case("zh-cmn-Hans-CN")]
    #[case("sl-rozaj")]
    #[case("de-CH-1901")]
    #[case("en-a-bbb-x-a-b")]
    #[case("x-private")]
    #[case("i-klingon")]
    #[case("en-GB-oed")]
    #[case("hy-Latn-IT-arevela")]
    fn accepts_valid_tags(#[case] input: &str) {
        let (matched, consumed) = tag(input).unwrap_or_else(|| panic!("{input} should match"));
        assert_eq!(matched, input);
        assert_eq!(consumed, input.len());
    }

    #[test]
    fn stops_at_parameter_delimiter() {
        assert_eq!(tag("en-US;x=1"), Some(("en-US".into(), 5)));
        assert_eq!(tag("fr,de"), Some(("fr".into(), 2)));
    }

    #[test]
    fn rejects_single_letter() {
        let mut cursor = Cursor::new(b"a");
        assert_eq!(read_language_tag(&mut cursor), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn rejects_overlong_primary_subtag() {
        assert_eq!(tag("abcdefghi"), None);
    }

    #[test]
    fn private_use_needs_subtag() {
        assert_eq!(tag("x-"), None);
        assert_eq!(tag("x"), None);
    }
}
