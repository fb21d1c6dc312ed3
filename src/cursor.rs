//! Byte cursor with transactional rewind.
//!
//! Every grammar rule in this crate runs over a single shared [`Cursor`].
//! A rule that fails must leave the cursor exactly where it found it, so
//! alternation (`A / B / C`) can retry the next branch from the same spot.
//! [`Cursor::attempt`] packages that discipline: it marks the position,
//! runs a closure, and rewinds unconditionally when the closure returns
//! `None`. Rules built on it cannot leak partial consumption through an
//! early `?` return.

use crate::error::ParserError;

/// A saved input position, handed out by [`Cursor::mark`] and consumed by
/// [`Cursor::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Read cursor over a finite byte slice.
///
/// The cursor tracks a byte offset into the input. ASCII rules consume one
/// byte at a time; non-ASCII content is consumed through the UTF-8 sequence
/// grammar in [`crate::grammar::utf8`], which advances over complete
/// multi-byte sequences only.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub fn new(input: &'a [u8]) -> Self {
        Cursor { input, pos: 0 }
    }

    /// Current byte offset from the start of input.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The full input slice this cursor was created over.
    #[inline]
    #[must_use]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    #[inline]
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Look at the next byte without consuming it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Look `n` bytes past the current position without consuming.
    #[inline]
    #[must_use]
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.input.get(self.pos + n).copied()
    }

    /// Consume and return the next byte.
    #[inline]
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Consume the next byte if it equals `byte`.
    #[inline]
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the next byte if `pred` accepts it.
    #[inline]
    pub fn eat_if(&mut self, pred: impl Fn(u8) -> bool) -> Option<u8> {
        match self.peek() {
            Some(byte) if pred(byte) => {
                self.pos += 1;
                Some(byte)
            }
            _ => None,
        }
    }

    /// Consume an exact ASCII literal, ignoring case.
    ///
    /// RFC 5545 §2 keywords (property names, parameter names, enumerated
    /// values) are case-insensitive; the rest of the grammar matches bytes
    /// exactly. Rewinds nothing itself: callers run it inside
    /// [`Cursor::attempt`].
    pub fn eat_literal_ci(&mut self, literal: &str) -> bool {
        let bytes = literal.as_bytes();
        let end = self.pos + bytes.len();
        if end > self.input.len() {
            return false;
        }
        if self.input[self.pos..end].eq_ignore_ascii_case(bytes) {
            self.pos = end;
            true
        } else {
            false
        }
    }

    /// Capture the current position.
    #[inline]
    #[must_use]
    pub fn mark(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Restore a previously captured position, unconditionally.
    #[inline]
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.0;
    }

    /// The bytes consumed since `checkpoint`.
    #[inline]
    #[must_use]
    pub fn slice_since(&self, checkpoint: Checkpoint) -> &'a [u8] {
        &self.input[checkpoint.0..self.pos]
    }

    /// Run `rule` transactionally: on `None` the cursor is rewound to where
    /// it was before the call, on `Some` the consumed span is committed.
    ///
    /// This is the single mechanism behind the crate-wide invariant that a
    /// failed rule never moves the cursor.
    #[inline]
    pub fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let mark = self.mark();
        let out = rule(self);
        if out.is_none() {
            self.rewind(mark);
        }
        out
    }

    /// Zero-or-more repetition of `rule`, collecting results.
    ///
    /// Never fails; stops at the first non-match. Each iteration runs under
    /// [`Cursor::attempt`], so a trailing partial match is rolled back.
    pub fn repeat<T>(&mut self, mut rule: impl FnMut(&mut Self) -> Option<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Some(item) = self.attempt(&mut rule) {
            out.push(item);
        }
        out
    }

    /// One-or-more repetition of `rule`.
    pub fn repeat1<T>(&mut self, mut rule: impl FnMut(&mut Self) -> Option<T>) -> Option<Vec<T>> {
        self.attempt(|cursor| {
            let first = rule(cursor)?;
            let mut out = vec![first];
            while let Some(item) = cursor.attempt(&mut rule) {
                out.push(item);
            }
            Some(out)
        })
    }

    /// Build a "expected X at offset" error at the current position.
    #[must_use]
    pub fn syntax_error(&self, expected: impl Into<String>) -> ParserError {
        ParserError::Syntax {
            position: self.pos,
            expected: expected.into(),
        }
    }
}

/// Generate `expect_*` adapters for `read_*` rules.
///
/// Every grammar rule has a non-throwing `read_X -> Option<T>` primary form;
/// this macro derives the hard-failure twin that maps `None` to
/// [`ParserError::Syntax`] at the current cursor position. The two forms are
/// equivalent by construction: same rule body, same post-match position.
macro_rules! expect_rules {
    ($($(#[$meta:meta])* $vis:vis fn $expect:ident ($ty:ty) = $read:path, $what:literal;)+) => {$(
        $(#[$meta])*
        ///
        /// # Errors
        /// Fails with [`crate::error::ParserError::Syntax`] when the
        /// production does not match at the current position.
        $vis fn $expect(
            cursor: &mut $crate::cursor::Cursor<'_>,
        ) -> Result<$ty, $crate::error::ParserError> {
            $read(cursor).ok_or_else(|| cursor.syntax_error($what))
        }
    )+};
}
pub(crate) use expect_rules;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let cursor = Cursor::new(b"ab");
        assert_eq!(cursor.peek(), Some(b'a'));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn advance_consumes_one_byte() {
        let mut cursor = Cursor::new(b"ab");
        assert_eq!(cursor.advance(), Some(b'a'));
        assert_eq!(cursor.advance(), Some(b'b'));
        assert_eq!(cursor.advance(), None);
        assert!(cursor.is_eof());
    }

    #[test]
    fn rewind_restores_position() {
        let mut cursor = Cursor::new(b"abc");
        let mark = cursor.mark();
        cursor.advance();
        cursor.advance();
        cursor.rewind(mark);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.peek(), Some(b'a'));
    }

    #[test]
    fn attempt_rewinds_on_failure() {
        let mut cursor = Cursor::new(b"abc");
        let out: Option<()> = cursor.attempt(|cursor| {
            cursor.advance();
            cursor.advance();
            None
        });
        assert_eq!(out, None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn attempt_commits_on_success() {
        let mut cursor = Cursor::new(b"abc");
        let out = cursor.attempt(|cursor| cursor.advance());
        assert_eq!(out, Some(b'a'));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn rewind_after_intermediate_success() {
        // Committed sub-reads inside a failing outer rule must still roll back.
        let mut cursor = Cursor::new(b"abc");
        let out: Option<()> = cursor.attempt(|cursor| {
            let inner = cursor.attempt(|cursor| cursor.advance());
            assert_eq!(inner, Some(b'a'));
            None
        });
        assert_eq!(out, None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn literal_ci_matches_any_case() {
        let mut cursor = Cursor::new(b"VeRsIoN:2.0");
        assert!(cursor.eat_literal_ci("VERSION"));
        assert_eq!(cursor.peek(), Some(b':'));
    }

    #[test]
    fn literal_ci_rejects_truncated_input() {
        let mut cursor = Cursor::new(b"VER");
        assert!(!cursor.eat_literal_ci("VERSION"));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn repeat_stops_without_consuming_trailing_garbage() {
        let mut cursor = Cursor::new(b"aaab");
        let matched = cursor.repeat(|cursor| cursor.eat_if(|b| b == b'a'));
        assert_eq!(matched.len(), 3);
        assert_eq!(cursor.peek(), Some(b'b'));
    }

    #[test]
    fn repeat1_requires_one_match() {
        let mut cursor = Cursor::new(b"bbb");
        assert_eq!(cursor.repeat1(|cursor| cursor.eat_if(|b| b == b'a')), None);
        assert_eq!(cursor.position(), 0);
    }
}
