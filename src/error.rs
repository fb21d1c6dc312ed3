//! Parse error taxonomy and source-position diagnostics.

/// Error produced when a mandatory grammar production fails to match.
///
/// All variants carry the byte offset at which the failure was detected.
/// Alternation failures never surface as errors: `read_*` rules swallow them
/// and rewind. Only the `expect_*` call chain converts a dead end into one of
/// these.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ParserError {
    /// Generic grammar mismatch: the named production did not match.
    #[error("offset {position}: expected {expected}")]
    Syntax { position: usize, expected: String },
    /// A literal token was required and something else was found.
    #[error("offset {position}: expected token \"{token}\"")]
    UnexpectedToken { position: usize, token: String },
    /// A `KEY:VALUE` marker line (BEGIN/END) was required and not found.
    #[error("offset {position}: expected \"{key}:{value}\" line")]
    KeyValuePairExpected {
        position: usize,
        key: String,
        value: String,
    },
    /// An INTEGER value had valid digit syntax but does not fit in `i32`.
    #[error("offset {position}: integer value out of range")]
    IntegerOverflow { position: usize },
}

impl ParserError {
    /// The byte offset the error points at.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            ParserError::Syntax { position, .. }
            | ParserError::UnexpectedToken { position, .. }
            | ParserError::KeyValuePairExpected { position, .. }
            | ParserError::IntegerOverflow { position } => *position,
        }
    }

    /// Resolve this error's offset to a line/column pair within `input`.
    #[must_use]
    pub fn locate(&self, input: &[u8]) -> Position {
        Position::locate(input, self.position())
    }
}

/// Human-oriented source location, 1-based.
///
/// Computed on demand by scanning the input from the start and counting line
/// terminators (CRLF, lone CR, lone LF), matching the terminators the grammar
/// itself accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("line {line}, column {column}")]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Map a byte offset to a line/column position.
    ///
    /// Offsets past the end of input resolve to one past the last byte.
    #[must_use]
    pub fn locate(input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let mut line = 1;
        let mut column = 1;
        let mut i = 0;
        while i < offset {
            match input[i] {
                b'\r' => {
                    if input.get(i + 1) == Some(&b'\n') && i + 1 < offset {
                        i += 1;
                    }
                    line += 1;
                    column = 1;
                }
                b'\n' => {
                    line += 1;
                    column = 1;
                }
                _ => column += 1,
            }
            i += 1;
        }
        Position { line, column }
    }
}
