//! Error types surfaced by the extractor and its boundary scanner.
//!
//! There is no retry policy anywhere in this crate: every failure is a
//! structural or data error, reported once and terminal.

use thiserror::Error;

/// A construction-time configuration failure.
///
/// Returned by [`ArrayExtractor::new`](crate::ArrayExtractor::new) when the
/// target path cannot be normalized. Fatal; never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A dotted target path contained an empty component, e.g. `"a..b"` or a
    /// leading/trailing dot.
    #[error("target path {path:?} contains an empty component")]
    EmptyPathComponent {
        /// The dotted string as supplied by the caller.
        path: String,
    },
}

/// Malformed JSON encountered while scanning for value boundaries.
///
/// Carries the absolute byte position within the input stream at which
/// scanning stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte {position}")]
pub struct ScanError {
    /// What went wrong.
    pub kind: ScanErrorKind,
    /// Absolute byte offset from the start of the stream.
    pub position: usize,
}

/// The varieties of [`ScanError`].
///
/// The scanner validates only what it needs to keep tracking structure, so
/// these cover structural impossibilities rather than full JSON conformance;
/// a misspelled literal like `tru` passes the scanner and fails decoding
/// instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// A byte that cannot start or continue the construct expected here.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// A non-whitespace byte after the root value completed.
    #[error("unexpected character '{0}' after the root value")]
    TrailingCharacter(char),
    /// A `]` closing an object, a `}` closing an array, or a close with no
    /// container open.
    #[error("mismatched closing delimiter '{0}'")]
    MismatchedClose(char),
    /// An object key contained a `\` escape the scanner does not recognize.
    #[error("invalid escape character '{0}' in object key")]
    InvalidEscapeChar(char),
    /// A `\u` escape in an object key named an invalid code point, or paired
    /// surrogates incorrectly.
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscape(u32),
    /// An object key ended in the middle of a `\u` escape.
    #[error("truncated unicode escape in object key")]
    TruncatedUnicodeEscape,
    /// An object key did not decode to valid UTF-8.
    #[error("object key is not valid UTF-8")]
    InvalidKeyUtf8,
}

/// Any failure surfaced by [`feed`](crate::ArrayExtractor::feed) or
/// [`finish`](crate::ArrayExtractor::finish).
///
/// The first error poisons the extractor; later calls are rejected with
/// [`ExtractError::InputAfterEnd`].
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The target path could not be normalized.
    #[error("invalid target path: {0}")]
    Config(#[from] ConfigError),
    /// The input is not well-formed enough to locate value boundaries.
    #[error("malformed JSON: {0}")]
    Scan(#[from] ScanError),
    /// An assembled item (or the remainder) failed to decode as a JSON value.
    #[error("extracted bytes are not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    /// Input arrived after the extractor stopped accepting it: extraction
    /// ended early with remainder retention disabled, or a previous error was
    /// already reported.
    #[error("input not accepted after extraction ended")]
    InputAfterEnd,
}
