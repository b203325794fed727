//! Depth-bounded boundary scanner.
//!
//! [`DepthScanner`] walks JSON text byte-by-byte, tracking just enough
//! structure (container nesting, object keys on the shallow levels, string
//! and escape state) to report where values begin and end. It accepts input
//! in arbitrarily-split chunks and, per feed, returns the [`Boundary`] events
//! that chunk produced, in document order.
//!
//! Only values at nesting depth at or above the configured bound are
//! reported; anything deeper is skipped with plain depth counting, which is
//! what keeps per-item bookkeeping O(1) relative to document size. The
//! scanner is not a validator: it rejects input only where it would otherwise
//! lose track of structure, and happily scans over things a JSON decoder
//! would refuse (`tru`, trailing commas).

use crate::{
    error::{ScanError, ScanErrorKind},
    path::{Path, PathComponent},
};

/// A notification that a JSON value starts or ends within the chunk most
/// recently fed to the scanner.
///
/// Every value at depth at most the scanner's bound produces exactly two
/// events: an opening boundary carrying the offset of its first byte, and a
/// closing boundary carrying the offset one past its last byte. Offsets are
/// relative to the chunk passed to [`DepthScanner::feed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    /// Location of the value relative to the document root.
    pub path: Path,
    /// Byte offset within the current chunk.
    pub offset: usize,
}

#[derive(Debug)]
enum Frame {
    /// `key` names the entry whose value is currently being scanned; `None`
    /// between entries, and always `None` for frames too deep to appear in
    /// an emitted path.
    Object { key: Option<String> },
    Array { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lex {
    /// Expecting the first byte of a value (also reached after `[` and `,`).
    BeforeValue,
    /// A value just completed; expecting `,`, a closing delimiter, or EOF.
    AfterValue,
    /// Inside an object, expecting a key or `}`.
    BeforeKey,
    InKey,
    KeyEscape,
    /// Key complete, expecting `:`.
    AfterKey,
    InString,
    StringEscape,
    /// Inside a number or a bare literal; runs until a delimiter byte.
    InScalar,
}

/// Incremental scanner reporting value boundaries down to a fixed depth.
///
/// # Examples
///
/// ```
/// use jsonpluck::{Boundary, DepthScanner, path};
///
/// let mut scanner = DepthScanner::new(1);
/// let events = scanner.feed(b"[1,2]").unwrap();
/// assert_eq!(
///     events,
///     vec![
///         Boundary { path: path![], offset: 0 },
///         Boundary { path: path![0], offset: 1 },
///         Boundary { path: path![0], offset: 2 },
///         Boundary { path: path![1], offset: 3 },
///         Boundary { path: path![1], offset: 4 },
///         Boundary { path: path![], offset: 5 },
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct DepthScanner {
    depth_bound: usize,
    lex: Lex,
    stack: Vec<Frame>,
    /// Raw (still escaped) bytes of the key being lexed; persists across
    /// chunk boundaries.
    key_buf: Vec<u8>,
    /// Whether `key_buf` is being filled for the current key. Keys on levels
    /// that can never appear in an emitted path are lexed but not retained.
    capture_key: bool,
    /// Bytes consumed by previous feeds, for absolute error positions.
    consumed: usize,
}

impl DepthScanner {
    /// Create a scanner reporting boundaries for values at depth at most
    /// `depth_bound` components from the document root.
    #[must_use]
    pub fn new(depth_bound: usize) -> Self {
        Self {
            depth_bound,
            lex: Lex::BeforeValue,
            stack: Vec::new(),
            key_buf: Vec::new(),
            capture_key: false,
            consumed: 0,
        }
    }

    /// Scan one chunk, returning the boundary events it produced in document
    /// order.
    ///
    /// Event offsets are relative to `chunk`. A scalar still open when the
    /// chunk ends produces its closing boundary in whichever later chunk
    /// carries its terminating delimiter; input that simply stops mid-value
    /// never errors at this layer.
    ///
    /// # Errors
    ///
    /// [`ScanError`] when the scanner cannot keep tracking structure: an
    /// impossible byte for the current construct, a mismatched or unbalanced
    /// closing delimiter, bytes after the root value, or an object key whose
    /// escapes or UTF-8 do not decode.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<Boundary>, ScanError> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < chunk.len() {
            let b = chunk[i];
            match self.lex {
                Lex::BeforeValue => match b {
                    b' ' | b'\t' | b'\n' | b'\r' => {}
                    b'{' => {
                        self.value_opens(&mut out, i);
                        self.stack.push(Frame::Object { key: None });
                        self.lex = Lex::BeforeKey;
                    }
                    b'[' => {
                        self.value_opens(&mut out, i);
                        self.stack.push(Frame::Array { index: 0 });
                    }
                    b'"' => {
                        self.value_opens(&mut out, i);
                        self.lex = Lex::InString;
                    }
                    b']' => self.close_container(&mut out, i, true)?,
                    b'-' | b'0'..=b'9' | b't' | b'f' | b'n' => {
                        self.value_opens(&mut out, i);
                        self.lex = Lex::InScalar;
                    }
                    _ => {
                        return Err(self.err_at(ScanErrorKind::InvalidCharacter(char::from(b)), i));
                    }
                },
                Lex::InScalar => match b {
                    b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}' => {
                        self.value_closes(&mut out, i);
                        self.lex = Lex::AfterValue;
                        // Reprocess the delimiter.
                        continue;
                    }
                    _ => {}
                },
                Lex::InString => match b {
                    b'"' => {
                        self.value_closes(&mut out, i + 1);
                        self.lex = Lex::AfterValue;
                    }
                    b'\\' => self.lex = Lex::StringEscape,
                    _ => {}
                },
                Lex::StringEscape => self.lex = Lex::InString,
                Lex::AfterValue => match b {
                    b' ' | b'\t' | b'\n' | b'\r' => {}
                    b',' => match self.stack.last() {
                        Some(Frame::Array { .. }) => self.lex = Lex::BeforeValue,
                        Some(Frame::Object { .. }) => self.lex = Lex::BeforeKey,
                        None => {
                            return Err(
                                self.err_at(ScanErrorKind::TrailingCharacter(char::from(b)), i)
                            );
                        }
                    },
                    b']' => self.close_container(&mut out, i, true)?,
                    b'}' => self.close_container(&mut out, i, false)?,
                    _ => {
                        let kind = if self.stack.is_empty() {
                            ScanErrorKind::TrailingCharacter(char::from(b))
                        } else {
                            ScanErrorKind::InvalidCharacter(char::from(b))
                        };
                        return Err(self.err_at(kind, i));
                    }
                },
                Lex::BeforeKey => match b {
                    b' ' | b'\t' | b'\n' | b'\r' => {}
                    b'"' => {
                        self.key_buf.clear();
                        self.capture_key = self.stack.len() <= self.depth_bound;
                        self.lex = Lex::InKey;
                    }
                    b'}' => self.close_container(&mut out, i, false)?,
                    _ => {
                        return Err(self.err_at(ScanErrorKind::InvalidCharacter(char::from(b)), i));
                    }
                },
                Lex::InKey => match b {
                    b'"' => {
                        if self.capture_key {
                            let key = unescape_key(&self.key_buf)
                                .map_err(|kind| self.err_at(kind, i))?;
                            match self.stack.last_mut() {
                                Some(Frame::Object { key: slot }) => *slot = Some(key),
                                _ => unreachable!("key lexed outside an object"),
                            }
                        }
                        self.lex = Lex::AfterKey;
                    }
                    b'\\' => {
                        if self.capture_key {
                            self.key_buf.push(b);
                        }
                        self.lex = Lex::KeyEscape;
                    }
                    _ => {
                        if self.capture_key {
                            self.key_buf.push(b);
                        }
                    }
                },
                Lex::KeyEscape => {
                    if self.capture_key {
                        self.key_buf.push(b);
                    }
                    self.lex = Lex::InKey;
                }
                Lex::AfterKey => match b {
                    b' ' | b'\t' | b'\n' | b'\r' => {}
                    b':' => self.lex = Lex::BeforeValue,
                    _ => {
                        return Err(self.err_at(ScanErrorKind::InvalidCharacter(char::from(b)), i));
                    }
                },
            }
            i += 1;
        }
        self.consumed += chunk.len();
        Ok(out)
    }

    /// A value starts at `offset`, at depth `stack.len()`.
    fn value_opens(&mut self, out: &mut Vec<Boundary>, offset: usize) {
        if self.stack.len() <= self.depth_bound {
            out.push(Boundary {
                path: self.current_path(),
                offset,
            });
        }
    }

    /// A scalar or string value ends exclusively at `end`.
    fn value_closes(&mut self, out: &mut Vec<Boundary>, end: usize) {
        if self.stack.len() <= self.depth_bound {
            out.push(Boundary {
                path: self.current_path(),
                offset: end,
            });
        }
        self.entry_done();
    }

    /// A `]` or `}` at `offset` closes the innermost container.
    fn close_container(
        &mut self,
        out: &mut Vec<Boundary>,
        offset: usize,
        is_array: bool,
    ) -> Result<(), ScanError> {
        let delimiter = if is_array { ']' } else { '}' };
        match self.stack.pop() {
            Some(Frame::Array { .. }) if is_array => {}
            Some(Frame::Object { .. }) if !is_array => {}
            _ => return Err(self.err_at(ScanErrorKind::MismatchedClose(delimiter), offset)),
        }
        if self.stack.len() <= self.depth_bound {
            out.push(Boundary {
                path: self.current_path(),
                offset: offset + 1,
            });
        }
        self.entry_done();
        self.lex = Lex::AfterValue;
        Ok(())
    }

    /// Advance the enclosing container past the entry that just completed.
    fn entry_done(&mut self) {
        match self.stack.last_mut() {
            Some(Frame::Array { index }) => *index += 1,
            Some(Frame::Object { key }) => *key = None,
            None => {}
        }
    }

    /// Path of the value currently being scanned. Only called at depths
    /// within the bound, where every enclosing frame has its component set.
    fn current_path(&self) -> Path {
        self.stack
            .iter()
            .map(|frame| match frame {
                Frame::Array { index } => PathComponent::Index(*index),
                Frame::Object { key: Some(key) } => PathComponent::Key(key.clone()),
                Frame::Object { key: None } => {
                    unreachable!("object frame without a current key")
                }
            })
            .collect()
    }

    fn err_at(&self, kind: ScanErrorKind, offset: usize) -> ScanError {
        ScanError {
            kind,
            position: self.consumed + offset,
        }
    }
}

/// Decode the raw bytes of an object key, resolving JSON escapes.
fn unescape_key(raw: &[u8]) -> Result<String, ScanErrorKind> {
    if !raw.contains(&b'\\') {
        return std::str::from_utf8(raw)
            .map(ToString::to_string)
            .map_err(|_| ScanErrorKind::InvalidKeyUtf8);
    }
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] != b'\\' {
            out.push(raw[i]);
            i += 1;
            continue;
        }
        let Some(&esc) = raw.get(i + 1) else {
            return Err(ScanErrorKind::InvalidEscapeChar('\\'));
        };
        i += 2;
        match esc {
            b'"' | b'\\' | b'/' => out.push(esc),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'u' => {
                let hi = hex4(raw, i)?;
                i += 4;
                let scalar = if (0xD800..0xDC00).contains(&hi) {
                    // High surrogate: the low half must follow immediately.
                    if raw.get(i) != Some(&b'\\') || raw.get(i + 1) != Some(&b'u') {
                        return Err(ScanErrorKind::InvalidUnicodeEscape(hi));
                    }
                    let lo = hex4(raw, i + 2)?;
                    if !(0xDC00..0xE000).contains(&lo) {
                        return Err(ScanErrorKind::InvalidUnicodeEscape(lo));
                    }
                    i += 6;
                    0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
                } else {
                    hi
                };
                let ch =
                    char::from_u32(scalar).ok_or(ScanErrorKind::InvalidUnicodeEscape(scalar))?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            other => return Err(ScanErrorKind::InvalidEscapeChar(char::from(other))),
        }
    }
    String::from_utf8(out).map_err(|_| ScanErrorKind::InvalidKeyUtf8)
}

fn hex4(raw: &[u8], at: usize) -> Result<u32, ScanErrorKind> {
    let digits = raw
        .get(at..at + 4)
        .ok_or(ScanErrorKind::TruncatedUnicodeEscape)?;
    let mut value = 0u32;
    for &d in digits {
        let nibble = match d {
            b'0'..=b'9' => u32::from(d - b'0'),
            b'a'..=b'f' => u32::from(d - b'a') + 10,
            b'A'..=b'F' => u32::from(d - b'A') + 10,
            _ => return Err(ScanErrorKind::InvalidCharacter(char::from(d))),
        };
        value = (value << 4) | nibble;
    }
    Ok(value)
}
