//! The item-boundary reconstruction engine.
//!
//! [`ArrayExtractor`] consumes boundary events from the depth scanner and
//! turns them into discrete emitted items, a determination of when the
//! target array has been fully consumed, and (optionally) a reconstruction
//! of the surrounding document with the array's contents elided.
//!
//! Processing is single-threaded and synchronous: each [`feed`] scans one
//! chunk, consumes every boundary event that chunk produced, and returns the
//! items it completed. Memory is bounded by the largest single in-flight
//! item plus, only when remainder retention is enabled, the rest of the
//! document.
//!
//! [`feed`]: ArrayExtractor::feed

use std::fmt;
use std::mem;

use bstr::BStr;
use bytes::Bytes;
use serde_json::Value;

use crate::{
    backlog::Backlog,
    error::{ConfigError, ExtractError},
    options::ExtractorOptions,
    path::{Path, is_first_array_element},
    scanner::{Boundary, DepthScanner},
};

/// One extracted array element, or the reconstructed remainder.
#[derive(Clone, PartialEq)]
pub enum Item {
    /// A decoded value (`parse_items` enabled).
    Parsed(Value),
    /// The exact bytes of the value as they appeared in the input.
    Raw(Bytes),
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(value) => f.debug_tuple("Parsed").field(value).finish(),
            Self::Raw(bytes) => f.debug_tuple("Raw").field(&BStr::new(bytes)).finish(),
        }
    }
}

/// Why extraction stopped consuming the target array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The target array's own closing boundary was seen: every element has
    /// been emitted.
    Exhausted,
    /// A boundary occurred at an unexpected depth while inside the array:
    /// the enclosing structure closed before (or without) the target array
    /// being what the path pointed at.
    DepthMismatch,
}

/// Externally observable progress of extraction. Advances monotonically and
/// never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionState {
    /// No boundary matching the start of the target array has been seen.
    NotStarted,
    /// Confirmed inside the target array.
    InArray,
    /// The array has been fully consumed; terminal. No further items are
    /// ever emitted, regardless of subsequent boundary events.
    Ended(EndReason),
    /// A scan or decode error was reported; terminal.
    Failed,
}

/// Internal phase. `MidItem` owns the backlog, so an in-flight item cannot
/// outlive the state that is accumulating it.
#[derive(Debug)]
enum Phase {
    Searching,
    Between,
    MidItem(Backlog),
    Ended(EndReason),
    Failed,
}

/// Streaming extractor for the elements of one array inside a JSON document.
///
/// Feed the document's bytes in chunks of any size and split; each completed
/// element of the target array is returned as soon as its closing boundary
/// has been received. See the crate docs for a walkthrough.
#[derive(Debug)]
pub struct ArrayExtractor {
    scanner: DepthScanner,
    target: Path,
    /// `target.len() + 1`: the path length at which elements appear.
    depth: usize,
    parse_items: bool,
    retain_remainder: bool,
    phase: Phase,
    remainder: Vec<Bytes>,
}

impl ArrayExtractor {
    /// Create an extractor from `options`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if the target path cannot be normalized.
    pub fn new(options: ExtractorOptions) -> Result<Self, ConfigError> {
        let ExtractorOptions {
            target_path,
            parse_items,
            retain_remainder,
        } = options;
        let target = target_path.normalize()?;
        let depth = target.len() + 1;
        Ok(Self {
            scanner: DepthScanner::new(depth),
            target,
            depth,
            parse_items,
            retain_remainder,
            phase: Phase::Searching,
            remainder: Vec::new(),
        })
    }

    /// Process one chunk of input, returning the items it completed in
    /// document order.
    ///
    /// The chunk may split the document anywhere, including mid-token; an
    /// item whose bytes span several chunks is emitted by the feed that
    /// carries its closing boundary.
    ///
    /// # Errors
    ///
    /// [`ExtractError::Scan`] on malformed input, [`ExtractError::Decode`]
    /// when an assembled item fails to decode (`parse_items` enabled), and
    /// [`ExtractError::InputAfterEnd`] when the extractor no longer accepts
    /// input, because extraction ended early with `retain_remainder` disabled, or a
    /// previous error was reported. The first scan or decode error aborts
    /// the call and poisons the extractor; items returned by earlier calls
    /// remain valid.
    pub fn feed(&mut self, chunk: impl Into<Bytes>) -> Result<Vec<Item>, ExtractError> {
        if !self.wants_input() {
            return Err(ExtractError::InputAfterEnd);
        }
        let chunk = chunk.into();
        let ended_at_entry = matches!(self.phase, Phase::Ended(_));

        let boundaries = match self.scanner.feed(&chunk) {
            Ok(boundaries) => boundaries,
            Err(e) => {
                self.phase = Phase::Failed;
                return Err(e.into());
            }
        };

        let mut items = Vec::new();
        for boundary in boundaries {
            if let Err(e) = self.on_boundary(boundary, &chunk, &mut items) {
                self.phase = Phase::Failed;
                return Err(e);
            }
        }
        self.claim_chunk(chunk, ended_at_entry);
        Ok(items)
    }

    /// Signal end of input and finalize the remainder.
    ///
    /// Returns `None` unless `retain_remainder` is enabled. With it, the
    /// result is `None` exactly when zero input bytes were ever fed;
    /// otherwise it is the document with the target array's contents elided
    /// (the entire input verbatim if the array was never found), decoded
    /// when `parse_items` is enabled. An item still open when input ends is
    /// discarded: no partial item is ever delivered.
    ///
    /// # Errors
    ///
    /// [`ExtractError::Decode`] if the remainder fails to decode, and
    /// [`ExtractError::InputAfterEnd`] if a previous error already poisoned
    /// the extractor.
    pub fn finish(self) -> Result<Option<Item>, ExtractError> {
        if matches!(self.phase, Phase::Failed) {
            return Err(ExtractError::InputAfterEnd);
        }
        if !self.retain_remainder {
            return Ok(None);
        }
        let mut fragments = self.remainder;
        let total: usize = fragments.iter().map(Bytes::len).sum();
        if total == 0 {
            return Ok(None);
        }
        let bytes = if fragments.len() == 1 {
            fragments.remove(0)
        } else {
            let mut buf = Vec::with_capacity(total);
            for fragment in &fragments {
                buf.extend_from_slice(fragment);
            }
            Bytes::from(buf)
        };
        make_item(self.parse_items, bytes).map(Some)
    }

    /// The externally observable extraction state.
    #[must_use]
    pub fn state(&self) -> ExtractionState {
        match self.phase {
            Phase::Searching => ExtractionState::NotStarted,
            Phase::Between | Phase::MidItem(_) => ExtractionState::InArray,
            Phase::Ended(reason) => ExtractionState::Ended(reason),
            Phase::Failed => ExtractionState::Failed,
        }
    }

    /// Whether the extractor still accepts input.
    ///
    /// Goes `false` once extraction ended early with `retain_remainder`
    /// disabled (nothing further can affect the output) or after a terminal
    /// error. [`feed`](Self::feed) rejects input past that point with
    /// [`ExtractError::InputAfterEnd`]; a well-behaved producer checks here
    /// first and stops sending.
    #[must_use]
    pub fn wants_input(&self) -> bool {
        match self.phase {
            Phase::Failed => false,
            Phase::Ended(_) => self.retain_remainder,
            Phase::Searching | Phase::Between | Phase::MidItem(_) => true,
        }
    }

    fn on_boundary(
        &mut self,
        boundary: Boundary,
        chunk: &Bytes,
        items: &mut Vec<Item>,
    ) -> Result<(), ExtractError> {
        // Terminal phases ignore every further event.
        if matches!(self.phase, Phase::Ended(_) | Phase::Failed) {
            return Ok(());
        }

        if matches!(self.phase, Phase::Searching) {
            if !is_first_array_element(&boundary.path, &self.target) {
                // Some other value at the same depth; not our array.
                return Ok(());
            }
            // First true match: everything before this offset surrounds the
            // array, and the synthetic `]` closes the bracket those bytes
            // opened. The same event is the first element's opening boundary.
            self.keep_remainder(chunk.slice(..boundary.offset));
            self.keep_remainder(Bytes::from_static(b"]"));
            self.phase = Phase::MidItem(Backlog::open(boundary.offset));
            return Ok(());
        }

        if boundary.path.len() != self.depth {
            // The array's own close surfacing one level up, or the enclosing
            // structure closing without this ever being the target array.
            // Either way the array is done.
            let reason = if boundary.path == self.target {
                EndReason::Exhausted
            } else {
                EndReason::DepthMismatch
            };
            self.keep_remainder(chunk.slice(boundary.offset..));
            self.phase = Phase::Ended(reason);
            return Ok(());
        }

        // Inside the array at element depth: boundaries alternate between
        // item start and item end.
        match mem::replace(&mut self.phase, Phase::Between) {
            Phase::Between => self.phase = Phase::MidItem(Backlog::open(boundary.offset)),
            Phase::MidItem(backlog) => {
                let bytes = backlog.complete(chunk, boundary.offset);
                items.push(make_item(self.parse_items, bytes)?);
            }
            Phase::Searching | Phase::Ended(_) | Phase::Failed => {
                unreachable!("boundary dispatched in a non-array phase")
            }
        }
        Ok(())
    }

    /// Post-chunk bookkeeping: an open backlog claims the chunk; otherwise a
    /// chunk processed entirely before the array started, or entirely after
    /// extraction ended, belongs to the remainder. Bytes between items need
    /// no owner and are released with the chunk.
    fn claim_chunk(&mut self, chunk: Bytes, ended_at_entry: bool) {
        if let Phase::MidItem(backlog) = &mut self.phase {
            backlog.push(chunk);
            return;
        }
        if matches!(self.phase, Phase::Searching) || ended_at_entry {
            self.keep_remainder(chunk);
        }
    }

    fn keep_remainder(&mut self, fragment: Bytes) {
        if self.retain_remainder && !fragment.is_empty() {
            self.remainder.push(fragment);
        }
    }
}

fn make_item(parse: bool, bytes: Bytes) -> Result<Item, ExtractError> {
    if parse {
        let value = serde_json::from_slice(&bytes).map_err(ExtractError::Decode)?;
        Ok(Item::Parsed(value))
    } else {
        Ok(Item::Raw(bytes))
    }
}
