//! Streaming extraction of a single array's elements from a JSON document.
//!
//! A producer streams a large JSON payload; the consumer only cares about
//! one array deep inside it, say the `results` array of a paginated API
//! response wrapped in metadata. `jsonpluck` pulls each element of that
//! array out as soon as its bytes have fully arrived, without ever buffering
//! the whole document, and can optionally reconstruct the rest of the
//! document (the "remainder") with the array's contents elided.
//!
//! Input arrives in chunks of any size and any split: mid-token, mid-item,
//! mid-escape. Items are emitted strictly in document order, and always
//! before the remainder, which is only finalized after input ends.
//!
//! # Examples
//!
//! ```rust
//! use jsonpluck::{ArrayExtractor, ExtractorOptions, Item};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut extractor = ArrayExtractor::new(ExtractorOptions {
//!     target_path: "results".into(),
//!     retain_remainder: true,
//!     ..ExtractorOptions::default()
//! })?;
//!
//! // In real life these would come from the network.
//! let chunks: [&[u8]; 3] = [
//!     br#"{"total":3,"results":[{"id":1},{"i"#,
//!     br#"d":2},{"id":3}"#,
//!     br#"],"next":null}"#,
//! ];
//!
//! let mut items = Vec::new();
//! for chunk in chunks {
//!     items.extend(extractor.feed(chunk)?);
//! }
//! assert_eq!(items.len(), 3);
//! assert_eq!(items[1], Item::Parsed(serde_json::json!({"id": 2})));
//!
//! let remainder = extractor.finish()?;
//! assert_eq!(
//!     remainder,
//!     Some(Item::Parsed(serde_json::json!({
//!         "total": 3,
//!         "results": [],
//!         "next": null,
//!     })))
//! );
//! # Ok(())
//! # }
//! ```

mod backlog;
mod error;
mod extractor;
mod options;
mod path;
mod scanner;

#[cfg(test)]
mod chunk_utils;
#[cfg(test)]
mod tests;

pub use error::{ConfigError, ExtractError, ScanError, ScanErrorKind};
pub use extractor::{ArrayExtractor, EndReason, ExtractionState, Item};
pub use options::ExtractorOptions;
pub use path::{Path, PathComponent, PathComponentFrom, TargetPath, is_first_array_element};
pub use scanner::{Boundary, DepthScanner};

#[doc(hidden)]
pub use std::vec;

/// Macro to build a `Vec<PathComponent>` from a heterogeneous list of keys
/// and indices.
///
/// ```rust
/// # use jsonpluck::{PathComponent, path};
/// let p = path![0, "foo", 2];
/// assert_eq!(
///     p,
///     vec![
///         PathComponent::Index(0),
///         PathComponent::Key("foo".into()),
///         PathComponent::Index(2)
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        #[allow(unused_imports)]
        use $crate::PathComponentFrom;
        $crate::vec![$($crate::PathComponent::from_path_component($elem)),*]
    }};
}
