//! Configuration for the extractor.

use crate::path::TargetPath;

/// Configuration options for [`ArrayExtractor`](crate::ArrayExtractor).
///
/// Supplied once, at construction. These options select the array to
/// extract, whether emitted bytes are decoded, and whether the surrounding
/// document is reconstructed.
///
/// # Examples
///
/// ```rust
/// use jsonpluck::{ArrayExtractor, ExtractorOptions};
///
/// let extractor = ArrayExtractor::new(ExtractorOptions {
///     target_path: "a.2.b".into(),
///     retain_remainder: true,
///     ..ExtractorOptions::default()
/// })?;
/// # Ok::<(), jsonpluck::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorOptions {
    /// The array whose elements to extract, as an explicit component
    /// sequence or a dotted string.
    ///
    /// # Default
    ///
    /// The document root: the top-level value must itself be the array.
    pub target_path: TargetPath,

    /// Whether to decode emitted items (and the remainder) from bytes into
    /// [`serde_json::Value`]s.
    ///
    /// When `false`, items are delivered as the exact raw bytes of each
    /// element, with no surrounding whitespace.
    ///
    /// # Default
    ///
    /// `true`
    pub parse_items: bool,

    /// Whether to reconstruct the rest of the document (everything except
    /// the target array's contents) and deliver it once input ends.
    ///
    /// When `false`, the extractor stops accepting input as soon as the
    /// target array has been fully consumed; when `true`, input must keep
    /// flowing until the source ends, since the remainder needs the rest of
    /// the document. Retention buffers the remaining document in memory.
    ///
    /// # Default
    ///
    /// `false`
    pub retain_remainder: bool,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            target_path: TargetPath::default(),
            parse_items: true,
            retain_remainder: false,
        }
    }
}
