mod property_partition;

use bytes::Bytes;
use serde_json::Value;

use crate::{ArrayExtractor, ExtractorOptions, Item};

/// Run an extractor over `chunks`, returning the emitted items and the
/// remainder.
pub(crate) fn feed_all(
    options: ExtractorOptions,
    chunks: &[&[u8]],
) -> (Vec<Item>, Option<Item>) {
    let mut extractor = ArrayExtractor::new(options).unwrap();
    let mut items = Vec::new();
    for chunk in chunks {
        items.extend(extractor.feed(Bytes::copy_from_slice(chunk)).unwrap());
    }
    let remainder = extractor.finish().unwrap();
    (items, remainder)
}

/// Extract parsed items from a whole document fed as `parts` chunks.
pub(crate) fn pluck(doc: &[u8], target: crate::TargetPath, parts: usize) -> Vec<Value> {
    let chunks = crate::chunk_utils::chunks_of(doc, parts);
    let (items, _) = feed_all(
        ExtractorOptions {
            target_path: target,
            ..ExtractorOptions::default()
        },
        &chunks,
    );
    as_values(items)
}

pub(crate) fn as_values(items: Vec<Item>) -> Vec<Value> {
    items
        .into_iter()
        .map(|item| match item {
            Item::Parsed(value) => value,
            Item::Raw(bytes) => panic!("expected parsed item, got raw bytes {bytes:?}"),
        })
        .collect()
}
