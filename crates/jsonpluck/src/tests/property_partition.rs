use bytes::Bytes;
use quickcheck::QuickCheck;
use serde_json::Value;

use super::{as_values, remainder::with_items_restored};
use crate::{
    ArrayExtractor, ExtractorOptions, Item, Path, PathComponent,
    chunk_utils::chunks_from_splits, path,
};

fn corpus() -> Vec<(&'static str, Path)> {
    vec![
        ("[1,2,3]", path![]),
        (r#"{"a":[{}, {"b":[1,2,3]}]}"#, path!["a", 1, "b"]),
        (
            r#"{"a":{"c":[6,6,6],"b":[0,"safe",0],"d":[6,6,6]}}"#,
            path!["a", "b"],
        ),
        (r#"{"a":[0,0,{"b":[1,2,3]}]}"#, path!["a", 2, "b"]),
        (r#"{"a":{"b":{"0":1}}}"#, path!["a", "b"]),
        (
            r#"{"meta":{"page":1},"results":[{"id":1,"tags":["x","y"]},{"id":2,"tags":[]},null,true,"s"],"next":"tok"}"#,
            path!["results"],
        ),
        (r#"["héllo","😀",{"k":"v"}]"#, path![]),
        (r#"{"a":[]}"#, path!["a"]),
        (r#"{"a":5}"#, path!["a"]),
        (r#"{"outer":[[1,2],[3,[4]]],"tail":[9]}"#, path!["outer"]),
    ]
}

fn extract(doc: &[u8], target: &Path, splits: &[usize], retain: bool) -> (Vec<Value>, Option<Item>) {
    let mut extractor = ArrayExtractor::new(ExtractorOptions {
        target_path: target.clone().into(),
        retain_remainder: retain,
        ..ExtractorOptions::default()
    })
    .unwrap();
    let mut items = Vec::new();
    for chunk in chunks_from_splits(doc, splits) {
        items.extend(extractor.feed(Bytes::from(chunk)).unwrap());
    }
    (as_values(items), extractor.finish().unwrap())
}

/// Navigate `doc` to `target`; the elements found there are the ground truth
/// for what extraction must emit.
fn expected_items(doc: &str, target: &Path) -> Vec<Value> {
    let mut value = &serde_json::from_str::<Value>(doc).unwrap();
    for component in target {
        value = match (component, value) {
            (PathComponent::Key(k), Value::Object(map)) => match map.get(k.as_str()) {
                Some(next) => next,
                None => return Vec::new(),
            },
            (PathComponent::Index(i), Value::Array(elems)) => match elems.get(*i) {
                Some(next) => next,
                None => return Vec::new(),
            },
            _ => return Vec::new(),
        };
    }
    match value {
        Value::Array(elems) => elems.clone(),
        _ => Vec::new(),
    }
}

fn iterations() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Property: any partition of the input into chunks yields the same item
/// sequence as feeding the whole document at once, and that sequence equals
/// the elements actually at the target path.
#[test]
fn partition_independence_quickcheck() {
    fn prop(doc_choice: usize, splits: Vec<usize>) -> bool {
        let corpus = corpus();
        let (doc, target) = &corpus[doc_choice % corpus.len()];

        let (whole, _) = extract(doc.as_bytes(), target, &[], false);
        let (chunked, _) = extract(doc.as_bytes(), target, &splits, false);

        whole == chunked && chunked == expected_items(doc, target)
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(usize, Vec<usize>) -> bool);
}

/// Property: with retention enabled, splicing the emitted items back into the
/// remainder's elided slot reproduces the original document.
#[test]
fn remainder_round_trip_quickcheck() {
    fn prop(doc_choice: usize, splits: Vec<usize>) -> bool {
        let corpus = corpus();
        let (doc, target) = &corpus[doc_choice % corpus.len()];

        let (items, remainder) = extract(doc.as_bytes(), target, &splits, true);
        let remainder = match remainder {
            Some(Item::Parsed(value)) => value,
            Some(Item::Raw(_)) | None => return false,
        };
        let restored = with_items_restored(remainder, target, &items);
        restored == serde_json::from_str::<Value>(doc).unwrap()
    }

    QuickCheck::new()
        .tests(iterations())
        .quickcheck(prop as fn(usize, Vec<usize>) -> bool);
}
