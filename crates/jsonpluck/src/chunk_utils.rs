//! Chunking helpers for tests.

/// Split `payload` into `parts` approximately equal-sized chunks.
///
/// Chunks are raw byte ranges: multi-byte UTF-8 sequences and escape
/// sequences may land split across two chunks, which is exactly the point.
///
/// # Panics
///
/// Panics if `parts` is zero.
pub(crate) fn chunks_of(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` at positions derived from `splits`, consuming the whole
/// payload however short the list runs.
pub(crate) fn chunks_from_splits(payload: &[u8], splits: &[usize]) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for s in splits {
        let remaining = payload.len() - start;
        if remaining == 0 {
            break;
        }
        let size = 1 + (s % remaining);
        chunks.push(payload[start..start + size].to_vec());
        start += size;
    }
    if start < payload.len() {
        chunks.push(payload[start..].to_vec());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::{chunks_from_splits, chunks_of};

    #[test]
    fn chunks_of_covers_payload() {
        let payload = br#"["foo","bar"]"#;
        let chunks = chunks_of(payload, 5);
        assert_eq!(chunks.concat(), payload);
        assert!(chunks.len() <= 5);
    }

    #[test]
    fn splits_cover_payload() {
        let payload = b"[1,2,3]";
        let chunks = chunks_from_splits(payload, &[3, 0, 10]);
        assert_eq!(chunks.concat(), payload);
        assert_eq!(chunks_from_splits(payload, &[]), vec![payload.to_vec()]);
    }
}
