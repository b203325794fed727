//! Accumulation of an item's bytes across chunk boundaries.

use bytes::Bytes;

/// Bytes of the item currently being accumulated.
///
/// At most one backlog exists at a time, owned by the extractor's mid-item
/// state. It is created at an item's opening boundary and consumed at its
/// closing boundary; `prior` holds the chunks fed between the two, so the
/// chunk currently being processed is never stored here. Chunks are
/// [`Bytes`] handles: claiming one is a refcount bump, and its buffer is
/// released once neither the backlog nor a remainder fragment still points
/// at it.
#[derive(Debug)]
pub(crate) struct Backlog {
    /// Offset of the item's first byte: into `prior[0]` once the item has
    /// outlived the chunk it started in, otherwise into the current chunk.
    start: usize,
    prior: Vec<Bytes>,
}

impl Backlog {
    /// Open a backlog for an item starting at `start` in the chunk being fed.
    pub(crate) fn open(start: usize) -> Self {
        Self {
            start,
            prior: Vec::new(),
        }
    }

    /// Claim the chunk whose processing just finished; the item continues
    /// into the next feed.
    pub(crate) fn push(&mut self, chunk: Bytes) {
        self.prior.push(chunk);
    }

    /// Assemble the completed item, which ends exclusively at `end` within
    /// `current`.
    ///
    /// An item contained in a single chunk is a zero-copy slice; an item
    /// spanning feeds concatenates the first chunk's tail, the middle chunks
    /// whole, and the current chunk's head.
    pub(crate) fn complete(self, current: &Bytes, end: usize) -> Bytes {
        let Some((first, middle)) = self.prior.split_first() else {
            return current.slice(self.start..end);
        };
        let len =
            first.len() - self.start + middle.iter().map(Bytes::len).sum::<usize>() + end;
        let mut buf = Vec::with_capacity(len);
        buf.extend_from_slice(&first[self.start..]);
        for chunk in middle {
            buf.extend_from_slice(chunk);
        }
        buf.extend_from_slice(&current[..end]);
        Bytes::from(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::Backlog;
    use bytes::Bytes;

    #[test]
    fn single_chunk_item_is_a_slice() {
        let chunk = Bytes::from_static(b"[1,234,5]");
        let backlog = Backlog::open(3);
        assert_eq!(backlog.complete(&chunk, 6), "234");
    }

    #[test]
    fn spanning_item_concatenates() {
        let mut backlog = Backlog::open(1);
        backlog.push(Bytes::from_static(b"[12"));
        backlog.push(Bytes::from_static(b"34"));
        let current = Bytes::from_static(b"56]");
        assert_eq!(backlog.complete(&current, 2), "123456");
    }

    #[test]
    fn item_ending_at_chunk_start() {
        let mut backlog = Backlog::open(1);
        backlog.push(Bytes::from_static(b"[789"));
        let current = Bytes::from_static(b",1]");
        assert_eq!(backlog.complete(&current, 0), "789");
    }
}
