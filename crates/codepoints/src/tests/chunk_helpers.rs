use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized byte chunks.
///
/// Unlike splitting a `str`, chunk boundaries are free to land inside a
/// multi-byte sequence; that is the case the stream decoder exists for.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub(crate) fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` at the cut points derived from `splits`.
///
/// Each split is reduced modulo the remaining length, so any `Vec<usize>`
/// describes a valid partition.
#[must_use]
pub(crate) fn partition<'a>(payload: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = payload;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let size = 1 + (s % rest.len());
        let (head, tail) = rest.split_at(size);
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

#[test]
fn chunks_cover_payload() {
    let payload = "a€😀".as_bytes();
    for parts in 1..=payload.len() + 2 {
        let chunks = produce_chunks(payload, parts);
        assert_eq!(chunks.concat(), payload);
    }
    assert!(produce_chunks(b"", 3).is_empty());
}

#[test]
fn partition_covers_payload() {
    let payload = b"abcdefgh";
    let chunks = partition(payload, &[2, 101, 0]);
    assert_eq!(chunks, [&b"abc"[..], &b"de"[..], &b"f"[..], &b"gh"[..]]);
}
