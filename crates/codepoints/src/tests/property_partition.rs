use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::{arbitrary::DamagedUtf8, chunk_helpers::{partition, produce_chunks}, quickcheck_tests};
use crate::{DecodeOptions, MalformedPolicy, StreamDecoder, decode_with};

fn stream(chunks: &[&[u8]], options: DecodeOptions) -> Result<Vec<u32>, crate::DecodeError> {
    let mut dec = StreamDecoder::with_options(options);
    let mut out = Vec::new();
    for chunk in chunks {
        dec.feed(chunk, &mut out)?;
    }
    dec.finish(&mut out)?;
    Ok(out)
}

/// Property: feeding bytes in arbitrary chunks yields exactly what decoding
/// the whole buffer yields, including the error and its offset.
#[test]
fn partition_equivalence_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(input: DamagedUtf8, splits: Vec<usize>, options: DecodeOptions) -> bool {
        let whole = decode_with(&input.0, options).map(crate::CodepointBuf::into_vec);
        let chunks = partition(&input.0, &splits);
        whole == stream(&chunks, options)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(DamagedUtf8, Vec<usize>, DecodeOptions) -> bool);
}

#[test]
fn every_byte_split_of_mixed_text() {
    let text = "a€😀ß\u{10FFFF}z".as_bytes();
    let expected = decode_with(text, DecodeOptions::default()).unwrap().into_vec();
    for parts in 1..=text.len() {
        let chunks = produce_chunks(text, parts);
        for malformed in [MalformedPolicy::Strict, MalformedPolicy::Replace] {
            let options = DecodeOptions {
                malformed,
                ..Default::default()
            };
            assert_eq!(stream(&chunks, options).unwrap(), expected, "parts = {parts}");
        }
    }
}
