#![no_main]
use std::cell::RefCell;

use codepoints::{
    DecodeOptions, MalformedPolicy, StreamDecoder, cmp_codepoints, decode_with, encode,
    to_string_lossy,
};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Pieces that exercise every decoder branch: well-formed sequences of each
/// width and the usual ways a sequence goes wrong.
static FRAGMENTS: &[&[u8]] = &[
    b"a",
    b"\x00",
    "é".as_bytes(),
    "€".as_bytes(),
    "😀".as_bytes(),
    "\u{10FFFF}".as_bytes(),
    b"\x80",         // stray continuation
    b"\xC0\xAF",     // overlong 2-byte
    b"\xE0\x80\xAF", // overlong 3-byte
    b"\xED\xA0\x80", // surrogate
    b"\xF4\x90\x80\x80",
    b"\xE2\x82", // truncated
    b"\xF0\x9F\x98",
    b"\xFF",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size > HEADER && (size < HEADER || seed.is_multiple_of(10)) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut len = HEADER;
        let target = size.max(HEADER + 1).min(max_size);
        while len < target {
            let piece = with_rng(|rng| FRAGMENTS[rng.random_range(0..FRAGMENTS.len())]);
            if len + piece.len() > max_size {
                break;
            }
            data[len..len + piece.len()].copy_from_slice(piece);
            len += piece.len();
        }
        len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

/// Split `bytes` into chunks of at least one byte, sized from `split_seed`.
/// Boundaries land anywhere, including inside sequences.
fn split_chunks(bytes: &[u8], split_seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut seed = split_seed;
    while start < bytes.len() {
        let remaining = bytes.len() - start;
        let size = (seed as usize % remaining) + 1;
        chunks.push(&bytes[start..start + size]);
        start += size;
        seed = seed.rotate_left(7) ^ 0x9E37_79B9;
    }
    chunks
}

fn stream(
    input: &[u8],
    split_seed: u64,
    options: DecodeOptions,
) -> Result<Vec<u32>, codepoints::DecodeError> {
    let mut dec = StreamDecoder::with_options(options);
    let mut out = Vec::new();
    for chunk in split_chunks(input, split_seed) {
        dec.feed(chunk, &mut out)?;
    }
    dec.finish(&mut out)?;
    Ok(out)
}

fn decoder(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u64::from(u32::from_le_bytes([data[1], data[2], data[3], data[4]]));
    let input = &data[HEADER..];

    let options = DecodeOptions {
        malformed: if flags & 1 != 0 {
            MalformedPolicy::Replace
        } else {
            MalformedPolicy::Strict
        },
        allow_surrogates: flags & 2 != 0,
    };

    let whole = decode_with(input, options).map(codepoints::CodepointBuf::into_vec);

    let streamed = stream(input, split_seed, options);
    assert_eq!(whole, streamed, "stream and whole-buffer decoding diverged");

    if options.allow_surrogates {
        return;
    }
    match (&whole, std::str::from_utf8(input)) {
        (Ok(cps), Ok(text)) => {
            assert_eq!(encode(cps).as_deref(), Ok(input));
            assert_eq!(
                cmp_codepoints(cps, &text.chars().map(u32::from).collect::<Vec<_>>()),
                std::cmp::Ordering::Equal
            );
        }
        (Ok(cps), Err(_)) => {
            assert_eq!(options.malformed, MalformedPolicy::Replace);
            assert_eq!(to_string_lossy(cps), String::from_utf8_lossy(input));
        }
        (Err(err), Err(std_err)) => assert_eq!(err.offset, std_err.valid_up_to()),
        (Err(err), Ok(_)) => panic!("valid input rejected: {err}"),
    }
}

fuzz_target!(|data: &[u8]| decoder(data));
