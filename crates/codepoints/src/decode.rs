//! UTF-8 → codepoint decoding.
//!
//! Two views of a byte buffer live here:
//!
//! - [`utf8_len`] is a structural count. It classifies each leading byte by
//!   its high bits and skips that many bytes without looking at them, so it is
//!   cheap and never fails. On well-formed input it agrees with the decoder.
//! - [`Decoder`] validates. Well-formed sequences go through
//!   [`bstr::decode_utf8`]; when that rejects a prefix we classify why and
//!   apply the configured [`MalformedPolicy`].
//!
//! The length of the ill-formed subsequence is always the "maximal subpart"
//! reported by `bstr`, so replacement output matches
//! `String::from_utf8_lossy` byte-for-byte.

use core::iter::FusedIterator;

use crate::{CodepointBuf, DecodeError, DecodeErrorKind, DecodeOptions, MalformedPolicy};

/// U+FFFD REPLACEMENT CHARACTER.
pub const REPLACEMENT: u32 = 0xFFFD;

/// Width in bytes of the sequence announced by `lead`.
///
/// Continuation bytes and bytes that can never lead a sequence report a width
/// of one so a structural scan always makes progress.
#[inline]
#[must_use]
pub const fn sequence_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

#[inline]
const fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Counts the codepoints encoded in `bytes`.
///
/// One codepoint is counted per leading byte; its trailing bytes are skipped
/// without validation. A sequence cut short by the end of the buffer still
/// counts as one. Never reads past the end of `bytes`.
///
/// ```rust
/// assert_eq!(codepoints::utf8_len("aé€😀".as_bytes()), 4);
/// assert_eq!(codepoints::utf8_len(b""), 0);
/// ```
#[must_use]
pub fn utf8_len(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while let Some(&b) = bytes.get(i) {
        i += sequence_width(b);
        count += 1;
    }
    count
}

/// Result of decoding at a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Scalar { value: u32, len: usize },
    Malformed { kind: DecodeErrorKind, len: usize },
}

/// Decodes the sequence at the start of `bytes`, which must be non-empty.
pub(crate) fn decode_step(bytes: &[u8], allow_surrogates: bool) -> Step {
    debug_assert!(!bytes.is_empty());
    match bstr::decode_utf8(bytes) {
        (Some(ch), len) => Step::Scalar {
            value: u32::from(ch),
            len,
        },
        (None, len) => classify(bytes, len.max(1), allow_surrogates),
    }
}

/// Works out why `bytes` does not start with a well-formed sequence.
///
/// `invalid_len` is the length of the maximal subpart as computed by `bstr`.
fn classify(bytes: &[u8], invalid_len: usize, allow_surrogates: bool) -> Step {
    let lead = bytes[0];
    let malformed = |kind| Step::Malformed {
        kind,
        len: invalid_len,
    };

    match lead {
        0x80..=0xBF => return malformed(DecodeErrorKind::UnexpectedContinuation(lead)),
        0xC0 | 0xC1 => return malformed(DecodeErrorKind::Overlong),
        0xF5..=0xFF => return malformed(DecodeErrorKind::InvalidLeadingByte(lead)),
        _ => {}
    }

    let expected = sequence_width(lead);
    let second = bytes.get(1).copied().filter(|&b| is_continuation(b));
    if let Some(second) = second {
        match (lead, second) {
            (0xE0, 0x80..=0x9F) | (0xF0, 0x80..=0x8F) => {
                return malformed(DecodeErrorKind::Overlong);
            }
            (0xF4, 0x90..=0xBF) => return malformed(DecodeErrorKind::OutOfRange),
            (0xED, 0xA0..=0xBF) => return surrogate(bytes, invalid_len, allow_surrogates),
            _ => {}
        }
    }

    // Both are at most 4.
    #[allow(clippy::cast_possible_truncation)]
    let kind = DecodeErrorKind::Truncated {
        expected: expected as u8,
        found: invalid_len as u8,
    };
    malformed(kind)
}

/// `ED A0..=BF xx`: an encoded surrogate.
fn surrogate(bytes: &[u8], invalid_len: usize, allow: bool) -> Step {
    if !allow {
        return Step::Malformed {
            kind: DecodeErrorKind::Surrogate,
            len: invalid_len,
        };
    }
    match bytes.get(2) {
        Some(&third) if is_continuation(third) => Step::Scalar {
            value: (u32::from(bytes[0] & 0x0F) << 12)
                | (u32::from(bytes[1] & 0x3F) << 6)
                | u32::from(third & 0x3F),
            len: 3,
        },
        _ => Step::Malformed {
            kind: DecodeErrorKind::Truncated {
                expected: 3,
                found: 2,
            },
            len: 2,
        },
    }
}

/// An iterator decoding a byte slice into codepoints.
///
/// Under [`MalformedPolicy::Strict`] the first ill-formed subsequence yields
/// an `Err` and the iterator is exhausted afterwards. Under
/// [`MalformedPolicy::Replace`] it never yields `Err`.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
    options: DecodeOptions,
    failed: bool,
}

impl<'a> Decoder<'a> {
    /// A strict decoder over `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_options(bytes, DecodeOptions::default())
    }

    /// A decoder that replaces ill-formed input with U+FFFD.
    #[must_use]
    pub fn lossy(bytes: &'a [u8]) -> Self {
        Self::with_options(bytes, DecodeOptions::lossy())
    }

    /// A decoder over `bytes` with explicit options.
    #[must_use]
    pub fn with_options(bytes: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            bytes,
            pos: 0,
            options,
            failed: false,
        }
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The undecoded tail of the input.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<u32, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let rest = self.bytes.get(self.pos..).filter(|r| !r.is_empty())?;

        // ASCII needs no classification.
        if rest[0] < 0x80 {
            self.pos += 1;
            return Some(Ok(u32::from(rest[0])));
        }

        match decode_step(rest, self.options.allow_surrogates) {
            Step::Scalar { value, len } => {
                self.pos += len;
                Some(Ok(value))
            }
            Step::Malformed { kind, len } => {
                let offset = self.pos;
                match self.options.malformed {
                    MalformedPolicy::Strict => {
                        self.failed = true;
                        Some(Err(DecodeError { offset, kind }))
                    }
                    MalformedPolicy::Replace => {
                        log::trace!("replacing {len} ill-formed byte(s) at offset {offset}: {kind}");
                        self.pos += len;
                        Some(Ok(REPLACEMENT))
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let rest = self.bytes.len() - self.pos;
        let lower = match self.options.malformed {
            // May stop at the first error.
            MalformedPolicy::Strict => usize::from(rest > 0),
            MalformedPolicy::Replace => rest.div_ceil(4),
        };
        (lower, Some(rest))
    }
}

impl FusedIterator for Decoder<'_> {}

/// Decodes `bytes` into `dst`, strictly.
///
/// Stops once `dst` is full or `bytes` is exhausted, whichever comes first,
/// and returns the number of entries written. Size `dst` with [`utf8_len`] to
/// decode the whole buffer.
///
/// # Errors
///
/// Returns the first ill-formed subsequence found before `dst` fills up.
///
/// ```rust
/// let bytes = "añb".as_bytes();
/// let mut dst = vec![0; codepoints::utf8_len(bytes)];
/// let n = codepoints::decode_into(bytes, &mut dst).unwrap();
/// assert_eq!(&dst[..n], &[0x61, 0xF1, 0x62]);
/// ```
pub fn decode_into(bytes: &[u8], dst: &mut [u32]) -> Result<usize, DecodeError> {
    decode_into_with(bytes, dst, DecodeOptions::default())
}

/// [`decode_into`] with explicit options.
///
/// # Errors
///
/// Only under [`MalformedPolicy::Strict`]; see [`decode_into`].
pub fn decode_into_with(
    bytes: &[u8],
    dst: &mut [u32],
    options: DecodeOptions,
) -> Result<usize, DecodeError> {
    let mut written = 0;
    for (slot, cp) in dst.iter_mut().zip(Decoder::with_options(bytes, options)) {
        *slot = cp?;
        written += 1;
    }
    Ok(written)
}

/// Decodes all of `bytes` into an owned buffer, strictly.
///
/// # Errors
///
/// Returns the first ill-formed subsequence.
pub fn decode(bytes: &[u8]) -> Result<CodepointBuf, DecodeError> {
    decode_with(bytes, DecodeOptions::default())
}

/// Decodes all of `bytes`, substituting U+FFFD for ill-formed input.
#[must_use]
pub fn decode_lossy(bytes: &[u8]) -> CodepointBuf {
    Decoder::lossy(bytes).flatten().collect()
}

/// Decodes all of `bytes` with explicit options.
///
/// # Errors
///
/// Only under [`MalformedPolicy::Strict`]; see [`decode`].
pub fn decode_with(bytes: &[u8], options: DecodeOptions) -> Result<CodepointBuf, DecodeError> {
    let mut out = CodepointBuf::with_capacity(utf8_len(bytes));
    for cp in Decoder::with_options(bytes, options) {
        out.push(cp?);
    }
    Ok(out)
}
