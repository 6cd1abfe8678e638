//! Chunked decoding.
//!
//! Bytes often arrive in pieces that split multi-byte sequences (socket reads,
//! file blocks, LLM token streams). [`StreamDecoder`] carries an incomplete
//! trailing sequence from one feed to the next, so any partition of a buffer
//! decodes to the same codepoints as the whole buffer does with
//! [`decode_with`](crate::decode_with).
//!
//! Invariants
//! - The carry holds at most three bytes, and they are always a proper prefix
//!   of some well-formed sequence. Anything else is resolved immediately.
//! - Error offsets are absolute: they count every byte fed so far.

use alloc::vec::Vec;

use crate::{
    DecodeError, DecodeErrorKind, DecodeOptions, MalformedPolicy,
    decode::{REPLACEMENT, Step, decode_step, sequence_width},
};

/// Incremental UTF-8 decoder.
///
/// ```rust
/// use codepoints::StreamDecoder;
///
/// let mut dec = StreamDecoder::new();
/// let mut out = Vec::new();
/// // "€" is E2 82 AC; split it across feeds.
/// dec.feed(b"a\xE2", &mut out).unwrap();
/// dec.feed(b"\x82\xACb", &mut out).unwrap();
/// dec.finish(&mut out).unwrap();
/// assert_eq!(out, [0x61, 0x20AC, 0x62]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StreamDecoder {
    options: DecodeOptions,
    carry: [u8; 4],
    carry_len: usize,
    /// Absolute offset of the first byte not yet decoded (start of the carry).
    resolved: usize,
    failed: Option<DecodeError>,
}

impl StreamDecoder {
    /// A strict stream decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A stream decoder with explicit options.
    #[must_use]
    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Bytes held back waiting for the rest of their sequence.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.carry[..self.carry_len]
    }

    /// Total bytes fed so far.
    #[must_use]
    pub fn bytes_fed(&self) -> usize {
        self.resolved + self.carry_len
    }

    /// Decodes `chunk`, appending codepoints to `out`.
    ///
    /// Returns the number of codepoints appended. A sequence left incomplete
    /// at the end of `chunk` is held until the next feed.
    ///
    /// # Errors
    ///
    /// Under [`MalformedPolicy::Strict`], the first ill-formed subsequence.
    /// Codepoints decoded before it are already in `out`. The decoder stays
    /// failed: later calls return the same error.
    pub fn feed(&mut self, chunk: &[u8], out: &mut Vec<u32>) -> Result<usize, DecodeError> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        let before = out.len();
        let input = self.complete_carry(chunk, out)?;
        self.decode_chunk(input, out)?;
        Ok(out.len() - before)
    }

    /// Flushes the decoder at end of input.
    ///
    /// # Errors
    ///
    /// Under [`MalformedPolicy::Strict`], a truncated trailing sequence or an
    /// earlier failure. Under [`MalformedPolicy::Replace`] the truncated tail
    /// becomes one U+FFFD.
    pub fn finish(self, out: &mut Vec<u32>) -> Result<(), DecodeError> {
        if let Some(err) = self.failed {
            return Err(err);
        }
        if self.carry_len == 0 {
            return Ok(());
        }

        #[allow(clippy::cast_possible_truncation)]
        let kind = DecodeErrorKind::Truncated {
            expected: sequence_width(self.carry[0]) as u8,
            found: self.carry_len as u8,
        };
        log::debug!(
            "stream ended inside a sequence at offset {}: {kind}",
            self.resolved
        );
        match self.options.malformed {
            MalformedPolicy::Strict => Err(DecodeError {
                offset: self.resolved,
                kind,
            }),
            MalformedPolicy::Replace => {
                out.push(REPLACEMENT);
                Ok(())
            }
        }
    }

    /// Resolves the carried prefix with bytes from the front of `chunk` and
    /// returns the part of `chunk` that is left.
    fn complete_carry<'c>(
        &mut self,
        chunk: &'c [u8],
        out: &mut Vec<u32>,
    ) -> Result<&'c [u8], DecodeError> {
        if self.carry_len == 0 {
            return Ok(chunk);
        }

        let held = self.carry_len;
        let take = chunk.len().min(4 - held);
        let mut window = self.carry;
        window[held..held + take].copy_from_slice(&chunk[..take]);
        let avail = held + take;

        match decode_step(&window[..avail], self.options.allow_surrogates) {
            Step::Malformed {
                kind: DecodeErrorKind::Truncated { .. },
                len,
            } if len == avail && take == chunk.len() => {
                // Still a proper prefix; keep waiting.
                self.carry = window;
                self.carry_len = avail;
                Ok(&[])
            }
            Step::Scalar { value, len } => {
                out.push(value);
                Ok(self.advance_past_carry(chunk, len))
            }
            Step::Malformed { kind, len } => {
                self.malformed(self.resolved, kind, len, out)?;
                Ok(self.advance_past_carry(chunk, len))
            }
        }
    }

    /// The carry was a proper prefix, so whatever sequence was decoded from it
    /// spans at least all of it.
    fn advance_past_carry<'c>(&mut self, chunk: &'c [u8], len: usize) -> &'c [u8] {
        debug_assert!(len >= self.carry_len);
        let from_chunk = len - self.carry_len;
        self.resolved += len;
        self.carry_len = 0;
        &chunk[from_chunk..]
    }

    fn decode_chunk(&mut self, input: &[u8], out: &mut Vec<u32>) -> Result<(), DecodeError> {
        let mut pos = 0;
        while let Some(&b) = input.get(pos) {
            if b < 0x80 {
                out.push(u32::from(b));
                pos += 1;
                continue;
            }
            match decode_step(&input[pos..], self.options.allow_surrogates) {
                Step::Scalar { value, len } => {
                    out.push(value);
                    pos += len;
                }
                Step::Malformed {
                    kind: DecodeErrorKind::Truncated { .. },
                    len,
                } if pos + len == input.len() => {
                    self.carry[..len].copy_from_slice(&input[pos..]);
                    self.carry_len = len;
                    break;
                }
                Step::Malformed { kind, len } => {
                    self.malformed(self.resolved + pos, kind, len, out)?;
                    pos += len;
                }
            }
        }
        self.resolved += pos;
        Ok(())
    }

    fn malformed(
        &mut self,
        offset: usize,
        kind: DecodeErrorKind,
        len: usize,
        out: &mut Vec<u32>,
    ) -> Result<(), DecodeError> {
        match self.options.malformed {
            MalformedPolicy::Strict => {
                let err = DecodeError { offset, kind };
                self.failed = Some(err);
                Err(err)
            }
            MalformedPolicy::Replace => {
                log::trace!("replacing {len} ill-formed byte(s) at offset {offset}: {kind}");
                out.push(REPLACEMENT);
                Ok(())
            }
        }
    }
}
