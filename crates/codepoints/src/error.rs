use thiserror::Error;

/// A UTF-8 decoding failure and the byte offset of the offending
/// subsequence.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct DecodeError {
    /// Byte offset of the first byte of the ill-formed subsequence.
    pub offset: usize,
    /// What was wrong with it.
    pub kind: DecodeErrorKind,
}

/// The ways a byte subsequence can fail to be well-formed UTF-8.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// A `10xxxxxx` byte where a leading byte was expected.
    #[error("unexpected continuation byte 0x{0:02X}")]
    UnexpectedContinuation(u8),
    /// `0xC0`, `0xC1` or `0xF5..=0xFF`.
    #[error("invalid leading byte 0x{0:02X}")]
    InvalidLeadingByte(u8),
    /// The sequence ended (or hit a non-continuation byte) early.
    #[error("truncated sequence: expected {expected} bytes, found {found}")]
    Truncated {
        /// Width announced by the leading byte.
        expected: u8,
        /// Bytes that were actually part of the sequence.
        found: u8,
    },
    /// A scalar encoded with more bytes than it needs.
    #[error("overlong encoding")]
    Overlong,
    /// `U+D800..=U+DFFF` encoded as a three-byte sequence.
    #[error("encoded surrogate")]
    Surrogate,
    /// A four-byte sequence above `U+10FFFF`.
    #[error("codepoint above U+10FFFF")]
    OutOfRange,
}

/// A codepoint sequence that can't be encoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// A surrogate or a value above `U+10FFFF`.
    #[error("invalid scalar value 0x{value:X} at index {index}")]
    InvalidScalar {
        /// Position in the codepoint sequence.
        index: usize,
        /// The rejected value.
        value: u32,
    },
    /// U+0000 can't appear inside a null-terminated string.
    #[error("interior NUL at index {index}")]
    InteriorNul {
        /// Position in the codepoint sequence.
        index: usize,
    },
}

/// A numeric literal failure and the codepoint index it was detected at.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    /// Index into the codepoint sequence.
    pub offset: usize,
    /// What was wrong with the literal.
    pub kind: ParseErrorKind,
}

/// The ways a numeric literal can fail to parse.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The sequence had no codepoints at all.
    #[error("empty input")]
    Empty,
    /// No digit where the literal needed one.
    #[error("no digits")]
    NoDigits,
    /// The value does not fit the target type.
    #[error("number too large")]
    Overflow,
    /// A `-` sign in front of an unsigned literal.
    #[error("negative value for unsigned integer")]
    NegativeUnsigned,
}

impl ParseError {
    pub(crate) fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }
}
