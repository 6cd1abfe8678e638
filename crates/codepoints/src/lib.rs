//! UTF-8 text as sequences of `u32` codepoints.
//!
//! The crate converts between UTF-8 bytes (plain slices or null-terminated
//! strings) and codepoint sequences, compares sequences by scalar value,
//! lexes numeric literals out of them, and prints them.
//!
//! ```rust
//! use core::cmp::Ordering;
//!
//! let cps = codepoints::decode("-42 apples".as_bytes()).unwrap();
//! assert_eq!(cps.len(), 10);
//! assert_eq!(codepoints::parse_i64(&cps), Ok(-42));
//! assert_eq!(codepoints::cmp_with_cstr(&cps, c"-42"), Ordering::Greater);
//!
//! let back = codepoints::to_cstring(&cps).unwrap();
//! assert_eq!(back.to_bytes(), b"-42 apples");
//! ```
//!
//! Malformed input is an error by default; see [`MalformedPolicy`] for the
//! replacing alternative.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buf;
mod cmp;
mod decode;
mod encode;
mod error;
mod numeric;
mod options;
#[cfg(feature = "std")]
mod print;
mod stream;

#[cfg(test)]
mod tests;

pub use buf::{CodepointBuf, from_cstr, from_cstr_lossy};
pub use cmp::{cmp_codepoints, cmp_with_cstr, cmp_with_str};
pub use decode::{
    Decoder, REPLACEMENT, decode, decode_into, decode_into_with, decode_lossy, decode_with,
    sequence_width, utf8_len,
};
pub use encode::{
    encode, encode_into, encode_scalar, encoded_len, is_scalar, to_cstring, to_string,
    to_string_lossy,
};
pub use error::{DecodeError, DecodeErrorKind, EncodeError, ParseError, ParseErrorKind};
pub use numeric::{NumberLexeme, lex_number, parse_f64, parse_i64, parse_u64};
pub use options::{DecodeOptions, MalformedPolicy};
#[cfg(feature = "std")]
pub use print::{print_codepoints, write_codepoints};
pub use stream::StreamDecoder;
