//! Codepoint → UTF-8 encoding.

use alloc::{ffi::CString, string::String, vec::Vec};

use crate::{EncodeError, decode::utf8_len};

/// Whether `cp` is a Unicode scalar value (not a surrogate, at most
/// `U+10FFFF`).
#[inline]
#[must_use]
pub const fn is_scalar(cp: u32) -> bool {
    cp < 0xD800 || (cp > 0xDFFF && cp <= 0x10_FFFF)
}

/// Number of bytes `cp` takes in UTF-8.
///
/// Follows the magnitude rule only; validity is the caller's concern.
#[inline]
#[must_use]
pub const fn encoded_len(cp: u32) -> usize {
    if cp < 0x80 {
        1
    } else if cp < 0x800 {
        2
    } else if cp < 0x1_0000 {
        3
    } else {
        4
    }
}

/// Encodes `cp` into `dst` and returns the written prefix, or `None` when
/// `cp` is not a scalar value.
///
/// ```rust
/// let mut buf = [0; 4];
/// assert_eq!(codepoints::encode_scalar(0x10000, &mut buf), Some(&[0xF0, 0x90, 0x80, 0x80][..]));
/// assert_eq!(codepoints::encode_scalar(0xD800, &mut buf), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn encode_scalar(cp: u32, dst: &mut [u8; 4]) -> Option<&[u8]> {
    if !is_scalar(cp) {
        return None;
    }
    let len = encoded_len(cp);
    match len {
        1 => dst[0] = cp as u8,
        2 => {
            dst[0] = 0xC0 | (cp >> 6) as u8;
            dst[1] = 0x80 | (cp & 0x3F) as u8;
        }
        3 => {
            dst[0] = 0xE0 | (cp >> 12) as u8;
            dst[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            dst[2] = 0x80 | (cp & 0x3F) as u8;
        }
        _ => {
            dst[0] = 0xF0 | (cp >> 18) as u8;
            dst[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
            dst[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            dst[3] = 0x80 | (cp & 0x3F) as u8;
        }
    }
    Some(&dst[..len])
}

/// Appends the UTF-8 encoding of `codepoints` to `dst`.
///
/// On error `dst` keeps whatever was appended before the bad value.
///
/// # Errors
///
/// [`EncodeError::InvalidScalar`] for the first value that is not a scalar.
pub fn encode_into(codepoints: &[u32], dst: &mut Vec<u8>) -> Result<(), EncodeError> {
    dst.reserve(codepoints.iter().map(|&cp| encoded_len(cp)).sum());
    let mut buf = [0u8; 4];
    for (index, &value) in codepoints.iter().enumerate() {
        let bytes =
            encode_scalar(value, &mut buf).ok_or(EncodeError::InvalidScalar { index, value })?;
        dst.extend_from_slice(bytes);
    }
    Ok(())
}

/// Encodes `codepoints` as UTF-8 bytes.
///
/// # Errors
///
/// [`EncodeError::InvalidScalar`] for the first value that is not a scalar.
pub fn encode(codepoints: &[u32]) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    encode_into(codepoints, &mut out)?;
    Ok(out)
}

/// Encodes `codepoints` as a `String`.
///
/// # Errors
///
/// [`EncodeError::InvalidScalar`] for the first value that is not a scalar.
pub fn to_string(codepoints: &[u32]) -> Result<String, EncodeError> {
    codepoints
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            char::from_u32(value).ok_or(EncodeError::InvalidScalar { index, value })
        })
        .collect()
}

/// Encodes `codepoints` as a `String`, writing U+FFFD for values that are not
/// scalars.
#[must_use]
pub fn to_string_lossy(codepoints: &[u32]) -> String {
    codepoints
        .iter()
        .map(|&cp| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Encodes `codepoints` as an owned, null-terminated byte string.
///
/// Decoding the result gives back `codepoints` exactly.
///
/// ```rust
/// let s = codepoints::to_cstring(&[0x68, 0x69]).unwrap();
/// assert_eq!(s.as_bytes_with_nul(), b"hi\0");
/// ```
///
/// # Errors
///
/// - [`EncodeError::InvalidScalar`] for the first value that is not a scalar.
/// - [`EncodeError::InteriorNul`] if `codepoints` contains U+0000.
pub fn to_cstring(codepoints: &[u32]) -> Result<CString, EncodeError> {
    let bytes = encode(codepoints)?;
    // A NUL byte only ever comes from U+0000, so the codepoint index is the
    // number of codepoints before it.
    CString::new(bytes).map_err(|e| {
        let pos = e.nul_position();
        EncodeError::InteriorNul {
            index: utf8_len(&e.into_vec()[..pos]),
        }
    })
}
