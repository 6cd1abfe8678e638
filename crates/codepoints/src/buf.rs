use alloc::{ffi::CString, string::String, vec::Vec};
use core::{
    ffi::CStr,
    fmt::{self, Write as _},
    ops::{Deref, DerefMut},
};

use crate::{DecodeError, DecodeOptions, EncodeError, decode, encode};

/// An owned codepoint sequence.
///
/// Orders lexicographically by scalar value, exactly like
/// [`cmp_codepoints`](crate::cmp_codepoints). `Display` writes the text,
/// substituting U+FFFD for values that are not scalars.
///
/// ```rust
/// use codepoints::CodepointBuf;
///
/// let buf = CodepointBuf::from("héllo");
/// assert_eq!(buf.len(), 5);
/// assert_eq!(buf.to_string(), "héllo");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CodepointBuf {
    inner: Vec<u32>,
}

impl CodepointBuf {
    /// An empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// An empty buffer with room for `capacity` codepoints.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
        }
    }

    /// Decodes UTF-8 bytes, strictly.
    ///
    /// # Errors
    ///
    /// Returns the first ill-formed subsequence.
    pub fn from_utf8(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode::decode(bytes)
    }

    /// Decodes UTF-8 bytes, substituting U+FFFD for ill-formed input.
    #[must_use]
    pub fn from_utf8_lossy(bytes: &[u8]) -> Self {
        decode::decode_lossy(bytes)
    }

    /// Decodes a null-terminated string; the terminator is not part of the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns the first ill-formed subsequence.
    pub fn from_cstr(cstr: &CStr) -> Result<Self, DecodeError> {
        decode::decode(cstr.to_bytes())
    }

    /// [`Self::from_cstr`] with ill-formed input replaced by U+FFFD.
    #[must_use]
    pub fn from_cstr_lossy(cstr: &CStr) -> Self {
        decode::decode_lossy(cstr.to_bytes())
    }

    /// [`Self::from_cstr`] with explicit decode options.
    ///
    /// # Errors
    ///
    /// Only under [`MalformedPolicy::Strict`](crate::MalformedPolicy::Strict).
    pub fn from_cstr_with(cstr: &CStr, options: DecodeOptions) -> Result<Self, DecodeError> {
        decode::decode_with(cstr.to_bytes(), options)
    }

    /// Appends a codepoint.
    pub fn push(&mut self, cp: u32) {
        self.inner.push(cp);
    }

    /// The codepoints as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.inner
    }

    /// Unwraps the backing vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<u32> {
        self.inner
    }

    /// Encodes the sequence as an owned, null-terminated string.
    ///
    /// # Errors
    ///
    /// See [`to_cstring`](crate::to_cstring).
    pub fn to_cstring(&self) -> Result<CString, EncodeError> {
        encode::to_cstring(&self.inner)
    }

    /// Encodes the sequence as UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// See [`encode`](crate::encode()).
    pub fn to_utf8(&self) -> Result<Vec<u8>, EncodeError> {
        encode::encode(&self.inner)
    }

    /// Encodes the sequence as a `String`, writing U+FFFD for non-scalars.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        encode::to_string_lossy(&self.inner)
    }
}

/// Decodes a null-terminated string into an owned codepoint buffer.
///
/// ```rust
/// let buf = codepoints::from_cstr(c"añ").unwrap();
/// assert_eq!(buf, [0x61, 0xF1]);
/// ```
///
/// # Errors
///
/// Returns the first ill-formed subsequence.
pub fn from_cstr(cstr: &CStr) -> Result<CodepointBuf, DecodeError> {
    CodepointBuf::from_cstr(cstr)
}

/// [`from_cstr`] with ill-formed input replaced by U+FFFD.
#[must_use]
pub fn from_cstr_lossy(cstr: &CStr) -> CodepointBuf {
    CodepointBuf::from_cstr_lossy(cstr)
}

impl Deref for CodepointBuf {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.inner
    }
}

impl DerefMut for CodepointBuf {
    fn deref_mut(&mut self) -> &mut [u32] {
        &mut self.inner
    }
}

impl AsRef<[u32]> for CodepointBuf {
    fn as_ref(&self) -> &[u32] {
        &self.inner
    }
}

impl fmt::Display for CodepointBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner
            .iter()
            .map(|&cp| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))
            .try_for_each(|ch| f.write_char(ch))
    }
}

impl From<&str> for CodepointBuf {
    fn from(s: &str) -> Self {
        s.chars().map(u32::from).collect()
    }
}

impl From<Vec<u32>> for CodepointBuf {
    fn from(inner: Vec<u32>) -> Self {
        Self { inner }
    }
}

impl From<&[u32]> for CodepointBuf {
    fn from(cps: &[u32]) -> Self {
        Self {
            inner: cps.to_vec(),
        }
    }
}

impl From<CodepointBuf> for Vec<u32> {
    fn from(buf: CodepointBuf) -> Self {
        buf.inner
    }
}

impl FromIterator<u32> for CodepointBuf {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl Extend<u32> for CodepointBuf {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl IntoIterator for CodepointBuf {
    type Item = u32;
    type IntoIter = alloc::vec::IntoIter<u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a CodepointBuf {
    type Item = &'a u32;
    type IntoIter = core::slice::Iter<'a, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl PartialEq<[u32]> for CodepointBuf {
    fn eq(&self, other: &[u32]) -> bool {
        self.inner == other
    }
}

impl PartialEq<&[u32]> for CodepointBuf {
    fn eq(&self, other: &&[u32]) -> bool {
        self.inner == *other
    }
}

impl<const N: usize> PartialEq<[u32; N]> for CodepointBuf {
    fn eq(&self, other: &[u32; N]) -> bool {
        self.inner == other
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn cstr_round_trip() {
        let buf = CodepointBuf::from_cstr(c"ab€😀").unwrap();
        assert_eq!(buf, [0x61, 0x62, 0x20AC, 0x1F600]);
        let back = buf.to_cstring().unwrap();
        assert_eq!(back.as_c_str(), c"ab€😀");
    }

    #[test]
    fn empty_cstr_is_empty_buffer() {
        assert!(from_cstr(c"").unwrap().is_empty());
    }

    #[test]
    fn lossy_cstr_replaces() {
        let raw = CString::new(vec![b'a', 0xFF, b'b']).unwrap();
        assert!(from_cstr(&raw).is_err());
        assert_eq!(from_cstr_lossy(&raw), [0x61, 0xFFFD, 0x62]);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = CodepointBuf::from("ab");
        let b = CodepointBuf::from("abc");
        let c = CodepointBuf::from("b");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn display_substitutes_non_scalars() {
        let buf = CodepointBuf::from(vec![0x6F, 0xDC00, 0x6B]);
        assert_eq!(buf.to_string(), "o\u{FFFD}k");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_plain_array() {
        let buf = CodepointBuf::from("hé");
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, "[104,233]");
        let back: CodepointBuf = serde_json::from_str(&json).unwrap();
        assert_eq!(back, buf);
    }

    #[test]
    fn derefs_to_slice() {
        let mut buf = CodepointBuf::from("abc");
        buf[0] = 0x41;
        assert_eq!(buf.first(), Some(&0x41));
        assert_eq!(buf.as_slice(), &[0x41, 0x62, 0x63]);
    }
}
