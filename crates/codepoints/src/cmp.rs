use core::{cmp::Ordering, ffi::CStr};

use crate::Decoder;

/// Compares two codepoint sequences by raw scalar value.
///
/// A strict prefix orders first. There is no normalization or case folding.
///
/// ```rust
/// use core::cmp::Ordering;
///
/// assert_eq!(codepoints::cmp_codepoints(&[0x61, 0x62], &[0x61]), Ordering::Greater);
/// assert_eq!(codepoints::cmp_codepoints(&[0x41], &[0x61]), Ordering::Less);
/// ```
#[inline]
#[must_use]
pub fn cmp_codepoints(a: &[u32], b: &[u32]) -> Ordering {
    a.cmp(b)
}

/// Compares a codepoint sequence with a null-terminated string.
///
/// Same result as decoding `cstr` with
/// [`from_cstr_lossy`](crate::from_cstr_lossy) and calling
/// [`cmp_codepoints`], but decodes lazily and allocates nothing.
#[must_use]
pub fn cmp_with_cstr(codepoints: &[u32], cstr: &CStr) -> Ordering {
    codepoints
        .iter()
        .copied()
        .cmp(Decoder::lossy(cstr.to_bytes()).flatten())
}

/// Compares a codepoint sequence with a `str`.
#[must_use]
pub fn cmp_with_str(codepoints: &[u32], s: &str) -> Ordering {
    codepoints.iter().copied().cmp(s.chars().map(u32::from))
}
