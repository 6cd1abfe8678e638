//! C ABI over the `codepoints` crate.
//!
//! The surface mirrors a plain C header:
//!
//! ```c
//! uint64_t utf8_len(const void *buffer, uint64_t buffer_size);
//! void     utf8_codepoint(const void *buffer, uint64_t buffer_size,
//!                         uint32_t *codepoints, uint64_t codepoints_size);
//! void     utf8codepoints_to_cstr(const uint32_t *codepoints, uint64_t len, char **cstr);
//! void     cstr_to_utf8codepoints(const char *cstr, uint32_t **codepoints, uint64_t *len);
//! int32_t  cmp_utf8_codepoints(const uint32_t *a, uint64_t a_len,
//!                              const uint32_t *b, uint64_t b_len);
//! int32_t  cmp_utf8_with_cstr(const uint32_t *codepoints, uint64_t len, const char *cstr);
//! int64_t  utf8toi64(const uint32_t *codepoints, uint64_t len);
//! uint64_t utf8tou64(const uint32_t *codepoints, uint64_t len);
//! double   utf8tof64(const uint32_t *codepoints, uint64_t len);
//! void     print_utf8_codepoints(const uint32_t *codepoints, uint64_t len, const char *end);
//! void     utf8_free_cstr(char *cstr);
//! void     utf8_free_codepoints(uint32_t *codepoints, uint64_t len);
//! ```
//!
//! C has no error channel here, so the shim picks total behavior: decoding
//! replaces ill-formed bytes with U+FFFD, numeric parse failures return zero,
//! and comparisons return -1, 0 or 1. Strings and codepoint arrays handed out
//! by this library must be released with the matching `utf8_free_*` function.

use core::{cmp::Ordering, ffi::c_void, ptr, slice};
use std::ffi::{CStr, CString, c_char};

use codepoints::{DecodeOptions, ParseError};

/// Borrows `len` elements at `data`, or nothing for a null pointer or a length
/// that can't describe an allocation.
///
/// # Safety
///
/// If `data` is non-null it must be valid for reads of `len` elements for the
/// returned lifetime.
unsafe fn borrow<'a, T>(data: *const T, len: u64) -> &'a [T] {
    let Ok(len) = usize::try_from(len) else {
        log::warn!("length {len} exceeds the address space; treating as empty");
        return &[];
    };
    if data.is_null() || len == 0 {
        return &[];
    }
    // SAFETY: non-null and valid for `len` reads per the caller's contract.
    unsafe { slice::from_raw_parts(data, len) }
}

/// Borrows a C string, or `None` for a null pointer.
///
/// # Safety
///
/// `s` must be null or a valid NUL-terminated string.
unsafe fn borrow_cstr<'a>(s: *const c_char) -> Option<&'a CStr> {
    if s.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    Some(unsafe { CStr::from_ptr(s) })
}

fn ordering_to_c(ord: Ordering) -> i32 {
    match ord {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

fn zero_on_error<T: Default>(result: Result<T, ParseError>) -> T {
    result.unwrap_or_else(|err| {
        log::debug!("numeric parse failed, returning zero: {err}");
        T::default()
    })
}

/// Counts the codepoints in `buffer_size` bytes of UTF-8.
///
/// # Safety
///
/// `buffer` must be null or valid for reads of `buffer_size` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn utf8_len(buffer: *const c_void, buffer_size: u64) -> u64 {
    // SAFETY: forwarded caller contract.
    let bytes = unsafe { borrow(buffer.cast::<u8>(), buffer_size) };
    codepoints::utf8_len(bytes) as u64
}

/// Decodes up to `codepoints_size` codepoints from `buffer` into
/// `codepoints`. Ill-formed bytes decode to U+FFFD.
///
/// # Safety
///
/// `buffer` must be null or valid for reads of `buffer_size` bytes;
/// `codepoints` must be null or valid for writes of `codepoints_size`
/// elements. The two regions must not overlap.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn utf8_codepoint(
    buffer: *const c_void,
    buffer_size: u64,
    codepoints: *mut u32,
    codepoints_size: u64,
) {
    // SAFETY: forwarded caller contract.
    let bytes = unsafe { borrow(buffer.cast::<u8>(), buffer_size) };
    let Ok(capacity) = usize::try_from(codepoints_size) else {
        return;
    };
    if codepoints.is_null() || capacity == 0 {
        return;
    }
    // SAFETY: non-null, valid for `capacity` writes, disjoint from `bytes`.
    let dst = unsafe { slice::from_raw_parts_mut(codepoints, capacity) };
    // Replacing never fails.
    let _ = codepoints::decode_into_with(bytes, dst, DecodeOptions::lossy());
}

/// Encodes `codepoints_len` codepoints as a NUL-terminated UTF-8 string and
/// stores it in `*cstr`.
///
/// Non-scalar values are encoded as U+FFFD. A U+0000 ends the string early,
/// as it would for any C string. Release the result with
/// [`utf8_free_cstr`].
///
/// # Safety
///
/// `codepoints` must be null or valid for reads of `codepoints_len`
/// elements; `cstr` must be null or valid for a pointer write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn utf8codepoints_to_cstr(
    codepoints: *const u32,
    codepoints_len: u64,
    cstr: *mut *mut c_char,
) {
    if cstr.is_null() {
        return;
    }
    // SAFETY: forwarded caller contract.
    let cps = unsafe { borrow(codepoints, codepoints_len) };
    let mut bytes = codepoints::to_string_lossy(cps).into_bytes();
    if let Some(nul) = bytes.iter().position(|&b| b == 0) {
        bytes.truncate(nul);
    }
    let out = CString::new(bytes).map_or(ptr::null_mut(), CString::into_raw);
    // SAFETY: `cstr` is non-null and writable per the caller's contract.
    unsafe { cstr.write(out) };
}

/// Decodes a NUL-terminated string into a newly allocated codepoint array,
/// stored in `*codepoints` with its length in `*codepoints_len`.
///
/// A null `cstr` produces an empty array. Ill-formed bytes decode to U+FFFD.
/// Release the result with [`utf8_free_codepoints`].
///
/// # Safety
///
/// `cstr` must be null or a valid NUL-terminated string; `codepoints` and
/// `codepoints_len` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cstr_to_utf8codepoints(
    cstr: *const c_char,
    codepoints: *mut *mut u32,
    codepoints_len: *mut u64,
) {
    if codepoints.is_null() || codepoints_len.is_null() {
        return;
    }
    // SAFETY: forwarded caller contract.
    let decoded = unsafe { borrow_cstr(cstr) }
        .map(codepoints::from_cstr_lossy)
        .unwrap_or_default();
    let boxed = decoded.into_vec().into_boxed_slice();
    let len = boxed.len() as u64;
    let data = Box::into_raw(boxed).cast::<u32>();
    // SAFETY: both out-pointers are non-null and writable per the caller's
    // contract.
    unsafe {
        codepoints.write(data);
        codepoints_len.write(len);
    }
}

/// Compares two codepoint sequences by scalar value: -1, 0 or 1.
///
/// # Safety
///
/// Each pointer must be null or valid for reads of its length.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cmp_utf8_codepoints(
    codepoints1: *const u32,
    codepoints1_len: u64,
    codepoints2: *const u32,
    codepoints2_len: u64,
) -> i32 {
    // SAFETY: forwarded caller contract.
    let (a, b) = unsafe {
        (
            borrow(codepoints1, codepoints1_len),
            borrow(codepoints2, codepoints2_len),
        )
    };
    ordering_to_c(codepoints::cmp_codepoints(a, b))
}

/// Compares a codepoint sequence with a NUL-terminated string: -1, 0 or 1.
/// A null `cstr` compares as the empty string.
///
/// # Safety
///
/// `codepoints` must be null or valid for reads of `codepoints_len`
/// elements; `cstr` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cmp_utf8_with_cstr(
    codepoints: *const u32,
    codepoints_len: u64,
    cstr: *const c_char,
) -> i32 {
    // SAFETY: forwarded caller contract.
    let cps = unsafe { borrow(codepoints, codepoints_len) };
    // SAFETY: forwarded caller contract.
    let ord = match unsafe { borrow_cstr(cstr) } {
        Some(c) => codepoints::cmp_with_cstr(cps, c),
        None => codepoints::cmp_codepoints(cps, &[]),
    };
    ordering_to_c(ord)
}

/// Parses a signed decimal integer; zero when there is none or it overflows.
///
/// # Safety
///
/// `codepoints` must be null or valid for reads of `codepoints_len` elements.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn utf8toi64(codepoints: *const u32, codepoints_len: u64) -> i64 {
    // SAFETY: forwarded caller contract.
    zero_on_error(codepoints::parse_i64(unsafe { borrow(codepoints, codepoints_len) }))
}

/// Parses an unsigned decimal integer; zero when there is none, it is
/// negative, or it overflows.
///
/// # Safety
///
/// `codepoints` must be null or valid for reads of `codepoints_len` elements.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn utf8tou64(codepoints: *const u32, codepoints_len: u64) -> u64 {
    // SAFETY: forwarded caller contract.
    zero_on_error(codepoints::parse_u64(unsafe { borrow(codepoints, codepoints_len) }))
}

/// Parses a decimal float; zero when there is none or it overflows.
///
/// # Safety
///
/// `codepoints` must be null or valid for reads of `codepoints_len` elements.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn utf8tof64(codepoints: *const u32, codepoints_len: u64) -> f64 {
    // SAFETY: forwarded caller contract.
    zero_on_error(codepoints::parse_f64(unsafe { borrow(codepoints, codepoints_len) }))
}

/// Writes the text of a codepoint sequence to stdout followed by `end`.
/// A null `end` writes no terminator.
///
/// # Safety
///
/// `codepoints` must be null or valid for reads of `codepoints_len`
/// elements; `end` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn print_utf8_codepoints(
    codepoints: *const u32,
    codepoints_len: u64,
    end: *const c_char,
) {
    // SAFETY: forwarded caller contract.
    let cps = unsafe { borrow(codepoints, codepoints_len) };
    // SAFETY: forwarded caller contract.
    let end = unsafe { borrow_cstr(end) }.map(CStr::to_string_lossy);
    if let Err(err) = codepoints::print_codepoints(cps, end.as_deref().unwrap_or("")) {
        log::warn!("print_utf8_codepoints: {err}");
    }
}

/// Releases a string returned by [`utf8codepoints_to_cstr`]. Null is a no-op.
///
/// # Safety
///
/// `cstr` must be null or a pointer obtained from this library that has not
/// been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn utf8_free_cstr(cstr: *mut c_char) {
    if cstr.is_null() {
        return;
    }
    // SAFETY: produced by `CString::into_raw` and not yet freed.
    drop(unsafe { CString::from_raw(cstr) });
}

/// Releases an array returned by [`cstr_to_utf8codepoints`]. Null is a
/// no-op.
///
/// # Safety
///
/// `codepoints` must be null or a pointer obtained from this library, with
/// the length returned alongside it, that has not been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn utf8_free_codepoints(codepoints: *mut u32, codepoints_len: u64) {
    if codepoints.is_null() {
        return;
    }
    let Ok(len) = usize::try_from(codepoints_len) else {
        return;
    };
    // SAFETY: produced by `Box::<[u32]>::into_raw` with this length and not
    // yet freed.
    drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(codepoints, len)) });
}
