use std::io::{self, Write};

use crate::encode::encode_scalar;

const REPLACEMENT_UTF8: &[u8] = "\u{FFFD}".as_bytes();

/// Writes the text of `codepoints` to `w`, followed by `end`.
///
/// Values that are not scalars are written as U+FFFD. Output is staged in a
/// small buffer, so `w` sees few large writes rather than one per codepoint.
///
/// ```rust
/// let mut out = Vec::new();
/// codepoints::write_codepoints(&mut out, &[0x68, 0x69], "\n").unwrap();
/// assert_eq!(out, b"hi\n");
/// ```
///
/// # Errors
///
/// Propagates I/O errors from `w`.
pub fn write_codepoints<W: Write + ?Sized>(
    w: &mut W,
    codepoints: &[u32],
    end: &str,
) -> io::Result<()> {
    const STAGE: usize = 512;

    let mut stage = [0u8; STAGE];
    let mut filled = 0;
    let mut scratch = [0u8; 4];
    for &cp in codepoints {
        let bytes = encode_scalar(cp, &mut scratch).unwrap_or(REPLACEMENT_UTF8);
        if filled + bytes.len() > STAGE {
            w.write_all(&stage[..filled])?;
            filled = 0;
        }
        stage[filled..filled + bytes.len()].copy_from_slice(bytes);
        filled += bytes.len();
    }
    w.write_all(&stage[..filled])?;
    w.write_all(end.as_bytes())
}

/// Writes the text of `codepoints` to standard output, followed by `end`, and
/// flushes.
///
/// # Errors
///
/// Propagates I/O errors from stdout.
pub fn print_codepoints(codepoints: &[u32], end: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_codepoints(&mut stdout, codepoints, end)?;
    stdout.flush()
}
