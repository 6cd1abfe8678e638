/// What the decoder does with an ill-formed byte subsequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MalformedPolicy {
    /// Stop at the first ill-formed subsequence and report a
    /// [`DecodeError`](crate::DecodeError).
    #[default]
    Strict,
    /// Substitute U+FFFD for each maximal ill-formed subpart and keep going.
    ///
    /// This matches the "substitution of maximal subparts" practice described
    /// in the Unicode Standard §3.9, which is also what
    /// `String::from_utf8_lossy` does.
    Replace,
}

/// Configuration options for decoding UTF-8 into codepoints.
///
/// # Examples
///
/// ```rust
/// use codepoints::{DecodeOptions, Decoder, MalformedPolicy};
///
/// let options = DecodeOptions {
///     malformed: MalformedPolicy::Replace,
///     ..Default::default()
/// };
/// let decoded: Vec<u32> = Decoder::with_options(b"a\xFFb", options)
///     .map(|r| r.unwrap())
///     .collect();
/// assert_eq!(decoded, [0x61, 0xFFFD, 0x62]);
/// ```
///
/// # Default
///
/// Strict decoding with surrogates rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeOptions {
    /// Policy for ill-formed input.
    ///
    /// # Default
    ///
    /// [`MalformedPolicy::Strict`]
    pub malformed: MalformedPolicy,

    /// Whether to decode three-byte encodings of `U+D800..=U+DFFF` to their
    /// raw value.
    ///
    /// Such sequences are not UTF-8, but they show up in WTF-8 and in byte
    /// strings produced by encoders that pass lone surrogates through. When
    /// `false` they are ill-formed and handled by [`Self::malformed`].
    ///
    /// # Default
    ///
    /// `false`
    pub allow_surrogates: bool,
}

impl DecodeOptions {
    /// Options that never fail: ill-formed input becomes U+FFFD.
    #[must_use]
    pub const fn lossy() -> Self {
        Self {
            malformed: MalformedPolicy::Replace,
            allow_surrogates: false,
        }
    }
}
