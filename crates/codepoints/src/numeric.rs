//! Numeric literals over codepoint sequences.
//!
//! Grammar, all over ASCII codepoints:
//!
//! ```text
//! integer  = ["-"] digit+
//! float    = ["-"] (digit+ ["." digit*] | "." digit+) [exponent]
//! exponent = ("e" | "E") ["+" | "-"] digit+
//! ```
//!
//! A literal ends at the first codepoint that can't extend it; anything after
//! that is ignored. An exponent marker that isn't followed by digits is not
//! part of the literal, so `"2e"` lexes as the integer `2`.

use alloc::string::String;

use crate::{ParseError, ParseErrorKind};

const MINUS: u32 = '-' as u32;
const PLUS: u32 = '+' as u32;
const DOT: u32 = '.' as u32;

/// Lexical hint so callers can distinguish ints from floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLexeme<'a> {
    /// No `.` and no exponent.
    Integer(&'a [u32]),
    /// Has a `.` or an exponent.
    Float(&'a [u32]),
}

impl<'a> NumberLexeme<'a> {
    /// The codepoints of the literal.
    #[must_use]
    pub fn as_slice(&self) -> &'a [u32] {
        match *self {
            Self::Integer(s) | Self::Float(s) => s,
        }
    }

    /// Number of codepoints the literal spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Always `false`: a lexeme holds at least one digit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

#[inline]
fn digit(cp: u32) -> Option<u32> {
    cp.checked_sub(u32::from(b'0')).filter(|&d| d < 10)
}

#[inline]
fn digits_from(cps: &[u32], from: usize) -> usize {
    cps.get(from..)
        .map_or(0, |rest| rest.iter().take_while(|&&cp| digit(cp).is_some()).count())
}

#[inline]
fn is_exponent_marker(cp: u32) -> bool {
    cp == u32::from(b'e') || cp == u32::from(b'E')
}

/// Finds the longest numeric literal at the start of `codepoints`.
///
/// Returns `None` when there is no digit where one is required.
///
/// ```rust
/// use codepoints::{lex_number, NumberLexeme};
///
/// let text: Vec<u32> = "-1.5e3px".chars().map(u32::from).collect();
/// assert_eq!(lex_number(&text), Some(NumberLexeme::Float(&text[..6])));
/// ```
#[must_use]
pub fn lex_number(codepoints: &[u32]) -> Option<NumberLexeme<'_>> {
    let mut end = usize::from(codepoints.first() == Some(&MINUS));
    let int_digits = digits_from(codepoints, end);
    end += int_digits;

    let mut is_float = false;
    if codepoints.get(end) == Some(&DOT) {
        let frac_digits = digits_from(codepoints, end + 1);
        if int_digits + frac_digits == 0 {
            return None;
        }
        end += 1 + frac_digits;
        is_float = true;
    } else if int_digits == 0 {
        return None;
    }

    if codepoints.get(end).copied().is_some_and(is_exponent_marker) {
        let mut exp = end + 1;
        if matches!(codepoints.get(exp), Some(&PLUS | &MINUS)) {
            exp += 1;
        }
        let exp_digits = digits_from(codepoints, exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
            is_float = true;
        }
    }

    let lexeme = &codepoints[..end];
    Some(if is_float {
        NumberLexeme::Float(lexeme)
    } else {
        NumberLexeme::Integer(lexeme)
    })
}

/// Parses a decimal unsigned integer.
///
/// # Errors
///
/// - [`ParseErrorKind::Empty`] for an empty sequence.
/// - [`ParseErrorKind::NegativeUnsigned`] for a leading `-`.
/// - [`ParseErrorKind::NoDigits`] when the first codepoint is not a digit.
/// - [`ParseErrorKind::Overflow`] above `u64::MAX`, at the offending digit.
pub fn parse_u64(codepoints: &[u32]) -> Result<u64, ParseError> {
    match codepoints.first() {
        None => return Err(ParseError::new(0, ParseErrorKind::Empty)),
        Some(&MINUS) => return Err(ParseError::new(0, ParseErrorKind::NegativeUnsigned)),
        Some(_) => {}
    }
    let len = digits_from(codepoints, 0);
    if len == 0 {
        return Err(ParseError::new(0, ParseErrorKind::NoDigits));
    }
    accumulate(&codepoints[..len], 0, |acc: u64, d| {
        acc.checked_mul(10)?.checked_add(u64::from(d))
    })
}

/// Parses a decimal signed integer with an optional leading `-`.
///
/// `i64::MIN` is accepted.
///
/// # Errors
///
/// - [`ParseErrorKind::Empty`] for an empty sequence.
/// - [`ParseErrorKind::NoDigits`] when no digit follows the optional sign.
/// - [`ParseErrorKind::Overflow`] outside the `i64` range, at the offending
///   digit.
pub fn parse_i64(codepoints: &[u32]) -> Result<i64, ParseError> {
    if codepoints.is_empty() {
        return Err(ParseError::new(0, ParseErrorKind::Empty));
    }
    let negative = codepoints[0] == MINUS;
    let start = usize::from(negative);
    let len = digits_from(codepoints, start);
    if len == 0 {
        return Err(ParseError::new(start, ParseErrorKind::NoDigits));
    }
    let digits = &codepoints[start..start + len];
    // Accumulate toward the sign so i64::MIN does not overflow.
    if negative {
        accumulate(digits, start, |acc: i64, d| {
            acc.checked_mul(10)?.checked_sub(i64::from(d))
        })
    } else {
        accumulate(digits, start, |acc: i64, d| {
            acc.checked_mul(10)?.checked_add(i64::from(d))
        })
    }
}

fn accumulate<T: Default>(
    digits: &[u32],
    offset: usize,
    step: impl Fn(T, u32) -> Option<T>,
) -> Result<T, ParseError> {
    digits.iter().enumerate().try_fold(T::default(), |acc, (i, &cp)| {
        // `digits` only holds codepoints that passed `digit`.
        let d = cp - u32::from(b'0');
        step(acc, d).ok_or(ParseError::new(offset + i, ParseErrorKind::Overflow))
    })
}

/// Parses a decimal floating-point literal.
///
/// Integers are accepted. Rounding follows `str::parse::<f64>`, which is
/// correctly rounded.
///
/// # Errors
///
/// - [`ParseErrorKind::Empty`] for an empty sequence.
/// - [`ParseErrorKind::NoDigits`] when no literal starts the sequence.
/// - [`ParseErrorKind::Overflow`] when the value is too large to be finite.
pub fn parse_f64(codepoints: &[u32]) -> Result<f64, ParseError> {
    if codepoints.is_empty() {
        return Err(ParseError::new(0, ParseErrorKind::Empty));
    }
    let start = usize::from(codepoints[0] == MINUS);
    let lexeme = lex_number(codepoints).ok_or(ParseError::new(start, ParseErrorKind::NoDigits))?;

    // Every codepoint in a lexeme is ASCII.
    let text: String = lexeme
        .as_slice()
        .iter()
        .filter_map(|&cp| char::from_u32(cp))
        .collect();
    let value: f64 = text
        .parse()
        .map_err(|_| ParseError::new(start, ParseErrorKind::NoDigits))?;
    if value.is_infinite() {
        return Err(ParseError::new(start, ParseErrorKind::Overflow));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;

    fn cps(s: &str) -> Vec<u32> {
        s.chars().map(u32::from).collect()
    }

    #[rstest]
    #[case("0", 0)]
    #[case("42", 42)]
    #[case("007", 7)]
    #[case("12abc", 12)]
    #[case("3.9", 3)]
    #[case("18446744073709551615", u64::MAX)]
    fn parses_u64(#[case] text: &str, #[case] expected: u64) {
        assert_eq!(parse_u64(&cps(text)), Ok(expected));
    }

    #[rstest]
    #[case("", 0, ParseErrorKind::Empty)]
    #[case("-1", 0, ParseErrorKind::NegativeUnsigned)]
    #[case("x1", 0, ParseErrorKind::NoDigits)]
    #[case("+1", 0, ParseErrorKind::NoDigits)]
    #[case("18446744073709551616", 19, ParseErrorKind::Overflow)]
    fn rejects_u64(#[case] text: &str, #[case] offset: usize, #[case] kind: ParseErrorKind) {
        assert_eq!(parse_u64(&cps(text)), Err(ParseError { offset, kind }));
    }

    #[rstest]
    #[case("-42", -42)]
    #[case("42", 42)]
    #[case("-0", 0)]
    #[case("9223372036854775807", i64::MAX)]
    #[case("-9223372036854775808", i64::MIN)]
    #[case("-12-3", -12)]
    fn parses_i64(#[case] text: &str, #[case] expected: i64) {
        assert_eq!(parse_i64(&cps(text)), Ok(expected));
    }

    #[rstest]
    #[case("", 0, ParseErrorKind::Empty)]
    #[case("-", 1, ParseErrorKind::NoDigits)]
    #[case("--1", 1, ParseErrorKind::NoDigits)]
    #[case("abc", 0, ParseErrorKind::NoDigits)]
    #[case("9223372036854775808", 18, ParseErrorKind::Overflow)]
    #[case("-9223372036854775809", 19, ParseErrorKind::Overflow)]
    fn rejects_i64(#[case] text: &str, #[case] offset: usize, #[case] kind: ParseErrorKind) {
        assert_eq!(parse_i64(&cps(text)), Err(ParseError { offset, kind }));
    }

    #[rstest]
    #[case("2.75", 2.75)]
    #[case("-0.5", -0.5)]
    #[case("10", 10.0)]
    #[case("5.", 5.0)]
    #[case(".25", 0.25)]
    #[case("-.25", -0.25)]
    #[case("1e3", 1000.0)]
    #[case("1E-2", 0.01)]
    #[case("2.5e+1", 25.0)]
    #[case("2e", 2.0)]
    #[case("7e+x", 7.0)]
    #[case("1.5kg", 1.5)]
    fn parses_f64(#[case] text: &str, #[case] expected: f64) {
        let got = parse_f64(&cps(text)).unwrap();
        assert!((got - expected).abs() < 1e-12, "{text}: {got} != {expected}");
    }

    #[rstest]
    #[case("", 0, ParseErrorKind::Empty)]
    #[case(".", 0, ParseErrorKind::NoDigits)]
    #[case("-.", 1, ParseErrorKind::NoDigits)]
    #[case("e5", 0, ParseErrorKind::NoDigits)]
    #[case("1e999", 0, ParseErrorKind::Overflow)]
    fn rejects_f64(#[case] text: &str, #[case] offset: usize, #[case] kind: ParseErrorKind) {
        assert_eq!(parse_f64(&cps(text)), Err(ParseError { offset, kind }));
    }

    #[test]
    fn lexeme_classification() {
        let int = cps("123,");
        assert_eq!(lex_number(&int), Some(NumberLexeme::Integer(&int[..3])));
        let float = cps("1.0]");
        assert_eq!(lex_number(&float), Some(NumberLexeme::Float(&float[..3])));
        let exp = cps("1e9");
        assert_eq!(lex_number(&exp).map(|l| l.len()), Some(3));
        assert_eq!(lex_number(&cps("-")), None);
    }

    #[test]
    fn non_ascii_digits_are_not_digits() {
        // ARABIC-INDIC DIGIT ONE, FULLWIDTH DIGIT ONE
        assert!(parse_u64(&[0x661]).is_err());
        assert!(parse_u64(&[0xFF11]).is_err());
    }

    #[test]
    fn huge_negative_exponent_underflows_to_zero() {
        assert_eq!(parse_f64(&cps("1e-999")), Ok(0.0));
    }
}
