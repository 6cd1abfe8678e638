use alloc::{ffi::CString, vec::Vec};
use core::cmp::Ordering;

use quickcheck::QuickCheck;
use quickcheck_macros::quickcheck;

use super::{
    arbitrary::{DamagedUtf8, Text},
    quickcheck_tests,
};
use crate::{cmp_codepoints, cmp_with_cstr, from_cstr_lossy};

/// Property: comparison is antisymmetric and transitive, and extending a
/// sequence orders it after the original.
#[test]
fn total_order_quickcheck() {
    fn prop(a: Text, b: Text, c: Text) -> bool {
        let (a, b, c) = (&a.0[..], &b.0[..], &c.0[..]);
        let antisymmetric = cmp_codepoints(a, b) == cmp_codepoints(b, a).reverse();
        let reflexive = cmp_codepoints(a, a) == Ordering::Equal;
        let transitive = !(cmp_codepoints(a, b).is_le() && cmp_codepoints(b, c).is_le())
            || cmp_codepoints(a, c).is_le();
        let mut longer = a.to_vec();
        longer.push(0x41);
        let prefix = cmp_codepoints(&longer, a) == Ordering::Greater;
        antisymmetric && reflexive && transitive && prefix
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Text, Text, Text) -> bool);
}

/// Property: comparing against a C string equals decoding it first, even
/// when the C string holds ill-formed bytes.
#[test]
fn cstr_comparison_quickcheck() {
    fn prop(seq: Text, raw: DamagedUtf8) -> bool {
        let bytes: Vec<u8> = raw.0.into_iter().filter(|&b| b != 0).collect();
        let cstr = CString::new(bytes).unwrap();
        let decoded = from_cstr_lossy(&cstr);
        // Also compare against a prefix of the decoded text so `Equal` and the
        // prefix rule are exercised, not only random orderings.
        let half = &decoded[..decoded.len() / 2];
        cmp_with_cstr(&seq.0, &cstr) == cmp_codepoints(&seq.0, &decoded)
            && cmp_with_cstr(half, &cstr) == cmp_codepoints(half, &decoded)
            && cmp_with_cstr(&decoded, &cstr) == Ordering::Equal
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Text, DamagedUtf8) -> bool);
}

#[quickcheck]
fn equal_sequences_compare_equal_to_their_cstring(text: Text) -> bool {
    let cstr = crate::to_cstring(&text.0).unwrap();
    cmp_with_cstr(&text.0, &cstr) == Ordering::Equal
}
