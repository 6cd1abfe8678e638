#![allow(missing_docs)]

use core::fmt::Write;

use codepoints::{
    DecodeOptions, Decoder, decode, parse_f64, parse_i64, parse_u64, to_cstring, write_codepoints,
};

fn render(cps: &[u32], end: &str) -> String {
    let mut out = Vec::new();
    write_codepoints(&mut out, cps, end).expect("write to Vec");
    String::from_utf8(out).expect("printed text is UTF-8")
}

fn cps(s: &str) -> Vec<u32> {
    s.chars().map(u32::from).collect()
}

#[test]
fn snapshot_print_terminators() {
    insta::assert_snapshot!(render(&cps("hi"), " <end>"), @"hi <end>");
    insta::assert_snapshot!(render(&cps("hi"), ""), @"hi");
    insta::assert_snapshot!(render(&cps("a, b"), " | end"), @"a, b | end");
    insta::assert_snapshot!(render(&[0x61, 0xD800, 0x62], ""), @"a�b");
}

#[test]
fn print_hi_with_newline_is_exact() {
    let mut out = Vec::new();
    write_codepoints(&mut out, &cps("hi"), "\n").unwrap();
    assert_eq!(out, b"hi\n");
}

#[test]
fn snapshot_decode_errors() {
    let inputs: [&[u8]; 7] = [
        b"\x80",
        b"\xC0\xAF",
        b"\xE2\x82",
        b"\xED\xA0\x80",
        b"\xF4\x90\x80\x80",
        b"\xFE",
        b"ok\xF0\x9F\x98!",
    ];
    let mut out = String::new();
    for input in inputs {
        writeln!(out, "{:02X?} => {}", input, decode(input).unwrap_err()).unwrap();
    }
    insta::assert_snapshot!(out, @r"
    [80] => unexpected continuation byte 0x80 at offset 0
    [C0, AF] => overlong encoding at offset 0
    [E2, 82] => truncated sequence: expected 3 bytes, found 2 at offset 0
    [ED, A0, 80] => encoded surrogate at offset 0
    [F4, 90, 80, 80] => codepoint above U+10FFFF at offset 0
    [FE] => invalid leading byte 0xFE at offset 0
    [6F, 6B, F0, 9F, 98, 21] => truncated sequence: expected 4 bytes, found 3 at offset 2
    ");
}

#[test]
fn snapshot_lossy_decoding() {
    let input = b"a\xFF\xE2\x82b\xF0\x9F\x98\x80";
    let decoded: Vec<String> = Decoder::with_options(input, DecodeOptions::lossy())
        .map(|r| format!("U+{:04X}", r.unwrap()))
        .collect();
    insta::assert_snapshot!(decoded.join(" "), @"U+0061 U+FFFD U+FFFD U+0062 U+1F600");
}

#[test]
fn snapshot_parse_errors() {
    let mut out = String::new();
    writeln!(out, "{}", parse_u64(&cps("-7")).unwrap_err()).unwrap();
    writeln!(out, "{}", parse_u64(&cps("99999999999999999999")).unwrap_err()).unwrap();
    writeln!(out, "{}", parse_i64(&cps("-x")).unwrap_err()).unwrap();
    writeln!(out, "{}", parse_f64(&cps("")).unwrap_err()).unwrap();
    writeln!(out, "{}", to_cstring(&[0x61, 0]).unwrap_err()).unwrap();
    insta::assert_snapshot!(out, @r"
    negative value for unsigned integer at offset 0
    number too large at offset 19
    no digits at offset 1
    empty input at offset 0
    interior NUL at index 1
    ");
}
