#![cfg(unstable)]
#![feature(test)]
extern crate test;

use squirrel_escape::{
    escape, escape_fallback, escape_to_string, unescape, unescape_fallback, EscapeStyle,
};

use std::str;

#[bench]
fn escape_10kb_stacktrace_simd(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/10kb_stacktrace.txt");
    let mut dst = vec![0; EscapeStyle::Json.max_escaped_len(input.len())];

    b.bytes = input.len() as u64;
    b.iter(|| escape(&mut dst, input, EscapeStyle::Json))
}

#[bench]
fn escape_10kb_stacktrace_fallback(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/10kb_stacktrace.txt");
    let mut dst = vec![0; EscapeStyle::Json.max_escaped_len(input.len())];

    b.bytes = input.len() as u64;
    b.iter(|| escape_fallback(&mut dst, input, EscapeStyle::Json))
}

#[bench]
fn escape_10kb_stacktrace_to_string(b: &mut test::Bencher) {
    let input = include_str!("../cases/10kb_stacktrace.txt");

    b.bytes = input.len() as u64;
    b.iter(|| escape_to_string(input, EscapeStyle::Json))
}

#[bench]
fn escape_10kb_stacktrace_serde_json(b: &mut test::Bencher) {
    let input = include_str!("../cases/10kb_stacktrace.txt");

    b.bytes = input.len() as u64;
    b.iter(|| serde_json::to_string(input).unwrap())
}

#[bench]
fn escape_10kb_stacktrace_json(b: &mut test::Bencher) {
    let input = include_str!("../cases/10kb_stacktrace.txt");

    b.bytes = input.len() as u64;
    b.iter(|| json::stringify(input))
}

#[bench]
fn escape_600b_no_escape_simd(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_no_escape.txt");
    let mut dst = vec![0; EscapeStyle::Generic.max_escaped_len(input.len())];

    b.bytes = input.len() as u64;
    b.iter(|| escape(&mut dst, input, EscapeStyle::Generic))
}

#[bench]
fn escape_600b_no_escape_fallback(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_no_escape.txt");
    let mut dst = vec![0; EscapeStyle::Generic.max_escaped_len(input.len())];

    b.bytes = input.len() as u64;
    b.iter(|| escape_fallback(&mut dst, input, EscapeStyle::Generic))
}

#[bench]
fn unescape_10kb_stacktrace_simd(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/10kb_stacktrace_escaped.txt");
    let mut dst = vec![0; input.len()];

    b.bytes = input.len() as u64;
    b.iter(|| unescape(&mut dst, input))
}

#[bench]
fn unescape_10kb_stacktrace_fallback(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/10kb_stacktrace_escaped.txt");
    let mut dst = vec![0; input.len()];

    b.bytes = input.len() as u64;
    b.iter(|| unescape_fallback(&mut dst, input))
}

#[bench]
fn unescape_10kb_stacktrace_serde_json(b: &mut test::Bencher) {
    let input = format!(
        "\"{}\"",
        include_str!("../cases/10kb_stacktrace_escaped.txt")
    );

    b.bytes = input.len() as u64;
    b.iter(|| {
        let v: String = serde_json::from_str(&input).unwrap();
        v
    })
}

#[bench]
fn unescape_10kb_stacktrace_json(b: &mut test::Bencher) {
    let input = format!(
        "\"{}\"",
        include_str!("../cases/10kb_stacktrace_escaped.txt")
    );

    b.bytes = input.len() as u64;
    b.iter(|| {
        let v: json::JsonValue = json::parse(&input).unwrap();
        v
    })
}

#[bench]
fn unescape_10kb_stacktrace_simd_json(b: &mut test::Bencher) {
    let input = format!(
        "\"{}\"",
        include_str!("../cases/10kb_stacktrace_escaped.txt")
    );

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut input = input.as_bytes().to_vec();
        let v = simd_json::to_borrowed_value(&mut input).unwrap();
        test::black_box(v);
    })
}

#[bench]
fn unescape_600b_no_escape_simd(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_no_escape.txt");
    let mut dst = vec![0; input.len()];

    b.bytes = input.len() as u64;
    b.iter(|| unescape(&mut dst, input))
}

#[bench]
fn unescape_600b_no_escape_fallback(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_no_escape.txt");
    let mut dst = vec![0; input.len()];

    b.bytes = input.len() as u64;
    b.iter(|| unescape_fallback(&mut dst, input))
}

#[bench]
fn unescape_600b_no_escape_validate_utf8(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/600b_no_escape.txt");

    b.bytes = input.len() as u64;
    b.iter(|| str::from_utf8(input).is_ok())
}
