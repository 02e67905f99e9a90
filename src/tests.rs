use std::{iter, panic, panic::AssertUnwindSafe};

use crate::{escape_fallback, unescape_fallback, EscapeStyle, Unescaped};

mod some;

const STYLES: [EscapeStyle; 2] = [EscapeStyle::Generic, EscapeStyle::Json];

fn test_alignment(input: &[u8], align_up_to: usize, mut f: impl FnMut(&[u8])) {
    for align in 0..align_up_to {
        let mut buf = Vec::<u8>::with_capacity(input.len() + (align_up_to * 4));

        let pad = buf.as_ptr().align_offset(align_up_to) + align_up_to + align;
        buf.extend(iter::repeat(0u8).take(pad));

        let start_alignment =
            unsafe { (buf.last_mut().unwrap() as *mut u8).offset(1) }.align_offset(align_up_to);
        if align == 0 {
            assert_eq!(0, start_alignment);
        } else {
            assert_eq!(align_up_to - align, start_alignment);
        }

        buf.extend(input);

        if panic::catch_unwind(AssertUnwindSafe(|| f(&buf[pad..]))).is_err() {
            panic!("failed at alignment {}", align);
        }
    }
}

fn escape_to_vec_fallback(src: &[u8], style: EscapeStyle) -> Vec<u8> {
    let mut dst = vec![0; style.max_escaped_len(src.len())];

    let written = escape_fallback(&mut dst, src, style);
    dst.truncate(written);

    dst
}

fn unescape_to_vec_fallback(src: &[u8]) -> (Vec<u8>, Unescaped) {
    let mut dst = vec![0; src.len()];

    let unescaped = unescape_fallback(&mut dst, src);
    dst.truncate(unescaped.output_offset);

    (dst, unescaped)
}

fn unescape_to_vec_simd(src: &[u8]) -> (Vec<u8>, Unescaped) {
    let mut dst = Vec::new();

    let unescaped = crate::unescape_append(&mut dst, src);

    (dst, unescaped)
}
