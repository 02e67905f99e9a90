/*!
String escaping.

This module converts raw bytes into the body of a quoted literal, either in a generic
C-like style or as JSON.

There are two implementations:

- a vectorized implementation that classifies whole blocks of input at once,
- and a byte-by-byte fallback implementation.

Both share the same function to emit an escape sequence for a single byte. The vectorized
implementation walks the set bits of each block's mask, copying the bytes between them
verbatim. See the `scan` module for how blocks are classified.

Escaping can't fail. Every byte either copies through or has an escape sequence, so the
only requirement is that the output has room for the worst case, which is every byte
being a control byte without a mnemonic.
*/

mod fallback;
mod simd;

use crate::scan::{broadword::Broadword, ScanSimd};

/**
The conventions to escape with.
*/
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapeStyle {
    /**
    C-like escaping.

    Control bytes without a mnemonic are written as `\xhh`.
    */
    #[default]
    Generic,
    /**
    JSON escaping.

    Control bytes without a mnemonic are written as `\u00hh`, and `/` is also escaped.
    */
    Json,
}

impl EscapeStyle {
    /**
    The most bytes escaping `len` bytes of input could produce.
    */
    #[inline]
    pub fn max_escaped_len(self, len: usize) -> usize {
        match self {
            // `\xhh`
            EscapeStyle::Generic => len.saturating_mul(4),
            // `\u00hh`
            EscapeStyle::Json => len.saturating_mul(6),
        }
    }
}

/**
Mnemonics for control bytes, indexed by the byte.

A zero means the byte needs a numeric escape.
`\v` isn't included because it's not universally accepted.
*/
const ESCAPE_MNEMONICS: [u8; 32] = {
    let mut mnemonics = [0u8; 32];

    mnemonics[0x08] = b'b';
    mnemonics[0x0c] = b'f';
    mnemonics[b'\n' as usize] = b'n';
    mnemonics[b'\r' as usize] = b'r';
    mnemonics[b'\t' as usize] = b't';

    mnemonics
};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/**
Escape `src` into the start of `dst`, returning the number of bytes written.

# Panics

This method panics if `dst` is shorter than [`EscapeStyle::max_escaped_len`] for `src`.
*/
pub fn escape(dst: &mut [u8], src: &[u8], style: EscapeStyle) -> usize {
    assert!(
        dst.len() >= style.max_escaped_len(src.len()),
        "the destination buffer is too small to escape {} bytes into",
        src.len()
    );

    // SAFETY: `dst` is large enough for any input
    unsafe { escape_unchecked(dst, src, style) }
}

/**
Escape `src` onto the end of `buf`.

The buffer is grown to fit the worst case first, then truncated to what was actually written.
*/
pub fn escape_append(buf: &mut Vec<u8>, src: &[u8], style: EscapeStyle) {
    if src.is_empty() {
        return;
    }

    let start = buf.len();
    buf.resize(start + style.max_escaped_len(src.len()), 0);

    let written = escape(&mut buf[start..], src, style);

    buf.truncate(start + written);
}

/**
Escape `src` into a new buffer.
*/
pub fn escape_to_vec(src: &[u8], style: EscapeStyle) -> Vec<u8> {
    let mut buf = Vec::new();
    escape_append(&mut buf, src, style);

    buf
}

/**
Escape `src` into a new string.
*/
pub fn escape_to_string(src: &str, style: EscapeStyle) -> String {
    let buf = escape_to_vec(src.as_bytes(), style);

    // escape sequences are ASCII, and anything else is copied through
    // as-is, so if the input is valid UTF8 then so is the output
    owned_from_utf8_unchecked!(buf)
}

// used by tests, benches, and fuzzing
#[doc(hidden)]
pub fn escape_fallback(dst: &mut [u8], src: &[u8], style: EscapeStyle) -> usize {
    assert!(
        dst.len() >= style.max_escaped_len(src.len()),
        "the destination buffer is too small to escape {} bytes into",
        src.len()
    );

    // SAFETY: `dst` is large enough for any input
    unsafe { fallback::escape(dst, src, style) }
}

// SAFETY: Callers must ensure `dst` is at least `max_escaped_len` for `src`
#[inline]
unsafe fn escape_unchecked(dst: &mut [u8], src: &[u8], style: EscapeStyle) -> usize {
    // when SIMD is available, we can vectorize
    #[cfg(target_arch = "x86_64")]
    {
        use crate::scan::simd::AVX2;

        if is_x86_feature_detected!("avx2") && src.len() >= AVX2::VECTORIZATION_THRESHOLD {
            // SAFETY: avx2 is available
            return simd::escape_x86_64_avx2(dst, src, style);
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        use crate::scan::simd::Neon;

        if std::arch::is_aarch64_feature_detected!("neon")
            && src.len() >= Neon::VECTORIZATION_THRESHOLD
        {
            // SAFETY: neon is available
            return simd::escape_aarch64_neon(dst, src, style);
        }
    }

    // when SIMD is not available, we can still vectorize through a `u64`
    if src.len() >= Broadword::VECTORIZATION_THRESHOLD {
        return simd::escape::<Broadword>(dst, src, style);
    }

    // HEURISTIC: small inputs aren't worth vectorizing
    fallback::escape(dst, src, style)
}

/**
Write the escape sequence for `b` at `output_offset`, returning the offset after it.
*/
// SAFETY: Callers must ensure `dst` has at least 6 bytes from `output_offset`
#[inline(always)]
unsafe fn escape_byte(dst: &mut [u8], output_offset: usize, b: u8, style: EscapeStyle) -> usize {
    let mut w = output_offset;

    let mut push = |b: u8| {
        *get_unchecked_mut!(dst, w) = b;
        w += 1;
    };

    push(b'\\');

    if b < 0x20 {
        let mnemonic = *get_unchecked!(ESCAPE_MNEMONICS, b as usize);

        if mnemonic != 0 {
            push(mnemonic);
        } else {
            match style {
                EscapeStyle::Generic => push(b'x'),
                EscapeStyle::Json => {
                    push(b'u');
                    push(b'0');
                    push(b'0');
                }
            }

            push(*get_unchecked!(HEX_DIGITS, (b >> 4) as usize));
            push(*get_unchecked!(HEX_DIGITS, (b & 0x0f) as usize));
        }
    } else {
        // `\`, `"`, and `/` are escaped as themselves
        push(b);
    }

    w
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escape_all(b: u8, style: EscapeStyle) -> String {
        let mut dst = [0u8; 6];
        let written = unsafe { escape_byte(&mut dst, 0, b, style) };

        String::from_utf8(dst[..written].to_vec()).unwrap()
    }

    #[test]
    fn escape_mnemonics() {
        assert_eq!("\\b", escape_all(0x08, EscapeStyle::Generic));
        assert_eq!("\\f", escape_all(0x0c, EscapeStyle::Generic));
        assert_eq!("\\n", escape_all(b'\n', EscapeStyle::Json));
        assert_eq!("\\r", escape_all(b'\r', EscapeStyle::Json));
        assert_eq!("\\t", escape_all(b'\t', EscapeStyle::Generic));
    }

    #[test]
    fn escape_vertical_tab_is_numeric() {
        assert_eq!("\\x0b", escape_all(0x0b, EscapeStyle::Generic));
        assert_eq!("\\u000b", escape_all(0x0b, EscapeStyle::Json));
    }

    #[test]
    fn escape_numeric_is_lowercase() {
        assert_eq!("\\x1f", escape_all(0x1f, EscapeStyle::Generic));
        assert_eq!("\\u001f", escape_all(0x1f, EscapeStyle::Json));
        assert_eq!("\\x00", escape_all(0x00, EscapeStyle::Generic));
    }

    #[test]
    fn escape_self() {
        assert_eq!("\\\\", escape_all(b'\\', EscapeStyle::Generic));
        assert_eq!("\\\"", escape_all(b'"', EscapeStyle::Json));
        assert_eq!("\\/", escape_all(b'/', EscapeStyle::Json));
    }

    #[test]
    fn max_escaped_len_is_worst_case() {
        for style in [EscapeStyle::Generic, EscapeStyle::Json] {
            let worst = escape_all(0x01, style).len();

            assert_eq!(worst * 3, style.max_escaped_len(3));
        }
    }

    #[test]
    fn max_escaped_len_saturates() {
        assert_eq!(usize::MAX, EscapeStyle::Json.max_escaped_len(usize::MAX / 2));
    }

    #[test]
    #[should_panic]
    fn escape_into_small_buffer() {
        let mut dst = [0u8; 5];
        escape(&mut dst, b"a", EscapeStyle::Json);
    }
}
