/*!
String unescaping.

This module decodes the body of a quoted literal that was escaped in either the
generic C-like style or as JSON, stopping at the first unescaped `"`.

This implementation follows the same basic design as `escape` for supporting a vectorized
and fallback implementation. Literal runs are copied using a block mask of `\` and `"`
bytes, and each escape sequence is decoded by the same parser regardless of how the
run before it was found.

Decoding never produces more bytes than it consumes. Literal bytes copy through one-to-one,
and the longest decoded sequence, a 4 byte UTF8 character, needs at least 10 bytes of input.
So an output buffer the same size as the input is always big enough.

Parsing stops at the first invalid escape sequence. The returned offsets point at its `\`,
so callers can report exactly where the input went wrong.
*/

mod fallback;
mod hex;
mod simd;

use std::fmt;

use crate::{
    error::UnescapeError,
    scan::{broadword::Broadword, ScanSimd},
    std_ext::char::{is_high_surrogate, is_low_surrogate, try_from_utf16_surrogate_pair},
};

/**
How a call to [`unescape`] finished.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnescapeStatus {
    /**
    The whole input was decoded without finding an unescaped `"`.
    */
    OkEndOfInput,
    /**
    An unescaped `"` was found and consumed.
    */
    OkTerminatingQuote,
    /**
    An escape sequence was unknown, malformed, or truncated.
    */
    InvalidEscapeSequence,
    /**
    A `\u` escape for a UTF-16 lead surrogate wasn't followed by a `\u` escape for a trailing surrogate.
    */
    LeadSurrogateWithoutTrailingSurrogate,
    /**
    A `\u` escape for a UTF-16 trailing surrogate wasn't preceded by a lead surrogate.
    */
    TrailingSurrogateWithoutLeadingSurrogate,
    /**
    A `\U` escape wasn't a valid Unicode scalar value.
    */
    CodePointOutOfRange,
}

impl UnescapeStatus {
    /**
    Whether the input was decoded successfully.
    */
    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(
            self,
            UnescapeStatus::OkEndOfInput | UnescapeStatus::OkTerminatingQuote
        )
    }
}

impl fmt::Display for UnescapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            UnescapeStatus::OkEndOfInput => "end of input",
            UnescapeStatus::OkTerminatingQuote => "terminating quote",
            UnescapeStatus::InvalidEscapeSequence => "invalid escape sequence",
            UnescapeStatus::LeadSurrogateWithoutTrailingSurrogate => {
                "lead surrogate without a trailing surrogate"
            }
            UnescapeStatus::TrailingSurrogateWithoutLeadingSurrogate => {
                "trailing surrogate without a lead surrogate"
            }
            UnescapeStatus::CodePointOutOfRange => "code point out of range",
        })
    }
}

/**
The result of a call to [`unescape`].

The offsets are valid whether or not the status is ok.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unescaped {
    /**
    How decoding finished.
    */
    pub status: UnescapeStatus,
    /**
    The number of bytes written to the output.
    */
    pub output_offset: usize,
    /**
    The number of bytes read from the input.

    If the status is an error then this is the offset of the `\` that started the
    invalid escape sequence. If the status is [`UnescapeStatus::OkTerminatingQuote`]
    then this is just past the quote.
    */
    pub input_offset: usize,
}

impl Unescaped {
    /**
    Convert a failed status into an error.
    */
    #[inline]
    pub fn into_result(self) -> Result<Unescaped, UnescapeError> {
        if self.status.is_ok() {
            Ok(self)
        } else {
            Err(UnescapeError::new(self.status, self.input_offset))
        }
    }
}

/**
Replacements for escapes that map to a single byte, indexed by the byte following the `\`.

A zero means the escape needs to be parsed some other way.
*/
const UNESCAPE_REPLACEMENTS: [u8; 128] = {
    let mut replacements = [0u8; 128];

    replacements[b'\\' as usize] = b'\\';
    replacements[b'"' as usize] = b'"';
    replacements[b'\'' as usize] = b'\'';
    // for JSON
    replacements[b'/' as usize] = b'/';
    replacements[b'a' as usize] = 0x07;
    replacements[b'b' as usize] = 0x08;
    replacements[b'e' as usize] = 0x1b;
    replacements[b'f' as usize] = 0x0c;
    replacements[b'n' as usize] = b'\n';
    replacements[b'r' as usize] = b'\r';
    replacements[b't' as usize] = b'\t';
    replacements[b'v' as usize] = 0x0b;

    replacements
};

/**
Unescape `src` into the start of `dst`.

`src` should begin just after the opening quote of a literal. Decoding stops at the first
unescaped `"`, at the end of the input, or at the first invalid escape sequence.

# Panics

This method panics if `dst` is shorter than `src`.
*/
pub fn unescape(dst: &mut [u8], src: &[u8]) -> Unescaped {
    assert!(
        dst.len() >= src.len(),
        "the destination buffer is too small to unescape {} bytes into",
        src.len()
    );

    // SAFETY: `dst` is at least as large as `src`
    unsafe { unescape_unchecked(dst, src) }
}

/**
Unescape `src` onto the end of `buf`.

The buffer is grown to fit the input first, then truncated to what was actually written.
If decoding fails, the bytes decoded before the invalid escape sequence are kept.
*/
pub fn unescape_append(buf: &mut Vec<u8>, src: &[u8]) -> Unescaped {
    let start = buf.len();
    buf.resize(start + src.len(), 0);

    let unescaped = unescape(&mut buf[start..], src);

    buf.truncate(start + unescaped.output_offset);

    unescaped
}

/**
Unescape `src` into a new buffer.

Decoding stops at the first unescaped `"`. Use [`unescape`] to find out how much
of the input was consumed.
*/
pub fn unescape_to_vec(src: &[u8]) -> Result<Vec<u8>, UnescapeError> {
    let mut buf = Vec::new();
    unescape_append(&mut buf, src).into_result()?;

    Ok(buf)
}

// used by tests, benches, and fuzzing
#[doc(hidden)]
pub fn unescape_fallback(dst: &mut [u8], src: &[u8]) -> Unescaped {
    assert!(
        dst.len() >= src.len(),
        "the destination buffer is too small to unescape {} bytes into",
        src.len()
    );

    // SAFETY: `dst` is at least as large as `src`
    unsafe { fallback::unescape(dst, src) }
}

// SAFETY: Callers must ensure `dst` is at least as large as `src`
#[inline]
unsafe fn unescape_unchecked(dst: &mut [u8], src: &[u8]) -> Unescaped {
    // when SIMD is available, we can vectorize
    #[cfg(target_arch = "x86_64")]
    {
        use crate::scan::simd::AVX2;

        if is_x86_feature_detected!("avx2") && src.len() >= AVX2::VECTORIZATION_THRESHOLD {
            // SAFETY: avx2 is available
            return simd::unescape_x86_64_avx2(dst, src);
        }
    }
    #[cfg(target_arch = "aarch64")]
    {
        use crate::scan::simd::Neon;

        if std::arch::is_aarch64_feature_detected!("neon")
            && src.len() >= Neon::VECTORIZATION_THRESHOLD
        {
            // SAFETY: neon is available
            return simd::unescape_aarch64_neon(dst, src);
        }
    }

    // when SIMD is not available, we can still vectorize through a `u64`
    if src.len() >= Broadword::VECTORIZATION_THRESHOLD {
        return simd::unescape::<Broadword>(dst, src);
    }

    // HEURISTIC: small inputs aren't worth vectorizing
    fallback::unescape(dst, src)
}

/**
The position of the unescaper in its input and output.
*/
#[derive(Debug, Default)]
struct Scan {
    /**
    The offset of the next byte to read.
    */
    input_offset: usize,
    /**
    The offset of the next byte to write.

    This is never greater than `input_offset`.
    */
    output_offset: usize,
}

impl Scan {
    #[inline(always)]
    fn end(self, status: UnescapeStatus) -> Unescaped {
        test_assert!(self.output_offset <= self.input_offset);

        Unescaped {
            status,
            output_offset: self.output_offset,
            input_offset: self.input_offset,
        }
    }

    #[inline(always)]
    fn end_quote(mut self) -> Unescaped {
        // the quote is consumed, but not copied
        self.input_offset += 1;
        self.end(UnescapeStatus::OkTerminatingQuote)
    }

    // SAFETY: Callers must ensure `dst` has room for the byte
    #[inline(always)]
    unsafe fn push_unescaped_byte(&mut self, dst: &mut [u8], b: u8) {
        *get_unchecked_mut!(dst, self.output_offset) = b;
        self.output_offset += 1;
    }

    // SAFETY: Callers must ensure `dst` has room for the encoded char
    #[inline]
    unsafe fn push_unescaped_char(&mut self, dst: &mut [u8], c: char) {
        let mut buf = [0; 4];

        let encoded = c.encode_utf8(&mut buf).as_bytes();
        copy_nonoverlapping!(encoded, 0, dst, self.output_offset, encoded.len());

        self.output_offset += encoded.len();
    }
}

/**
Parse the escape sequence whose `\` is at the current input offset.

On success, the decoded bytes are written and the scan is moved past the sequence.
On failure, the scan is left pointing at the `\`.
*/
// SAFETY: Callers must ensure `dst` is at least as large as `src`
#[inline]
unsafe fn parse_escape_sequence(
    dst: &mut [u8],
    src: &[u8],
    scan: &mut Scan,
) -> Result<(), UnescapeStatus> {
    test_assert_eq!(Some(&b'\\'), src.get(scan.input_offset));

    // skip over the `\`
    let mut input_offset = scan.input_offset + 1;

    let escaped = *src
        .get(input_offset)
        .ok_or(UnescapeStatus::InvalidEscapeSequence)?;
    input_offset += 1;

    let replacement = UNESCAPE_REPLACEMENTS
        .get(escaped as usize)
        .copied()
        .unwrap_or(0);

    if replacement != 0 {
        scan.push_unescaped_byte(dst, replacement);
        scan.input_offset = input_offset;

        return Ok(());
    }

    match escaped {
        b'x' => {
            let code = src
                .get(input_offset..input_offset + 2)
                .and_then(hex::convert_2xdigit)
                .ok_or(UnescapeStatus::InvalidEscapeSequence)?;
            input_offset += 2;

            scan.push_unescaped_byte(dst, code as u8);
        }
        b'0'..=b'7' => {
            // Parsers disagree on how to handle octal escapes that overflow a byte
            // `\400` is ` 0` in Node.js, but `\0` in Python
            // We take the Node.js approach: a third digit is only consumed
            // while the value is still below `0o40`, so it always fits in a byte
            let mut code = (escaped - b'0') as u32;

            if let Some(digit) = octal_digit(src, input_offset) {
                code = code * 8 + digit;
                input_offset += 1;

                if code < 0o40 {
                    if let Some(digit) = octal_digit(src, input_offset) {
                        code = code * 8 + digit;
                        input_offset += 1;
                    }
                }
            }

            test_assert!(code <= 0xff);
            scan.push_unescaped_byte(dst, code as u8);
        }
        b'u' => {
            let code = src
                .get(input_offset..input_offset + 4)
                .and_then(hex::convert_4xdigit)
                .ok_or(UnescapeStatus::InvalidEscapeSequence)?;
            input_offset += 4;

            let c = if is_high_surrogate(code) {
                // the trailing surrogate must immediately follow as another `\u` escape
                let low = match src.get(input_offset..input_offset + 6) {
                    Some([b'\\', b'u', digits @ ..]) => hex::convert_4xdigit(digits),
                    _ => None,
                };

                let c = low
                    .and_then(|low| try_from_utf16_surrogate_pair(code, low).ok())
                    .ok_or(UnescapeStatus::LeadSurrogateWithoutTrailingSurrogate)?;
                input_offset += 6;

                c
            } else if is_low_surrogate(code) {
                return Err(UnescapeStatus::TrailingSurrogateWithoutLeadingSurrogate);
            } else {
                char::from_u32(code).ok_or(UnescapeStatus::CodePointOutOfRange)?
            };

            scan.push_unescaped_char(dst, c);
        }
        b'U' => {
            let code = src
                .get(input_offset..input_offset + 8)
                .and_then(hex::convert_8xdigit)
                .ok_or(UnescapeStatus::InvalidEscapeSequence)?;
            input_offset += 8;

            // this also rejects surrogates, which can't be encoded as UTF8
            let c = char::from_u32(code).ok_or(UnescapeStatus::CodePointOutOfRange)?;

            scan.push_unescaped_char(dst, c);
        }
        _ => return Err(UnescapeStatus::InvalidEscapeSequence),
    }

    scan.input_offset = input_offset;

    Ok(())
}

#[inline(always)]
fn octal_digit(src: &[u8], offset: usize) -> Option<u32> {
    match src.get(offset) {
        Some(&b @ b'0'..=b'7') => Some((b - b'0') as u32),
        _ => None,
    }
}
