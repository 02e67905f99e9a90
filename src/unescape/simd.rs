use super::*;

use crate::scan;

// SAFETY: Callers must ensure `dst` is at least as large as `src`
// SAFETY: Callers must ensure AVX2 is available
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub(super) unsafe fn unescape_x86_64_avx2(dst: &mut [u8], src: &[u8]) -> Unescaped {
    unescape::<scan::simd::AVX2>(dst, src)
}

// SAFETY: Callers must ensure `dst` is at least as large as `src`
// SAFETY: Callers must ensure Neon is available
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(super) unsafe fn unescape_aarch64_neon(dst: &mut [u8], src: &[u8]) -> Unescaped {
    unescape::<scan::simd::Neon>(dst, src)
}

// SAFETY: Callers must ensure `dst` is at least as large as `src`
// SAFETY: Callers must ensure `S` is available
#[inline(always)]
pub(super) unsafe fn unescape<S: ScanSimd>(dst: &mut [u8], src: &[u8]) -> Unescaped {
    let mut scan = Scan::default();

    loop {
        match copy_literal::<S>(dst, src, &mut scan) {
            None => return scan.end(UnescapeStatus::OkEndOfInput),
            Some(b'"') => return scan.end_quote(),
            Some(_) => {
                if let Err(status) = parse_escape_sequence(dst, src, &mut scan) {
                    return scan.end(status);
                }
            }
        }
    }
}

/**
Copy bytes until the next `\` or `"`, returning it.

Whole blocks without either are copied at once.
*/
// SAFETY: Callers must ensure `dst` is at least as large as `src`
// SAFETY: Callers must ensure `S` is available
#[inline(always)]
unsafe fn copy_literal<S: ScanSimd>(dst: &mut [u8], src: &[u8], scan: &mut Scan) -> Option<u8> {
    'block: while scan.input_offset < src.len() {
        // the last block may be partial, in which case any bits past the end
        // of the input are cleared so they're never considered
        let (block, valid) = scan::load_block::<S>(src, scan.input_offset);
        let mask = scan::mask_to(S::mask_quote_escape(block), valid);

        // copy up to the first `\` or `"`, or the whole block if there isn't one
        let cnt = if mask == 0 {
            valid
        } else {
            mask.trailing_zeros() as usize
        };
        test_assert!(cnt <= valid);

        copy_nonoverlapping!(src, scan.input_offset, dst, scan.output_offset, cnt);
        scan.input_offset += cnt;
        scan.output_offset += cnt;

        if mask != 0 {
            return Some(*get_unchecked!(src, scan.input_offset));
        }
    }

    None
}
