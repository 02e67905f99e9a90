use super::*;

use crate::scan;

// SAFETY: Callers must ensure `dst` is at least `max_escaped_len` for `src`
// SAFETY: Callers must ensure AVX2 is available
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub(super) unsafe fn escape_x86_64_avx2(dst: &mut [u8], src: &[u8], style: EscapeStyle) -> usize {
    escape::<scan::simd::AVX2>(dst, src, style)
}

// SAFETY: Callers must ensure `dst` is at least `max_escaped_len` for `src`
// SAFETY: Callers must ensure Neon is available
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(super) unsafe fn escape_aarch64_neon(dst: &mut [u8], src: &[u8], style: EscapeStyle) -> usize {
    escape::<scan::simd::Neon>(dst, src, style)
}

// SAFETY: Callers must ensure `dst` is at least `max_escaped_len` for `src`
// SAFETY: Callers must ensure `S` is available
#[inline(always)]
pub(super) unsafe fn escape<S: ScanSimd>(dst: &mut [u8], src: &[u8], style: EscapeStyle) -> usize {
    let mut input_offset = 0;
    let mut output_offset = 0;

    'block: while input_offset < src.len() {
        // the last block may be partial, in which case any bits past the end
        // of the input are cleared so they're never considered
        let (block, valid) = scan::load_block::<S>(src, input_offset);
        let mask = scan::mask_to(S::mask_escape(block, style), valid);

        output_offset = if mask == 0 {
            copy_nonoverlapping!(src, input_offset, dst, output_offset, valid);
            output_offset + valid
        } else {
            escape_by_mask(
                EscapeBlockInput {
                    src,
                    dst: &mut *dst,
                    input_offset,
                    output_offset,
                    valid,
                    style,
                },
                mask,
            )
        };

        input_offset += valid;
    }

    test_assert_eq!(src.len(), input_offset);

    output_offset
}

struct EscapeBlockInput<'a> {
    src: &'a [u8],
    dst: &'a mut [u8],
    input_offset: usize,
    output_offset: usize,
    valid: usize,
    style: EscapeStyle,
}

/**
Escape a block using its mask, returning the output offset after it.

Each byte in the block is read exactly once: runs between set bits are copied
and each set bit is escaped.
*/
// SAFETY: Callers must ensure `dst` has room for the escaped block
#[inline(always)]
unsafe fn escape_by_mask(i: EscapeBlockInput, mut mask: u32) -> usize {
    let mut copy_from = i.input_offset;
    let mut output_offset = i.output_offset;

    'mask: while mask != 0 {
        // advance through the block by shifting over zeros in the mask
        // this is more efficient than looking at each byte individually
        let block_offset = mask.trailing_zeros() as usize;
        test_assert!(block_offset < i.valid);

        let shift = (!0u64 << (block_offset + 1)) as u32;
        mask &= shift;

        let curr_offset = i.input_offset + block_offset;

        let cnt = curr_offset - copy_from;
        copy_nonoverlapping!(i.src, copy_from, i.dst, output_offset, cnt);
        output_offset += cnt;

        let curr = *get_unchecked!(i.src, curr_offset);
        output_offset = escape_byte(i.dst, output_offset, curr, i.style);

        copy_from = curr_offset + 1;
    }

    let cnt = (i.input_offset + i.valid) - copy_from;
    copy_nonoverlapping!(i.src, copy_from, i.dst, output_offset, cnt);

    output_offset + cnt
}
