use std::arch::x86_64::*;

use crate::{scan::ScanSimd, EscapeStyle};

pub(crate) struct AVX2;

impl ScanSimd for AVX2 {
    type Block = __m256i;

    const BLOCK_SIZE: usize = 32;

    const VECTORIZATION_THRESHOLD: usize = Self::BLOCK_SIZE;

    // SAFETY: Callers must ensure AVX2 is available
    #[inline(always)]
    unsafe fn load_block_unaligned(ptr: *const u8) -> Self::Block {
        _mm256_loadu_si256(ptr as *const _)
    }

    // SAFETY: Callers must ensure AVX2 is available
    #[inline(always)]
    unsafe fn mask_escape(block: Self::Block, style: EscapeStyle) -> u32 {
        // AVX2 has no unsigned less-than, but a byte is below `0x20`
        // exactly when it's unchanged by `min(b, 0x1f)`
        let match_control = _mm256_cmpeq_epi8(_mm256_min_epu8(block, _mm256_set1_epi8(0x1f)), block);

        let match_escape = _mm256_cmpeq_epi8(block, _mm256_set1_epi8(b'\\' as i8));
        let match_quote = _mm256_cmpeq_epi8(block, _mm256_set1_epi8(b'"' as i8));

        let mut matches = _mm256_or_si256(match_control, _mm256_or_si256(match_escape, match_quote));

        if let EscapeStyle::Json = style {
            let match_slash = _mm256_cmpeq_epi8(block, _mm256_set1_epi8(b'/' as i8));
            matches = _mm256_or_si256(matches, match_slash);
        }

        _mm256_movemask_epi8(matches) as u32
    }

    // SAFETY: Callers must ensure AVX2 is available
    #[inline(always)]
    unsafe fn mask_quote_escape(block: Self::Block) -> u32 {
        let match_quote = _mm256_cmpeq_epi8(block, _mm256_set1_epi8(b'"' as i8));
        let mask_quote = _mm256_movemask_epi8(match_quote);

        let match_escape = _mm256_cmpeq_epi8(block, _mm256_set1_epi8(b'\\' as i8));
        let mask_escape = _mm256_movemask_epi8(match_escape);

        (mask_quote | mask_escape) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::scan::tests::check_masks_match_fallback;

    #[test]
    fn block_offset_is_32_bytes() {
        assert_eq!(32, AVX2::BLOCK_SIZE);
    }

    #[test]
    fn masks_match_fallback() {
        if !is_x86_feature_detected!("avx2") {
            return;
        }

        // SAFETY: avx2 is available
        unsafe { check_masks_match_fallback::<AVX2>() };
    }
}
