use std::arch::aarch64::*;

use crate::{scan::ScanSimd, std_ext::arch::aarch64::*, EscapeStyle};

pub(crate) struct Neon;

impl ScanSimd for Neon {
    type Block = uint8x8_t;

    const BLOCK_SIZE: usize = 8;

    const VECTORIZATION_THRESHOLD: usize = Self::BLOCK_SIZE * 2;

    // SAFETY: Callers must ensure Neon is available
    #[inline(always)]
    unsafe fn load_block_unaligned(ptr: *const u8) -> Self::Block {
        vld1_u8(ptr)
    }

    // SAFETY: Callers must ensure Neon is available
    #[inline(always)]
    unsafe fn mask_escape(block: Self::Block, style: EscapeStyle) -> u32 {
        let match_control = vclt_u8(block, vdup_n_u8(0x20));
        let match_escape = vceq_u8(block, vdup_n_u8(b'\\'));
        let match_quote = vceq_u8(block, vdup_n_u8(b'"'));

        let mut matches = vorr_u8(match_control, vorr_u8(match_escape, match_quote));

        if let EscapeStyle::Json = style {
            matches = vorr_u8(matches, vceq_u8(block, vdup_n_u8(b'/')));
        }

        vmovemask_u8(matches) as u32
    }

    // SAFETY: Callers must ensure Neon is available
    #[inline(always)]
    unsafe fn mask_quote_escape(block: Self::Block) -> u32 {
        let match_escape = vceq_u8(block, vdup_n_u8(b'\\'));
        let match_quote = vceq_u8(block, vdup_n_u8(b'"'));

        vmovemask_u8(vorr_u8(match_escape, match_quote)) as u32
    }
}
