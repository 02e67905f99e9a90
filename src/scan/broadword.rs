/*!
Portable broadword (SWAR) classification.

This implementation classifies 8 bytes at a time using plain `u64` arithmetic,
so it works on any target without CPU-specific intrinsics.

All of the byte tests here are exact. The popular `(x - 0x0101..) & !x & 0x8080..`
zero-byte trick can report false positives in bytes following a match, because
the borrow from the subtraction crosses byte boundaries. That's fine for finding
the first match, but not for building a mask of every match. Instead, each test
first clears the high bit of every byte so the additions can never carry into the
next byte, then accounts for the high bit separately.
*/

use std::ptr;

use crate::{scan::ScanSimd, EscapeStyle};

pub(crate) struct Broadword;

impl ScanSimd for Broadword {
    type Block = u64;

    const BLOCK_SIZE: usize = 8;

    const VECTORIZATION_THRESHOLD: usize = Self::BLOCK_SIZE * 2;

    #[inline(always)]
    unsafe fn load_block_unaligned(ptr: *const u8) -> Self::Block {
        // blocks are always little-endian so bit `n` of the mask is byte `n` of the input
        u64::from_le_bytes(ptr::read_unaligned(ptr as *const [u8; 8]))
    }

    #[inline(always)]
    unsafe fn mask_escape(block: Self::Block, style: EscapeStyle) -> u32 {
        let mut matches =
            match_lt(block, 0x20) | match_byte(block, b'\\') | match_byte(block, b'"');

        if let EscapeStyle::Json = style {
            matches |= match_byte(block, b'/');
        }

        extract_mask(matches) as u32
    }

    #[inline(always)]
    unsafe fn mask_quote_escape(block: Self::Block) -> u32 {
        extract_mask(match_byte(block, b'\\') | match_byte(block, b'"')) as u32
    }
}

pub(crate) const HI_BYTES: u64 = 0x8080_8080_8080_8080;

const LO_7_BITS: u64 = 0x7f7f_7f7f_7f7f_7f7f;

/**
Broadcast a byte to all 8 positions in a `u64`.
*/
#[inline(always)]
pub(crate) const fn broadcast_byte(b: u8) -> u64 {
    0x0101_0101_0101_0101u64 * (b as u64)
}

/**
Set the high bit of each byte in `x` that's zero.
*/
#[inline(always)]
pub(crate) const fn match_zero(x: u64) -> u64 {
    // the high bit of `(b & 0x7f) + 0x7f` is set for any non-zero low 7 bits
    // or-ing in `x` covers bytes with only their high bit set
    !(((x & LO_7_BITS) + LO_7_BITS) | x | LO_7_BITS)
}

/**
Set the high bit of each byte in `x` that's equal to `b`.
*/
#[inline(always)]
pub(crate) const fn match_byte(x: u64, b: u8) -> u64 {
    match_zero(x ^ broadcast_byte(b))
}

/**
Set the high bit of each byte in `x` that's less than `n`.

`n` must not be greater than `0x80`.
*/
#[inline(always)]
pub(crate) const fn match_lt(x: u64, n: u8) -> u64 {
    // the high bit of `(b & 0x7f) + (0x80 - n)` is set when `b & 0x7f >= n`
    // or-ing in `x` covers bytes with their high bit set, which are never less than `n`
    !(((x & LO_7_BITS) + broadcast_byte(0x80 - n)) | x) & HI_BYTES
}

/**
Pack the high bit of each byte into a bitmask, where bit `n` is byte `n`.
*/
#[inline(always)]
pub(crate) const fn extract_mask(x: u64) -> u8 {
    // after shifting, each set bit is at the bottom of its byte: 0, 8, 16, ..
    // multiplying by the magic gathers bit `8n` into bit `56 + n` without any carries
    const MAGIC: u64 = 0x0102_0408_1020_4080;

    (((x & HI_BYTES) >> 7).wrapping_mul(MAGIC) >> 56) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(bytes: [u8; 8]) -> u64 {
        u64::from_le_bytes(bytes)
    }

    #[test]
    fn block_offset_is_8_bytes() {
        assert_eq!(8, Broadword::BLOCK_SIZE);
    }

    #[test]
    fn match_zero_has_no_false_positives() {
        // a borrow-based zero test would also flag the `0x01` following the `0x00`
        let x = block([0x00, 0x01, 0x00, 0x80, 0x01, 0xff, 0x00, 0x7f]);

        assert_eq!(0b0100_0101, extract_mask(match_zero(x)));
    }

    #[test]
    fn match_lt_every_byte() {
        for b in 0..=255u8 {
            let x = broadcast_byte(b);

            let expected = if b < 0x20 { 0xff } else { 0x00 };
            assert_eq!(expected, extract_mask(match_lt(x, 0x20)), "{:#x}", b);
        }
    }

    #[test]
    fn match_byte_every_byte() {
        for b in 0..=255u8 {
            let x = block([b, b'\\', 0, b, 0xff, b, b'"', 0x5c ^ 0x80]);

            let mask = extract_mask(match_byte(x, b));
            for i in 0..8 {
                let byte = x.to_le_bytes()[i];
                assert_eq!(byte == b, mask & (1u8 << i) != 0, "{:#x} at {}", b, i);
            }
        }
    }

    #[test]
    fn extract_mask_orders_by_position() {
        assert_eq!(0b0000_0001, extract_mask(0x0000_0000_0000_0080));
        assert_eq!(0b1000_0000, extract_mask(0x8000_0000_0000_0000));
        assert_eq!(0b1111_1111, extract_mask(HI_BYTES));
    }

    #[test]
    fn mask_escape_json_slash() {
        let x = block(*b"a/b/c\\\"d");

        unsafe {
            assert_eq!(0b0110_0000, Broadword::mask_escape(x, EscapeStyle::Generic));
            assert_eq!(0b0110_1010, Broadword::mask_escape(x, EscapeStyle::Json));
        }
    }
}
