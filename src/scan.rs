/*!
Block scanning shared by the escaper and the unescaper.

Both codecs spend most of their time looking for the next byte that needs attention
and copying everything before it verbatim. Instead of testing each byte individually,
the input is split into fixed-size blocks and each block is classified at once into a
bitmask, where bit `n` is set when byte `n` of the block is interesting. Callers then
walk the set bits with `trailing_zeros`.

There are a few implementations:

- an AVX2 implementation on `x86_64` that classifies 32 bytes at a time,
- a Neon implementation on `aarch64` that classifies 8 bytes at a time,
- a broadword implementation that classifies 8 bytes at a time in a `u64` on any target,
- and a byte-by-byte fallback that the others are tested against.

Only full blocks are ever loaded directly from the input. The trailing partial block is
copied into a zero-padded buffer first, and the bits of its mask beyond the end of the
input have to be cleared with [`mask_to`] before they're used. The padding is zeroed,
and zero is a control byte, so forgetting to do that will produce spurious escapes.
*/

use crate::EscapeStyle;

pub(crate) mod broadword;
pub(crate) mod fallback;

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
pub(crate) mod simd;

/**
The largest block size of any implementation.

Partial blocks are padded up to this size.
*/
pub(crate) const MAX_BLOCK_SIZE: usize = 32;

/**
A strategy for classifying a block of bytes into a bitmask.
*/
pub(crate) trait ScanSimd {
    /**
    A loaded block of input.
    */
    type Block: Copy;

    /**
    The number of bytes in a block.

    This is also the number of meaningful bits in a mask.
    */
    const BLOCK_SIZE: usize;

    /**
    A heuristic threshold for the number of bytes in an input
    before considering vectorization.

    For very small inputs, there's less work in just scanning through
    their bytes than in setting up blocks.
    */
    const VECTORIZATION_THRESHOLD: usize;

    /**
    Load a block from a pointer that doesn't need to be aligned.

    # Safety

    Callers must ensure `ptr` is valid for reads of `BLOCK_SIZE` bytes
    and that the implementation is supported by the current CPU.
    */
    unsafe fn load_block_unaligned(ptr: *const u8) -> Self::Block;

    /**
    Find the bytes in the block that need escaping in the given style.

    # Safety

    Callers must ensure the implementation is supported by the current CPU.
    */
    unsafe fn mask_escape(block: Self::Block, style: EscapeStyle) -> u32;

    /**
    Find the `\` and `"` bytes in the block.

    # Safety

    Callers must ensure the implementation is supported by the current CPU.
    */
    unsafe fn mask_quote_escape(block: Self::Block) -> u32;
}

/**
Load the block starting at `offset`, returning it along with the number of
bytes of `input` it actually contains.

When fewer than `BLOCK_SIZE` bytes remain, they're copied into a zero-padded
buffer first so we never read past the end of `input`.

# Safety

Callers must ensure `offset` is less than the length of `input` and that
the implementation is supported by the current CPU.
*/
#[inline(always)]
pub(crate) unsafe fn load_block<S: ScanSimd>(input: &[u8], offset: usize) -> (S::Block, usize) {
    test_assert!(S::BLOCK_SIZE <= MAX_BLOCK_SIZE);
    test_assert!(offset < input.len());

    let remaining = input.len() - offset;

    if remaining >= S::BLOCK_SIZE {
        (
            S::load_block_unaligned(input.as_ptr().add(offset)),
            S::BLOCK_SIZE,
        )
    } else {
        let mut padded = [0u8; MAX_BLOCK_SIZE];
        copy_nonoverlapping!(input, offset, padded, 0, remaining);

        (S::load_block_unaligned(padded.as_ptr()), remaining)
    }
}

/**
Clear any bits in `mask` at or beyond `len`.
*/
#[inline(always)]
pub(crate) fn mask_to(mask: u32, len: usize) -> u32 {
    if len >= 32 {
        mask
    } else {
        mask & ((1u32 << len) - 1)
    }
}
