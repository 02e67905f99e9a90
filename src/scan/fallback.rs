/*!
Byte-by-byte classification.

These functions are the reference that every vectorized mask is checked against.
*/

use crate::EscapeStyle;

/**
Whether a byte needs to be escaped in the given style.
*/
#[inline(always)]
pub(crate) fn needs_escaping(b: u8, style: EscapeStyle) -> bool {
    b < 0x20 || b == b'\\' || b == b'"' || (b == b'/' && style == EscapeStyle::Json)
}

/**
Whether a byte ends a run of literal bytes while unescaping.
*/
#[inline(always)]
pub(crate) fn is_quote_escape(b: u8) -> bool {
    b == b'\\' || b == b'"'
}

#[cfg(test)]
pub(crate) fn mask_escape(block: &[u8], style: EscapeStyle) -> u32 {
    mask(block, |b| needs_escaping(b, style))
}

#[cfg(test)]
pub(crate) fn mask_quote_escape(block: &[u8]) -> u32 {
    mask(block, is_quote_escape)
}

#[cfg(test)]
fn mask(block: &[u8], f: impl Fn(u8) -> bool) -> u32 {
    assert!(block.len() <= 32);

    block
        .iter()
        .enumerate()
        .filter(|(_, b)| f(**b))
        .fold(0u32, |mask, (i, _)| mask | (1u32 << i))
}
