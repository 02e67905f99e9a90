use super::*;

use crate::scan::fallback::needs_escaping;

// SAFETY: Callers must ensure `dst` is at least `max_escaped_len` for `src`
#[inline(always)]
pub(super) unsafe fn escape(dst: &mut [u8], src: &[u8], style: EscapeStyle) -> usize {
    let mut output_offset = 0;

    'interest: for &curr in src {
        if needs_escaping(curr, style) {
            output_offset = escape_byte(dst, output_offset, curr, style);
        } else {
            *get_unchecked_mut!(dst, output_offset) = curr;
            output_offset += 1;
        }
    }

    output_offset
}
