use super::*;

use crate::scan::fallback::is_quote_escape;

// SAFETY: Callers must ensure `dst` is at least as large as `src`
#[inline(always)]
pub(super) unsafe fn unescape(dst: &mut [u8], src: &[u8]) -> Unescaped {
    let mut scan = Scan::default();

    loop {
        match copy_literal(dst, src, &mut scan) {
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
*/
// SAFETY: Callers must ensure `dst` is at least as large as `src`
#[inline(always)]
unsafe fn copy_literal(dst: &mut [u8], src: &[u8], scan: &mut Scan) -> Option<u8> {
    'interest: while scan.input_offset < src.len() {
        let curr = *get_unchecked!(src, scan.input_offset);

        if is_quote_escape(curr) {
            return Some(curr);
        }

        scan.push_unescaped_byte(dst, curr);
        scan.input_offset += 1;
    }

    None
}
