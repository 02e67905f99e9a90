/*!
Hex digit parsing for escape sequences.

Groups of 4 and 8 digits are decoded all at once in a `u64` using the same broadword
byte tests as block scanning. The results, including failures, are exactly the same
as parsing each digit in turn: any non-hex digit invalidates the whole group.
*/

use crate::scan::broadword::{broadcast_byte, match_lt, HI_BYTES};

#[inline(always)]
pub(super) fn convert_xdigit(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u32),
        b'a'..=b'f' => Some((b - b'a' + 10) as u32),
        b'A'..=b'F' => Some((b - b'A' + 10) as u32),
        _ => None,
    }
}

#[inline]
pub(super) fn convert_2xdigit(digits: &[u8]) -> Option<u32> {
    match digits {
        [hi, lo] => Some(convert_xdigit(*hi)? * 16 + convert_xdigit(*lo)?),
        _ => None,
    }
}

#[inline]
pub(super) fn convert_4xdigit(digits: &[u8]) -> Option<u32> {
    let digits: [u8; 4] = digits.try_into().ok()?;

    // pad the low half with zeroes, which shifts the parsed value up by 4 digits
    let mut padded = [b'0'; 8];
    padded[..4].copy_from_slice(&digits);

    convert_8xdigit(&padded).map(|code| code >> 16)
}

#[inline]
pub(super) fn convert_8xdigit(digits: &[u8]) -> Option<u32> {
    let digits: [u8; 8] = digits.try_into().ok()?;

    // the first digit is the most significant, and ends up in the lowest byte
    let x = u64::from_le_bytes(digits);

    let is_digit = match_lt(x, b'9' + 1) & !match_lt(x, b'0') & HI_BYTES;

    // setting `0x20` folds `A-F` onto `a-f` without folding anything else onto them
    let folded = x | broadcast_byte(0x20);
    let is_alpha = match_lt(folded, b'f' + 1) & !match_lt(folded, b'a') & HI_BYTES;

    if is_digit | is_alpha != HI_BYTES {
        return None;
    }

    // the low nibble of `0-9` is its value, and of `a-f` is 9 less than its value
    let nibbles = (x & broadcast_byte(0x0f)) + (is_alpha >> 7) * 9;

    // pack adjacent nibbles into bytes, then bytes into pairs, then pairs into the result
    // each time the lower addressed half is the more significant one
    let bytes = ((nibbles & 0x0f00_0f00_0f00_0f00) >> 8) | ((nibbles & 0x000f_000f_000f_000f) << 4);
    let pairs = ((bytes & 0x00ff_0000_00ff_0000) >> 16) | ((bytes & 0x0000_00ff_0000_00ff) << 8);
    let code = ((pairs & 0x0000_ffff_0000_0000) >> 32) | ((pairs & 0x0000_0000_0000_ffff) << 16);

    Some(code as u32)
}
