use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub struct CharTryFromSurrogateError {}

impl Error for CharTryFromSurrogateError {}

impl fmt::Display for CharTryFromSurrogateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("converted integer out of range for `char`")
    }
}

/**
Whether `code` is the first half of a UTF-16 surrogate pair.
*/
#[inline]
pub fn is_high_surrogate(code: u32) -> bool {
    (0xD800..=0xDBFF).contains(&code)
}

/**
Whether `code` is the second half of a UTF-16 surrogate pair.
*/
#[inline]
pub fn is_low_surrogate(code: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&code)
}

pub fn try_from_utf16_surrogate_pair(
    high: u32,
    low: u32,
) -> Result<char, CharTryFromSurrogateError> {
    if !is_high_surrogate(high) || !is_low_surrogate(low) {
        return Err(CharTryFromSurrogateError {});
    }

    // Courtesy of: http://www.russellcottrell.com/greek/utilities/SurrogatePairCalculator.htm
    let code = ((high - 0xD800) * 0x400) + (low - 0xDC00) + 0x10000;

    char::try_from(code).map_err(|_| CharTryFromSurrogateError {})
}
