use std::{error::Error, fmt};

use crate::UnescapeStatus;

/**
An error unescaping an invalid escape sequence.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnescapeError {
    status: UnescapeStatus,
    input_offset: usize,
}

impl UnescapeError {
    #[inline]
    pub(crate) fn new(status: UnescapeStatus, input_offset: usize) -> Self {
        test_assert!(!status.is_ok());

        UnescapeError {
            status,
            input_offset,
        }
    }

    /**
    Why the escape sequence was invalid.
    */
    #[inline]
    pub fn status(&self) -> UnescapeStatus {
        self.status
    }

    /**
    The offset in the input of the `\` that started the invalid escape sequence.
    */
    #[inline]
    pub fn input_offset(&self) -> usize {
        self.input_offset
    }
}

impl fmt::Display for UnescapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at offset {}", self.status, self.input_offset)
    }
}

impl Error for UnescapeError {}
