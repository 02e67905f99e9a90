/*!
Macro helpers for the codecs.

Most of these macros perform checked versions of unsafe operations in tests
or when the `checked` feature is enabled just to try catch any UB early.
*/

macro_rules! get_unchecked {
    ($slice:expr, $index:expr) => {{
        #[cfg(any(all(test, debug), checked))]
        {
            ($slice)
                .get($index)
                .expect("attempt to index out of bounds")
        }

        #[cfg(not(any(all(test, debug), checked)))]
        {
            // SAFETY: the index must always be in bounds
            #[allow(unused_unsafe)]
            unsafe {
                ($slice).get_unchecked($index)
            }
        }
    }};
}

macro_rules! get_unchecked_mut {
    ($slice:expr, $index:expr) => {{
        #[cfg(any(all(test, debug), checked))]
        {
            ($slice)
                .get_mut($index)
                .expect("attempt to index out of bounds")
        }

        #[cfg(not(any(all(test, debug), checked)))]
        {
            // SAFETY: the index must always be in bounds
            #[allow(unused_unsafe)]
            unsafe {
                ($slice).get_unchecked_mut($index)
            }
        }
    }};
}

/**
Copy `$len` bytes from `$src` at `$src_offset` into `$dst` at `$dst_offset`.

This is more efficient than `copy_from_slice` in hot loops, because that method
has to check both ranges against their slices.
*/
macro_rules! copy_nonoverlapping {
    ($src:expr, $src_offset:expr, $dst:expr, $dst_offset:expr, $len:expr) => {{
        let src_offset: usize = $src_offset;
        let dst_offset: usize = $dst_offset;
        let len: usize = $len;

        #[cfg(any(all(test, debug), checked))]
        {
            ($dst)
                .get_mut(dst_offset..dst_offset + len)
                .expect("attempt to write out of bounds")
                .copy_from_slice(
                    ($src)
                        .get(src_offset..src_offset + len)
                        .expect("attempt to read out of bounds"),
                );
        }

        #[cfg(not(any(all(test, debug), checked)))]
        {
            // SAFETY: the source range must be within `$src`
            // SAFETY: the destination range must be within `$dst`
            // SAFETY: `$src` and `$dst` can't overlap because `$dst` is borrowed mutably
            #[allow(unused_unsafe)]
            unsafe {
                std::ptr::copy_nonoverlapping(
                    ($src).as_ptr().add(src_offset),
                    ($dst).as_mut_ptr().add(dst_offset),
                    len,
                )
            }
        }
    }};
}

macro_rules! owned_from_utf8_unchecked {
    ($str:expr) => {{
        #[cfg(any(all(test, debug), checked))]
        {
            String::from_utf8($str).expect("invalid utf8")
        }

        #[cfg(not(any(all(test, debug), checked)))]
        {
            // SAFETY: the input must always be valid UTF8
            #[allow(unused_unsafe)]
            unsafe {
                String::from_utf8_unchecked($str)
            }
        }
    }};
}

macro_rules! test_assert {
    ($($tokens:tt)*) => {{
        #[cfg(test)]
        {
            debug_assert!($($tokens)*);
        }
    }};
}

macro_rules! test_assert_eq {
    ($($tokens:tt)*) => {{
        #[cfg(test)]
        {
            debug_assert_eq!($($tokens)*);
        }
    }};
}
