/*!
# `squirrel-escape`

## 🐿⚡

A vectorized codec for the bodies of quoted string literals. This library escapes raw bytes
so they can be embedded in JSON or C-like quoted strings, and unescapes them back again. It's
optimized for chewing through large volumes of mostly printable text, where escapes are rare.

Escaping supports two styles:

- [`EscapeStyle::Generic`] escapes control bytes, `\`, and `"` using C-like `\xhh` sequences.
- [`EscapeStyle::Json`] also escapes `/`, and uses `\u00hh` sequences.

Unescaping accepts either style, along with octal, `\'`, `\a`, `\e`, `\v`, UTF-16 surrogate
pairs, and 8 digit `\U` escapes. It stops at the first unescaped `"`, so it can be pointed
just past the opening quote of a literal without knowing where that literal ends.

```
use squirrel_escape::{escape_to_string, unescape_to_vec, EscapeStyle};

let escaped = escape_to_string("a\tb/c", EscapeStyle::Json);
assert_eq!("a\\tb\\/c", escaped);

let unescaped = unescape_to_vec(escaped.as_bytes()).unwrap();
assert_eq!(b"a\tb/c".to_vec(), unescaped);
```

## ⚠️ CAREFUL

This library contains a _lot_ of unsafe code and is very performance sensitive. Any changes
need to be carefully considered and should be:

- tested against the benchmarks to make sure we don't regress (at least not accidentally).
- fuzz tested to ensure there aren't soundness holes introduced.

We take advantage of the maximum size of escaped and unescaped output to avoid bounds
checks wherever possible. Hot paths work on whole blocks of input at a time.

Any unchecked operations performed on buffers are done using macros that use the checked
variant in test/debug builds (or when the `checked` feature is enabled) to make sure we don't
ever cause UB when working through inputs.
*/

#![cfg_attr(published, deny(warnings))]
#![allow(
    unused_labels,
    clippy::missing_safety_doc,
    clippy::upper_case_acronyms
)]

#[macro_use]
mod macros;

mod std_ext;

mod error;
mod escape;
mod scan;
mod unescape;

pub use self::{
    error::UnescapeError,
    escape::{
        escape, escape_append, escape_fallback, escape_to_string, escape_to_vec, EscapeStyle,
    },
    unescape::{
        unescape, unescape_append, unescape_fallback, unescape_to_vec, UnescapeStatus, Unescaped,
    },
};

#[cfg(test)]
mod tests;
