use rand::Rng;

// bytes that are more likely to trip up escaping and unescaping
const INTERESTING: &[&[u8]] = &[
    b"\\",
    b"\"",
    b"/",
    b"\n",
    b"\t",
    b"\x00",
    b"\x1b",
    b"\x1f",
    b"\x7f",
    "😄".as_bytes(),
    "壁".as_bytes(),
    "é".as_bytes(),
];

// escape sequences that decode successfully
const ESCAPES: &[&[u8]] = &[
    b"\\\\",
    b"\\\"",
    b"\\'",
    b"\\/",
    b"\\a",
    b"\\b",
    b"\\e",
    b"\\f",
    b"\\n",
    b"\\r",
    b"\\t",
    b"\\v",
    b"\\x00",
    b"\\x7F",
    b"\\xff",
    b"\\0",
    b"\\12",
    b"\\377",
    b"\\400",
    b"\\u0000",
    b"\\u58c1",
    b"\\uFFFF",
    b"\\ud83d\\ude04",
    b"\\U0001F600",
    b"\\U00000041",
];

/**
Generate an arbitrary byte string, including invalid UTF8.
*/
pub fn bytes() -> Vec<u8> {
    let mut s = Vec::new();

    for _ in 0..rng(100) {
        match rng(4) {
            0 => s.extend_from_slice(INTERESTING[rng(INTERESTING.len())]),
            1 => s.push(rand::thread_rng().gen()),
            _ => write_printable(&mut s),
        }
    }

    s
}

/**
Generate an arbitrary UTF8 string.
*/
pub fn string() -> String {
    String::from_utf8_lossy(&bytes()).into_owned()
}

/**
Generate an escaped literal body that decodes successfully.

The result never contains an unescaped `"`. Octal escapes may pick up
a following digit, but they still decode.
*/
pub fn escaped() -> Vec<u8> {
    let mut s = Vec::new();

    for _ in 0..rng(100) {
        match rng(3) {
            0 => s.extend_from_slice(ESCAPES[rng(ESCAPES.len())]),
            _ => write_printable(&mut s),
        }
    }

    s
}

fn write_printable(s: &mut Vec<u8>) {
    const PRINTABLE: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 .,:;{}[]()-_+=!?@#$%^&*";

    for _ in 0..rng(40) {
        s.push(PRINTABLE[rng(PRINTABLE.len())]);
    }
}

fn rng(max: usize) -> usize {
    rand::thread_rng().gen_range(0..max)
}
