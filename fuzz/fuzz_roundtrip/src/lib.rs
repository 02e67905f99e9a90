use squirrel_escape::{
    escape_append, escape_fallback, unescape, unescape_fallback, EscapeStyle, UnescapeStatus,
};

pub fn roundtrip(input: &[u8]) {
    // Make sure we don't panic when unescaping arbitrary input
    let mut simd = vec![0; input.len()];
    let mut fallback = vec![0; input.len()];

    let simd_result = unescape(&mut simd, input);
    let fallback_result = unescape_fallback(&mut fallback, input);

    // Both unescapers must agree, even on invalid input
    assert_eq!(simd_result, fallback_result);
    assert_eq!(
        &simd[..simd_result.output_offset],
        &fallback[..fallback_result.output_offset]
    );

    for style in [EscapeStyle::Generic, EscapeStyle::Json] {
        // Both escapers must agree
        let mut escaped = Vec::new();
        escape_append(&mut escaped, input, style);

        let mut escaped_fallback = vec![0; style.max_escaped_len(input.len())];
        let written = escape_fallback(&mut escaped_fallback, input, style);

        assert_eq!(escaped, &escaped_fallback[..written]);

        // Escaped input must unescape back to the original input
        let mut unescaped = vec![0; escaped.len()];
        let result = unescape(&mut unescaped, &escaped);

        assert_eq!(UnescapeStatus::OkEndOfInput, result.status);
        assert_eq!(escaped.len(), result.input_offset);
        assert_eq!(input, &unescaped[..result.output_offset]);
    }
}
