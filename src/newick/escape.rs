//! Label quoting for Newick and key/value encoding for NHX annotations.

use crate::error::{Result, TextTreeError};

/// Characters that force a label to be quoted.
const SPECIAL_CHARS: &[char] = &[' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Characters not allowed in NHX keys or values.
const NHX_RESERVED: &[char] = &['[', ']', ':', '=', ',', ';', '(', ')'];

/// Returns a Newick-safe version of `label`.
///
/// Labels containing structural characters are wrapped in single quotes,
/// internal single quotes are doubled. Token texts are kept as they are,
/// no underscore conversion takes place.
///
/// # Example
/// ```
/// # use text_tree::newick::escape_label;
/// assert_eq!(escape_label("cat"), "cat");
/// assert_eq!(escape_label(","), "','");
/// assert_eq!(escape_label("don't"), "'don''t'");
/// assert_eq!(escape_label(""), "");
/// ```
pub fn escape_label(label: &str) -> String {
    if !label.contains(SPECIAL_CHARS) {
        return label.to_string();
    }

    let mut escaped = String::with_capacity(label.len() + 3);
    escaped.push('\'');
    for ch in label.chars() {
        escaped.push(ch);
        if ch == '\'' {
            escaped.push('\'');
        }
    }
    escaped.push('\'');
    escaped
}

/// Replaces NHX-reserved characters and whitespace in `value` by `_`.
///
/// # Example
/// ```
/// # use text_tree::newick::sanitize_nhx_value;
/// assert_eq!(sanitize_nhx_value("doc 1: intro"), "doc_1__intro");
/// assert_eq!(sanitize_nhx_value("#ff7f0e"), "#ff7f0e");
/// ```
pub fn sanitize_nhx_value(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_whitespace() || NHX_RESERVED.contains(&c) { '_' } else { c })
        .collect()
}

/// Percent-encodes `%`, NHX-reserved characters and whitespace in `value`,
/// byte-wise over UTF-8 as `%XX`. Reversed by [decode_nhx_value].
///
/// # Example
/// ```
/// # use text_tree::newick::encode_nhx_value;
/// assert_eq!(encode_nhx_value("notes.txt:3 (x)"), "notes.txt%3A3%20%28x%29");
/// assert_eq!(encode_nhx_value("#ff7f0e"), "#ff7f0e");
/// ```
pub fn encode_nhx_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '%' || c.is_whitespace() || NHX_RESERVED.contains(&c) {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// Decodes a value written by [encode_nhx_value].
///
/// # Errors
/// [TextTreeError::InvalidInput] on a truncated or non-hex `%` escape, or
/// if the decoded bytes are not UTF-8.
///
/// # Example
/// ```
/// # use text_tree::newick::{decode_nhx_value, encode_nhx_value};
/// let reference = "review 7: (IMDB)";
/// assert_eq!(decode_nhx_value(&encode_nhx_value(reference))?, reference);
/// # Ok::<(), text_tree::TextTreeError>(())
/// ```
pub fn decode_nhx_value(value: &str) -> Result<String> {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            decoded.push(bytes[i]);
            i += 1;
            continue;
        }
        let byte = bytes
            .get(i + 1..i + 3)
            .and_then(|hex| std::str::from_utf8(hex).ok())
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or_else(|| TextTreeError::invalid_input(format!("Malformed escape at byte {i} in NHX value '{value}'")))?;
        decoded.push(byte);
        i += 3;
    }
    String::from_utf8(decoded)
        .map_err(|_| TextTreeError::invalid_input(format!("NHX value '{value}' does not decode to UTF-8")))
}
