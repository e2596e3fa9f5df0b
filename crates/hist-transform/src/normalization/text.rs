//! Character-based prefix helpers.
//!
//! History values are decoded from ISO-8859-1, so offsets count characters,
//! never bytes.

/// Drop the first `count` characters. Shorter values become empty.
pub fn strip_leading_chars(value: &str, count: usize) -> &str {
    match value.char_indices().nth(count) {
        Some((offset, _)) => &value[offset..],
        None => "",
    }
}

/// Keep at most the first `count` characters.
pub fn take_leading_chars(value: &str, count: usize) -> &str {
    match value.char_indices().nth(count) {
        Some((offset, _)) => &value[..offset],
        None => value,
    }
}
