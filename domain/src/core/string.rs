//! String utilities for the domain layer.

/// Keep only the trailing `max_len` bytes of a string (UTF-8 safe).
///
/// The cut moves forward to the next character boundary, so the result may
/// be slightly shorter than `max_len` but is always valid UTF-8.
pub fn tail(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut start = s.len() - max_len;
    while start < s.len() && !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}
