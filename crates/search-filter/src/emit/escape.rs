//! Escaping literals for wildcard (`LIKE`) patterns.

/// Escapes `value` so a `LIKE` pattern built from it matches it literally.
///
/// `%`, `_` and `escape_char` itself are each prefixed with `escape_char`.
pub fn escape_for_wildcard_match(value: &str, escape_char: char) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '%' || ch == '_' || ch == escape_char {
            escaped.push(escape_char);
        }
        escaped.push(ch);
    }
    escaped
}
