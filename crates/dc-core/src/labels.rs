//! Display labels derived from column keys

/// Turn a column key into a display label.
///
/// The key is trimmed, its first character upper-cased, and the first hyphen
/// after it replaced by a space (`operating-system` -> `Operating system`).
pub fn format_label(key: &str) -> String {
    let key = key.trim();
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    first
        .to_uppercase()
        .chain(chars.as_str().replacen('-', " ", 1).chars())
        .collect()
}
