//! Text normalization for record comparison

use unicode_normalization::UnicodeNormalization;

/// Normalize a vendor name for comparison
///
/// - Unicode NFKD to separate combining characters
/// - Keeps only ASCII alphanumerics and whitespace
/// - Lowercases and collapses whitespace
pub(crate) fn normalize_vendor(vendor: &str) -> String {
    let filtered: String = vendor
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace())
        .collect();

    collapse_whitespace(&filtered.to_lowercase())
        .trim()
        .to_string()
}

/// Normalize a category label for comparison
pub(crate) fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Collapse multiple whitespace characters into a single space
fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_space = false;

    for c in s.chars() {
        if c.is_ascii_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(c);
            prev_was_space = false;
        }
    }

    result
}
