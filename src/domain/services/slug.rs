//! Slug derivation for thread names.

use deunicode::deunicode;

/// Derive a URL-safe identifier from a display name.
///
/// Letters are transliterated to ASCII (`à` -> `a`, `Ø` -> `O`), lowercased,
/// and every run of other characters becomes a single hyphen. Leading and
/// trailing hyphens are dropped. No uniqueness is implied.
pub fn slugify(name: &str) -> String {
    let ascii = deunicode(name);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
