//! Naming conventions derived from a block identifier.
//!
//! Words are split on underscores, hyphens, whitespace and case transitions.
//! An uppercase run ends before its last letter when a lowercase letter
//! follows (`HTMLBlock` is `HTML` + `Block`). Digits belong to the word they
//! follow, so `text2_picture`, `text2-picture` and `Text2Picture` have the same
//! words. Every conversion is idempotent.

/// Returns true for characters that separate words without being part of one.
fn is_separator(c: char) -> bool {
    c == '_' || c == '-' || c.is_whitespace()
}

/// Splits an identifier into its words.
pub fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (index, &c) in chars.iter().enumerate() {
        if is_separator(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        // `current` is only non-empty when the previous character was not a separator.
        if c.is_uppercase() && !current.is_empty() {
            let previous = chars[index - 1];
            let next_is_lowercase = chars.get(index + 1).is_some_and(|next| next.is_lowercase());
            if previous.is_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_uppercase() && next_is_lowercase)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts an identifier to upper-camel case: `gallery_block` -> `GalleryBlock`.
///
/// Only separators are removed and the first letter of each segment is
/// capitalised; the rest is kept as written, so `HTMLBlock` stays `HTMLBlock`.
pub fn camel_case(name: &str) -> String {
    name.split(is_separator)
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

/// Converts an identifier to snake case: `GalleryBlock` -> `gallery_block`.
pub fn snake_case(name: &str) -> String {
    join_lowercase(name, "_")
}

/// Converts an identifier to kebab case: `GalleryBlock` -> `gallery-block`.
pub fn kebab_case(name: &str) -> String {
    join_lowercase(name, "-")
}

fn join_lowercase(name: &str, separator: &str) -> String {
    words(name)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
