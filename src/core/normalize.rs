// File: src/core/normalize.rs

/// Reduces a raw token to its dictionary key.
///
/// Keeps ASCII letters (lower-cased), ASCII digits and `_`, in their original
/// order, and drops everything else. Non-ASCII characters are always dropped,
/// so the result does not depend on the environment's locale.
/// The result is empty when nothing survives, e.g. for `"!@#"`.
pub fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|&c| is_word_char(c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// True when `word` is a non-empty fixed point of [`normalize`].
pub fn is_normalized(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| is_word_char(c) && !c.is_ascii_uppercase())
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
