/// Strip everything except ASCII letters, digits and whitespace, then lower-case.
///
/// Whitespace runs are kept exactly as they appear so that multi-word lexicon
/// phrases ("click here") still line up after punctuation is removed.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
