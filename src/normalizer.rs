//! Text normalization.

/// Lowercase letters of the Ukrainian alphabet.
pub const ALPHABET: &str = "абвгґдеєжзиіїйклмнопрстуфхцчшщьюя";

fn keep(c: char) -> bool {
    c == '-' || c.is_whitespace() || ALPHABET.contains(c)
}

/// Lowercase the text and drop every character that is not a Ukrainian letter, whitespace or a hyphen.
///
/// Dropped characters are removed, not replaced, so `"кіт,пес"` becomes the single token `"кітпес"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().chars().filter(|&c| keep(c)).collect()
}
