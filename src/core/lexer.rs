//! Lowercasing tokenizer shared by the message phrase and the campus alias table.

const SEPARATORS: &[char] = &[',', ';', ':', '!', '?', '.', '(', ')', '"', '\''];

/// Splits `text` into lowercase tokens on whitespace and common punctuation.
///
/// `-` and `/` are not separators, so dates such as `2024-03-16` or `16/03`
/// and aliases such as `drie-eiken` stay a single token.
pub fn normalize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}
