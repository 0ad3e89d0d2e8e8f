/// Split normalized text on runs of whitespace. Never yields an empty token.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(|s| s.to_string()).collect()
}
