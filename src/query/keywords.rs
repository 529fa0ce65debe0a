//! Question tokenisation

use std::collections::BTreeSet;

/// Tokens of this length or shorter are dropped
const MIN_KEYWORD_LEN: usize = 3;

/// Turn a question into scoring keywords.
///
/// Lowercases, strips punctuation, splits on whitespace, drops short tokens
/// and stop words, and removes duplicates keeping first-seen order.
pub fn extract_keywords(question: &str, stop_words: &BTreeSet<String>) -> Vec<String> {
    let cleaned: String = question
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() < MIN_KEYWORD_LEN || stop_words.contains(token) {
            continue;
        }
        if !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }
    keywords
}
