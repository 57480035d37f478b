use regex::Regex;
use std::sync::OnceLock;

/// A command-line or stdin token after lexical classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Abbreviated or full commit id, matched as a prefix of a tag's sha
    Hash(String),
    /// Regular expression tested against tag and release text fields
    Pattern(String),
}

fn hash_regex() -> &'static Regex {
    static HASH: OnceLock<Regex> = OnceLock::new();
    HASH.get_or_init(|| Regex::new(r"^[0-9a-f]{7,}$").expect("hash pattern is valid"))
}

/// Returns true if the token looks like a commit id (7+ lowercase hex digits).
pub fn is_hash(token: &str) -> bool {
    hash_regex().is_match(token)
}

/// Classify a positional token. Empty tokens carry nothing and yield `None`.
pub fn classify(token: &str) -> Option<Token> {
    if is_hash(token) {
        Some(Token::Hash(token.to_string()))
    } else if token.is_empty() {
        None
    } else {
        Some(Token::Pattern(token.to_string()))
    }
}

/// Extract hash-like tokens from free text such as piped build logs.
///
/// Text is split on whitespace and on `-`, `,`, `:`, `(`, `)`.
pub fn scan_hashes(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || matches!(c, '-' | ',' | ':' | '(' | ')'))
        .filter(|piece| is_hash(piece))
        .map(str::to_string)
        .collect()
}
