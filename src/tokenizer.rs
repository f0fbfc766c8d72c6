//! Text → normalized term stream.
//!
//! Per spec.md §9 Open Question 1, this tokenizer uses the regex-extractor
//! variant (`[a-z0-9'-]+` over lowercased input) rather than a plain
//! whitespace split, and the same [`Tokenizer`] is used for both document
//! text (by the [`crate::indexer::Indexer`]) and query term text collected
//! from the AST (by the [`crate::search::SearchService`]) — the two call
//! sites must agree on a vocabulary or postings would never match query
//! terms.

use std::collections::HashSet;

use regex::Regex;

/// Closed stopword list (case-insensitive), shared by the document
/// tokenizer and, per spec.md §9 Open Question 4, the query lexer's
/// optional stopword filter.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "then", "else", "of", "in", "on", "at", "by",
    "for", "with", "to", "from", "is", "are", "was", "were", "be", "been", "being", "as", "that",
    "this", "these", "those", "he", "she", "it", "they", "we", "you", "i", "me", "my", "your",
    "our", "their",
];

/// Minimum length (in Unicode scalar values) a token must have to survive
/// filtering.
const MIN_TOKEN_LEN: usize = 2;

/// Returns whether `word` (assumed already lowercased) is in the closed
/// stopword list.
pub(crate) fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Deterministic, pure text tokenizer: lowercase → extract `[a-z0-9'-]+`
/// runs → drop length-≤1 tokens → drop stopwords.
pub struct Tokenizer {
    term_pattern: Regex,
    stopwords: HashSet<&'static str>,
}

impl Tokenizer {
    /// Builds a tokenizer. Compiling the term-extraction pattern once and
    /// reusing it is the only state this type carries; `tokenize` itself
    /// has no side effects.
    pub fn new() -> Self {
        Self {
            term_pattern: Regex::new(r"[a-z0-9'-]+").expect("tokenizer pattern is valid"),
            stopwords: STOPWORDS.iter().copied().collect(),
        }
    }

    /// Builds a tokenizer with a caller-supplied stopword list instead of
    /// the closed default, for an [`crate::engine::EngineConfig`] override.
    /// The list is leaked for the tokenizer's lifetime, matching the
    /// `&'static str` the default list stores — an `EngineConfig` is built
    /// once per process, so this is not a per-query cost.
    pub fn with_stopwords(stopwords: &[String]) -> Self {
        let stopwords: HashSet<&'static str> = stopwords
            .iter()
            .map(|word| -> &'static str { Box::leak(word.clone().into_boxed_str()) })
            .collect();
        Self {
            term_pattern: Regex::new(r"[a-z0-9'-]+").expect("tokenizer pattern is valid"),
            stopwords,
        }
    }

    /// Tokenizes `text` into normalized, filtered terms, in source order.
    ///
    /// Empty or whitespace-only input yields an empty sequence.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.term_pattern
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
            .filter(|token| !self.stopwords.contains(token.as_str()))
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
