//! Evaluates a parsed query against an [`InvertedIndex`] and ranks the
//! results.
//!
//! Evaluation is deliberately permissive (spec.md §9 Open Question 2): the
//! AST is walked to collect every term and phrase it mentions regardless of
//! the operators connecting them — `cat AND dog`, `cat OR dog`, and `cat NOT
//! dog` all produce the *same* candidate set, `{docs containing "cat" or
//! "dog"}`. The query language's structure still informs the caller (via
//! the AST itself) but does not gate which documents are scored; this
//! favors recall over precision for the small, ambiguous-need corpora this
//! crate targets. Phrase nodes are treated as a bag of tokens — spec.md §9
//! Open Question 3 leaves positional proximity checking unresolved here, so
//! `"quick fox"` contributes `quick` and `fox` as independent terms even
//! though [`crate::model::Posting`] carries enough position data to check
//! adjacency.

use std::collections::HashSet;

use crate::error::QueryError;
use crate::index::InvertedIndex;
use crate::model::DocId;
use crate::query::ast::QueryNode;
use crate::query::lexer::{self, Token};
use crate::query::parser;
use crate::ranker::Ranker;
use crate::tokenizer::Tokenizer;

/// Collects every term a query AST mentions, in a single flat, order-
/// preserving list — duplicates allowed, the ranker dedupes as needed.
fn collect_terms(node: &QueryNode, tokenizer: &Tokenizer, out: &mut Vec<String>) {
    match node {
        QueryNode::Term(word) => out.extend(tokenizer.tokenize(word)),
        QueryNode::Phrase(text) => out.extend(tokenizer.tokenize(text)),
        QueryNode::And(left, right) | QueryNode::Or(left, right) => {
            collect_terms(left, tokenizer, out);
            collect_terms(right, tokenizer, out);
        }
        QueryNode::Not(operand) => collect_terms(operand, tokenizer, out),
    }
}

/// Lexes, parses, and evaluates query strings into ranked document ids.
pub struct SearchService {
    tokenizer: Tokenizer,
    ranker: Ranker,
}

impl SearchService {
    /// Builds a search service with the default tokenizer and the given
    /// ranker (so its BM25 params can be configured independently).
    pub fn new(ranker: Ranker) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            ranker,
        }
    }

    fn candidate_doc_ids(&self, index: &InvertedIndex, terms: &[String]) -> HashSet<DocId> {
        terms
            .iter()
            .flat_map(|term| index.get_postings(term).iter().map(|posting| posting.doc_id))
            .collect()
    }

    /// Runs `query` against `index`, returning `(DocId, score)` pairs sorted
    /// by score descending.
    ///
    /// An empty or whitespace-only query, or one that lexes to nothing but
    /// stopwords, returns `Ok(vec![])` — it is not an error. A malformed
    /// query (unterminated phrase, dangling operator, unmatched
    /// parenthesis) returns `Err`.
    pub fn search(&self, index: &InvertedIndex, query: &str) -> Result<Vec<(DocId, f64)>, QueryError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tokens = lexer::lex(query)?;
        if tokens == [Token::Eof] {
            return Ok(Vec::new());
        }

        let ast = parser::parse(tokens)?;

        let mut terms = Vec::new();
        collect_terms(&ast, &self.tokenizer, &mut terms);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.candidate_doc_ids(index, &terms);
        Ok(self.ranker.rank(index, &terms, candidates))
    }

    /// Advisory fallback: ranks the corpus against the raw query text,
    /// tokenized the same way a document is, bypassing the query language
    /// entirely. Never fails — a query a caller couldn't get `search` to
    /// accept (or simply typed as free text) still produces *some* ranked
    /// suggestions.
    pub fn ranked_suggestions(&self, index: &InvertedIndex, query: &str) -> Vec<(DocId, f64)> {
        let terms = self.tokenizer.tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }
        let candidates = self.candidate_doc_ids(index, &terms);
        self.ranker.rank(index, &terms, candidates)
    }
}
