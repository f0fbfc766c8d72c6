//! BM25 (Okapi) scoring.
//!
//! Fixed at `k1 = 1.5`, `b = 0.75` by default (spec.md §4.6), overridable
//! through [`Bm25Params`] for callers who build a [`crate::engine::SearchEngine`]
//! with a custom [`crate::engine::EngineConfig`]. Unlike
//! `rank_retrieve::bm25`, this ranker carries no BM25L/BM25+ variant and no
//! eagerly-precomputed index — the corpora this crate targets are small
//! enough that recomputing idf per query is not a bottleneck, and the extra
//! variants have no counterpart in this system's query language.

use std::collections::HashSet;

use crate::index::InvertedIndex;
use crate::model::DocId;

/// Tuning constants for the BM25 formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term-frequency saturation. Higher values let repeated terms keep
    /// contributing to the score for longer before saturating.
    pub k1: f64,
    /// Length normalization strength, in `[0.0, 1.0]`. `0.0` disables length
    /// normalization entirely; `1.0` normalizes fully by document length.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.5, b: 0.75 }
    }
}

/// Scores and ranks documents against a query's term set using BM25.
pub struct Ranker {
    params: Bm25Params,
}

impl Ranker {
    /// Builds a ranker with the given tuning constants.
    pub fn new(params: Bm25Params) -> Self {
        Self { params }
    }

    /// Inverse document frequency of `term` over the corpus in `index`.
    ///
    /// `ln((N - df + 0.5) / (df + 0.5) + 1.0)`. The `+ 1.0` keeps this
    /// non-negative even when a term appears in more than half the corpus,
    /// so a caller never has to guard against a term that *lowers* a
    /// document's score.
    pub fn idf(&self, index: &InvertedIndex, term: &str) -> f64 {
        let n = index.document_count() as f64;
        let df = index.doc_freq(term) as f64;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    /// Mean document length over the corpus, or `0.0` for an empty index.
    pub fn average_doc_length(&self, index: &InvertedIndex) -> f64 {
        let doc_ids: Vec<DocId> = index.all_doc_ids().collect();
        if doc_ids.is_empty() {
            return 0.0;
        }
        let total: usize = doc_ids.iter().map(|&id| index.get_doc_length(id)).sum();
        total as f64 / doc_ids.len() as f64
    }

    /// BM25 score of `doc_id` against the (deduplicated) query `terms`.
    ///
    /// A term absent from `doc_id`'s postings contributes `0.0`, not an
    /// error or a negative score — the scoring formula is total over all
    /// well-formed inputs.
    pub fn score_document(
        &self,
        index: &InvertedIndex,
        terms: &[String],
        doc_id: DocId,
        avg_doc_length: f64,
    ) -> f64 {
        let doc_length = index.get_doc_length(doc_id) as f64;
        let unique_terms: HashSet<&String> = terms.iter().collect();

        unique_terms
            .into_iter()
            .map(|term| {
                let postings = index.get_postings(term);
                let tf = postings
                    .iter()
                    .find(|posting| posting.doc_id == doc_id)
                    .map(|posting| posting.term_frequency() as f64)
                    .unwrap_or(0.0);
                if tf == 0.0 {
                    return 0.0;
                }

                let idf = self.idf(index, term);
                let denom_length_term = if avg_doc_length > 0.0 {
                    self.params.b * doc_length / avg_doc_length
                } else {
                    0.0
                };
                let numerator = tf * (self.params.k1 + 1.0);
                let denominator = tf + self.params.k1 * (1.0 - self.params.b + denom_length_term);
                idf * (numerator / denominator)
            })
            .sum()
    }

    /// Scores every candidate document and returns them sorted by score
    /// descending, ties broken by ascending [`DocId`] (stable, deterministic
    /// regardless of candidate iteration order).
    pub fn rank(
        &self,
        index: &InvertedIndex,
        terms: &[String],
        candidates: impl IntoIterator<Item = DocId>,
    ) -> Vec<(DocId, f64)> {
        let avg_doc_length = self.average_doc_length(index);
        let mut scored: Vec<(DocId, f64)> = candidates
            .into_iter()
            .map(|doc_id| {
                let score = self.score_document(index, terms, doc_id, avg_doc_length);
                (doc_id, score)
            })
            .collect();

        scored.sort_by(|(a_id, a_score), (b_id, b_score)| {
            b_score
                .partial_cmp(a_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a_id.cmp(b_id))
        });
        scored
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(Bm25Params::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentMeta;

    fn index_document(index: &mut InvertedIndex, doc_id: DocId, tokens: &[&str]) {
        for (position, token) in tokens.iter().enumerate() {
            index.add_term(token, doc_id, position as u32);
        }
        index.set_doc_length(doc_id, tokens.len());
        index.add_doc_meta(DocumentMeta {
            id: doc_id,
            path: format!("doc-{doc_id}.txt").into(),
            title: format!("doc-{doc_id}"),
            length: tokens.len(),
        });
    }

    #[test]
    fn more_matching_term_frequency_ranks_higher() {
        let mut index = InvertedIndex::new();
        index_document(&mut index, 1, &["fox", "fox", "fox", "dog"]);
        index_document(&mut index, 2, &["fox", "cat", "bird", "tree"]);

        let ranker = Ranker::default();
        let terms = vec!["fox".to_string()];
        let ranked = ranker.rank(&index, &terms, [1, 2]);

        assert_eq!(ranked[0].0, 1);
        assert!(ranked[0].1 > ranked[1].1);
    }

    #[test]
    fn absent_term_contributes_zero() {
        let mut index = InvertedIndex::new();
        index_document(&mut index, 1, &["fox", "dog"]);

        let ranker = Ranker::default();
        let terms = vec!["giraffe".to_string()];
        let ranked = ranker.rank(&index, &terms, [1]);
        assert_eq!(ranked[0].1, 0.0);
    }

    #[test]
    fn ties_break_by_ascending_doc_id() {
        let mut index = InvertedIndex::new();
        index_document(&mut index, 5, &["fox"]);
        index_document(&mut index, 2, &["fox"]);

        let ranker = Ranker::default();
        let terms = vec!["fox".to_string()];
        let ranked = ranker.rank(&index, &terms, [5, 2]);
        assert_eq!(ranked[0].1, ranked[1].1);
        assert_eq!(ranked[0].0, 2);
        assert_eq!(ranked[1].0, 5);
    }

    #[test]
    fn idf_is_never_negative() {
        let mut index = InvertedIndex::new();
        index_document(&mut index, 1, &["fox"]);
        index_document(&mut index, 2, &["fox"]);
        index_document(&mut index, 3, &["fox"]);

        let ranker = Ranker::default();
        assert!(ranker.idf(&index, "fox") >= 0.0);
    }

    #[test]
    fn empty_index_average_length_is_zero() {
        let index = InvertedIndex::new();
        let ranker = Ranker::default();
        assert_eq!(ranker.average_doc_length(&index), 0.0);
    }

    #[test]
    fn duplicate_query_terms_do_not_double_count_idf() {
        let mut index = InvertedIndex::new();
        index_document(&mut index, 1, &["fox", "fox"]);

        let ranker = Ranker::default();
        let single = ranker.score_document(&index, &["fox".to_string()], 1, 2.0);
        let duplicated =
            ranker.score_document(&index, &["fox".to_string(), "fox".to_string()], 1, 2.0);
        assert_eq!(single, duplicated);
    }
}
