//! Inverted index: term → positional postings, plus document metadata and
//! lengths.
//!
//! Mirrors the data model of `rank_retrieve::bm25::InvertedIndex`, extended
//! to store positions (not just a bare term-frequency count) so the ranker
//! can derive `tf` and a future caller can do positional phrase matching
//! (spec.md §9 Open Question 3) without re-tokenizing.
//!
//! All reads are total: an absent term, document, or id yields an empty
//! slice or zero, never an error (spec.md §4.2 "Failure semantics"). This
//! type does no locking of its own — per the Design Notes' "single
//! reader-writer lock" guidance, callers needing concurrent reader/writer
//! exclusion wrap it in a `RwLock` (see [`crate::engine::SearchEngine`]).

use std::collections::HashMap;

use crate::model::{DocId, DocumentMeta, Position, Posting};

/// Term → document postings, document lengths, and document metadata.
///
/// Entries are written once at ingest and never mutated or deleted
/// afterward (spec.md §3 "Lifecycle").
#[derive(Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<Posting>>,
    doc_lengths: HashMap<DocId, usize>,
    doc_meta: HashMap<DocId, DocumentMeta>,
}

impl InvertedIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `position` to the posting for `(term, doc_id)`, creating one
    /// if the last posting for `term` belongs to a different document.
    ///
    /// Requires positions for a given `(term, doc_id)` to be added in
    /// strictly increasing order — the `Indexer` guarantees this by
    /// emitting one call per token in source order.
    pub fn add_term(&mut self, term: &str, doc_id: DocId, position: Position) {
        let postings = self.postings.entry(term.to_lowercase()).or_default();
        match postings.last_mut() {
            Some(last) if last.doc_id == doc_id => last.push(position),
            _ => postings.push(Posting::new(doc_id, position)),
        }
    }

    /// Records the length (token count) of a document.
    pub fn set_doc_length(&mut self, doc_id: DocId, length: usize) {
        self.doc_lengths.insert(doc_id, length);
    }

    /// Length of `doc_id`, or `0` if not indexed.
    pub fn get_doc_length(&self, doc_id: DocId) -> usize {
        self.doc_lengths.get(&doc_id).copied().unwrap_or(0)
    }

    /// Records metadata for a document.
    pub fn add_doc_meta(&mut self, meta: DocumentMeta) {
        self.doc_meta.insert(meta.id, meta);
    }

    /// Metadata for `doc_id`, or `None` if not indexed.
    pub fn get_doc_meta(&self, doc_id: DocId) -> Option<&DocumentMeta> {
        self.doc_meta.get(&doc_id)
    }

    /// Postings for `term` (case-insensitive lookup), ordered by `DocId`
    /// ascending, or an empty slice if the term was never indexed.
    pub fn get_postings(&self, term: &str) -> &[Posting] {
        self.postings
            .get(&term.to_lowercase())
            .map_or(&[], |postings| postings.as_slice())
    }

    /// Number of postings for `term` — how many documents contain it.
    pub fn doc_freq(&self, term: &str) -> usize {
        self.get_postings(term).len()
    }

    /// All indexed document ids, in no particular order.
    pub fn all_doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.doc_lengths.keys().copied()
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.doc_lengths.len()
    }
}
