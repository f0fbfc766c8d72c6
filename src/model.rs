//! Shared data types for the retrieval core.
//!
//! Terms, document identifiers, positions, and the structures the
//! [`crate::index`] module persists are kept here so the tokenizer, the
//! index, and the ranker all agree on a single vocabulary of types.

use std::path::PathBuf;

/// Process-unique identifier assigned to an indexed document. Monotonically
/// increasing, never reused within a process lifetime.
pub type DocId = u64;

/// 0-based ordinal of a term within a document's *emitted* token stream —
/// after stopword and length filtering, not the original character offset.
pub type Position = u32;

/// A term's occurrences within a single document.
///
/// Positions are strictly increasing; all positions in one `Posting` belong
/// to the same [`DocId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    /// Document this posting belongs to.
    pub doc_id: DocId,
    positions: Vec<Position>,
}

impl Posting {
    pub(crate) fn new(doc_id: DocId, position: Position) -> Self {
        Self {
            doc_id,
            positions: vec![position],
        }
    }

    /// Appends a position. Positions for a given `(term, doc_id)` pair must
    /// arrive in strictly increasing order; the `Indexer` guarantees this by
    /// construction (it emits positions in source order), so this is a debug
    /// assertion rather than a recoverable error.
    pub(crate) fn push(&mut self, position: Position) {
        debug_assert!(
            self.positions
                .last()
                .map_or(true, |&last| position > last),
            "positions for a (term, doc_id) pair must be strictly increasing"
        );
        self.positions.push(position);
    }

    /// Term frequency: number of occurrences of the term in this document.
    pub fn term_frequency(&self) -> usize {
        self.positions.len()
    }

    /// The positions (strictly ascending) of the term within the document.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

/// Metadata recorded for a document at ingest time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    /// Identifier assigned by the `Indexer`.
    pub id: DocId,
    /// Path the document was read from.
    pub path: PathBuf,
    /// Display title — the file's basename.
    pub title: String,
    /// Count of emitted tokens (sum of term frequencies for this document).
    pub length: usize,
}
