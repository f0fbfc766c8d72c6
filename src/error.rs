//! Error taxonomy.
//!
//! Three public enums, one per failure surface named in spec.md §7:
//! reading a document ([`ReaderError`]), ingesting one into the index
//! ([`IngestError`], which wraps [`ReaderError`]), and parsing/evaluating a
//! query string ([`QueryError`], which wraps the query lexer's and parser's
//! own error types). Modeled on `gik_core::errors::GikError` rather than
//! `rank_retrieve`'s hand-rolled `Display` impls: each variant derives its
//! message from `#[error(...)]` and its source chain from `#[source]` /
//! `#[from]`, so callers can match on `std::error::Error::source()` instead
//! of string-matching a formatted message.

use std::path::PathBuf;

use thiserror::Error;

use crate::query::lexer::LexError;
use crate::query::parser::ParseError;

/// Failure reading the raw bytes or text of a document.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The file's extension has no registered [`crate::reader::DocumentReader`].
    #[error("unsupported file extension {extension:?} ({})", path.display())]
    UnsupportedExtension { path: PathBuf, extension: String },

    /// The file has no extension at all.
    #[error("file has no extension: {}", path.display())]
    MissingExtension { path: PathBuf },

    /// The underlying I/O operation failed.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file's bytes were not valid UTF-8.
    #[error("{} is not valid UTF-8", path.display())]
    InvalidEncoding { path: PathBuf },
}

/// Failure indexing a single document. Wraps [`ReaderError`] so a caller
/// walking a directory can log-and-skip on a per-file basis (spec.md §4.3
/// "Failure handling").
#[derive(Debug, Error)]
pub enum IngestError {
    /// The document could not be read.
    #[error("could not read document")]
    Reader(#[from] ReaderError),

    /// The path did not refer to a regular file.
    #[error("not a regular file: {}", path.display())]
    NotAFile { path: PathBuf },
}

/// An unexpected fault while scoring a candidate document.
///
/// Every arithmetic path in [`crate::ranker::Ranker`] is guarded (idf's
/// `+ 1.0` keeps it non-negative, the length-normalization term checks for
/// a zero average length) so this should never be constructed in normal
/// operation. [`crate::engine::SearchEngine::search`] checks for it anyway,
/// as a last line of defense against a non-finite score reaching a caller,
/// and treats it the way spec.md §7 directs: logged, not propagated —
/// the query simply returns no results.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// A document's computed score was `NaN` or infinite.
    #[error("non-finite score computing relevance for document {doc_id}")]
    NonFiniteScore { doc_id: u64 },
}

/// Failure lexing, parsing, or otherwise rejecting a query string before it
/// can be evaluated.
///
/// An empty or whitespace-only query is deliberately *not* a variant here —
/// per spec.md §4.7, `SearchService` short-circuits that case to an empty
/// result set rather than treating it as an error.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query string could not be tokenized.
    #[error("could not lex query")]
    Lex(#[from] LexError),

    /// The token stream did not form a valid query.
    #[error("could not parse query")]
    Parse(#[from] ParseError),
}
