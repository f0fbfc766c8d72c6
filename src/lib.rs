//! Small-corpus lexical search.
//!
//! A tokenizer, a positional inverted index, a Boolean/phrase query
//! language with its own lexer and parser, and a BM25 ranker, wired
//! together behind [`engine::SearchEngine`]:
//!
//! ```no_run
//! use lex_search::engine::SearchEngine;
//!
//! let engine = SearchEngine::new();
//! engine.index_directory(std::path::Path::new("./docs")).len();
//! let hits = engine.search("quick fox").unwrap();
//! for hit in hits {
//!     println!("{}: {:.3}", hit.title, hit.score);
//! }
//! ```
//!
//! Ingestion covers plain text, HTML, and XML out of the box
//! ([`reader::PlainTextReader`]); PDF and Office formats are out of scope —
//! plug in a [`reader::DocumentReader`] that extracts their text and the
//! rest of the pipeline is unaffected.

pub mod engine;
pub mod error;
pub mod index;
pub mod indexer;
pub mod model;
pub mod query;
pub mod ranker;
pub mod reader;
pub mod search;
pub mod tokenizer;

pub use engine::{EngineConfig, SearchEngine, SearchHit};
pub use error::{IngestError, QueryError, ReaderError, ScoringError};
pub use model::{DocId, DocumentMeta, Position, Posting};
