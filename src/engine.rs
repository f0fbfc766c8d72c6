//! The crate's facade: wires the tokenizer, index, indexer, and search
//! service together behind a single reader/writer lock.
//!
//! A `SearchEngine` is the entry point most callers want; the individual
//! components ([`crate::indexer::Indexer`], [`crate::search::SearchService`],
//! [`crate::ranker::Ranker`]) stay public for callers who need to compose
//! them differently.

use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::{error, info, warn};

use crate::error::{IngestError, QueryError, ScoringError};
use crate::index::InvertedIndex;
use crate::indexer::{Indexer, ENUMERATED_EXTENSIONS};
use crate::model::DocId;
use crate::ranker::{Bm25Params, Ranker};
use crate::reader::{DocumentReader, PlainTextReader};
use crate::search::SearchService;
use crate::tokenizer::Tokenizer;

/// Length, in Unicode scalar values, of the snippet [`SearchEngine::search`]
/// includes with each hit.
const PREVIEW_LEN: usize = 150;

/// Placeholder preview text for a document whose content could not be
/// re-read at search time (the index stores tokens and metadata, not the
/// document body, so the preview is derived by re-reading `meta.path`).
const PREVIEW_UNAVAILABLE: &str = "(preview unavailable)";

/// Configuration for a [`SearchEngine`], overriding the spec defaults for
/// BM25 tuning, the stopword list, and which file extensions
/// `index_directory` walks into.
pub struct EngineConfig {
    bm25: Bm25Params,
    stopwords: Option<Vec<String>>,
    extensions: Option<Vec<String>>,
    reader: Option<Box<dyn DocumentReader>>,
}

impl EngineConfig {
    /// Starts from the spec defaults: `k1 = 1.5`, `b = 0.75`, the closed
    /// stopword list, [`ENUMERATED_EXTENSIONS`], and [`PlainTextReader`].
    pub fn new() -> Self {
        Self {
            bm25: Bm25Params::default(),
            stopwords: None,
            extensions: None,
            reader: None,
        }
    }

    /// Overrides the BM25 term-frequency saturation constant.
    pub fn k1(mut self, k1: f64) -> Self {
        self.bm25.k1 = k1;
        self
    }

    /// Overrides the BM25 length-normalization constant.
    pub fn b(mut self, b: f64) -> Self {
        self.bm25.b = b;
        self
    }

    /// Overrides the document tokenizer's stopword list.
    pub fn stopwords(mut self, stopwords: Vec<String>) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    /// Overrides which file extensions `index_directory` walks into.
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = Some(extensions);
        self
    }

    /// Overrides the [`DocumentReader`] used to turn a path into text.
    pub fn reader(mut self, reader: Box<dyn DocumentReader>) -> Self {
        self.reader = Some(reader);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub title: String,
    pub score: f64,
    /// The first [`PREVIEW_LEN`] Unicode scalar values of the document's
    /// text, re-read from `meta.path` via the engine's [`DocumentReader`],
    /// with a trailing `"..."` when the document is longer than that. Falls
    /// back to [`PREVIEW_UNAVAILABLE`] if the document has no metadata or
    /// can no longer be read (moved, deleted, or permissions changed since
    /// indexing).
    pub preview: String,
}

/// Indexes documents and answers search queries, enforcing single-writer,
/// multiple-reader access to the underlying [`InvertedIndex`] (spec.md §5).
pub struct SearchEngine {
    index: RwLock<InvertedIndex>,
    indexer: Indexer,
    search_service: SearchService,
    reader: Arc<dyn DocumentReader>,
}

impl SearchEngine {
    /// Builds an engine with the spec defaults.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Builds an engine from an [`EngineConfig`].
    pub fn with_config(config: EngineConfig) -> Self {
        let reader: Arc<dyn DocumentReader> = match config.reader {
            Some(reader) => Arc::from(reader),
            None => Arc::new(PlainTextReader),
        };
        let extensions = config
            .extensions
            .unwrap_or_else(|| ENUMERATED_EXTENSIONS.iter().map(|ext| ext.to_string()).collect());
        let tokenizer = match &config.stopwords {
            Some(stopwords) => Tokenizer::with_stopwords(stopwords),
            None => Tokenizer::new(),
        };

        let indexer = Indexer::with_tokenizer(tokenizer, Arc::clone(&reader), extensions);
        let ranker = Ranker::new(config.bm25);
        let search_service = SearchService::new(ranker);

        Self {
            index: RwLock::new(InvertedIndex::new()),
            indexer,
            search_service,
            reader,
        }
    }

    /// Indexes a single file. Acquires the write lock for the duration of
    /// this one document, so concurrent readers never observe a partially
    /// indexed document (spec.md §5).
    pub fn index_file(&self, path: &Path) -> Result<DocId, IngestError> {
        let mut index = self
            .index
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let doc_id = self.indexer.index_file(&mut index, path)?;
        info!(doc_id, path = %path.display(), "indexed document");
        Ok(doc_id)
    }

    /// Indexes every supported file under `root`, recursively. Returns the
    /// ids of the documents that were successfully indexed; files that
    /// failed to read are logged and skipped, not surfaced as an error
    /// (spec.md §4.3).
    pub fn index_directory(&self, root: &Path) -> Vec<DocId> {
        let mut index = self
            .index
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let indexed = self.indexer.index_directory(&mut index, root);
        info!(count = indexed.len(), root = %root.display(), "indexed directory");
        indexed
    }

    /// Runs `query` and returns ranked [`SearchHit`]s.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>, QueryError> {
        let index = self
            .index
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let ranked = match self.search_service.search(&index, query) {
            Ok(ranked) => ranked,
            Err(err) => {
                error!(query, error = %err, "query could not be evaluated");
                return Err(err);
            }
        };

        if let Some((doc_id, _)) = ranked.iter().find(|(_, score)| !score.is_finite()) {
            let fault = ScoringError::NonFiniteScore { doc_id: *doc_id };
            error!(query, error = %fault, "internal scoring fault, returning no results");
            return Ok(Vec::new());
        }

        Ok(ranked
            .into_iter()
            .map(|(doc_id, score)| self.to_hit(&index, doc_id, score))
            .collect())
    }

    /// Advisory fallback over the raw query text; see
    /// [`crate::search::SearchService::ranked_suggestions`].
    pub fn ranked_suggestions(&self, query: &str) -> Vec<SearchHit> {
        let index = self
            .index
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.search_service
            .ranked_suggestions(&index, query)
            .into_iter()
            .map(|(doc_id, score)| self.to_hit(&index, doc_id, score))
            .collect()
    }

    /// Number of documents currently indexed.
    pub fn document_count(&self) -> usize {
        self.index
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .document_count()
    }

    fn to_hit(&self, index: &InvertedIndex, doc_id: DocId, score: f64) -> SearchHit {
        let Some(meta) = index.get_doc_meta(doc_id) else {
            return SearchHit {
                doc_id,
                title: String::new(),
                score,
                preview: PREVIEW_UNAVAILABLE.to_string(),
            };
        };

        let preview = match self.reader.read(&meta.path) {
            Ok(text) => {
                let mut chars = text.chars();
                let snippet: String = chars.by_ref().take(PREVIEW_LEN).collect();
                if chars.next().is_some() {
                    format!("{snippet}...")
                } else {
                    snippet
                }
            }
            Err(err) => {
                warn!(doc_id, path = %meta.path.display(), error = %err, "could not re-read document for preview");
                PREVIEW_UNAVAILABLE.to_string()
            }
        };

        SearchHit {
            doc_id,
            title: meta.title.clone(),
            score,
            preview,
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn index_and_search_round_trip() {
        let engine = SearchEngine::new();
        let mut a = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(a, "the quick brown fox jumps over the lazy dog").unwrap();
        let mut b = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(b, "a completely unrelated document about weather").unwrap();

        engine.index_file(a.path()).unwrap();
        engine.index_file(b.path()).unwrap();

        let hits = engine.search("fox").unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].score > 0.0);
    }

    #[test]
    fn preview_is_re_read_from_the_document_body() {
        let engine = SearchEngine::new();
        let mut a = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(a, "the quick brown fox jumps over the lazy dog").unwrap();
        engine.index_file(a.path()).unwrap();

        let hits = engine.search("fox").unwrap();
        assert_eq!(hits[0].preview, "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn preview_is_truncated_with_an_ellipsis() {
        let engine = SearchEngine::new();
        let mut a = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let body = "fox ".repeat(100);
        write!(a, "{body}").unwrap();
        engine.index_file(a.path()).unwrap();

        let hits = engine.search("fox").unwrap();
        assert!(hits[0].preview.ends_with("..."));
        assert_eq!(hits[0].preview.chars().count(), PREVIEW_LEN + 3);
    }

    #[test]
    fn preview_falls_back_when_the_document_can_no_longer_be_read() {
        let engine = SearchEngine::new();
        {
            let mut a = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
            write!(a, "fox").unwrap();
            engine.index_file(a.path()).unwrap();
        } // `a` is dropped and its backing file deleted here.

        let hits = engine.search("fox").unwrap();
        assert_eq!(hits[0].preview, PREVIEW_UNAVAILABLE);
    }

    #[test]
    fn empty_query_is_not_an_error() {
        let engine = SearchEngine::new();
        assert_eq!(engine.search("").unwrap(), vec![]);
    }

    #[test]
    fn config_overrides_bm25_params() {
        let engine = SearchEngine::with_config(EngineConfig::default().k1(0.0).b(0.0));
        let mut a = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(a, "fox fox fox fox fox").unwrap();
        engine.index_file(a.path()).unwrap();
        let hits = engine.search("fox").unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn document_count_tracks_indexed_documents() {
        let engine = SearchEngine::new();
        assert_eq!(engine.document_count(), 0);
        let mut a = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(a, "fox").unwrap();
        engine.index_file(a.path()).unwrap();
        assert_eq!(engine.document_count(), 1);
    }

    #[test]
    fn scoring_error_reports_the_offending_document() {
        let fault = ScoringError::NonFiniteScore { doc_id: 7 };
        assert_eq!(
            fault.to_string(),
            "non-finite score computing relevance for document 7"
        );
    }
}
