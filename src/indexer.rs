//! Turns files on disk into entries in an [`InvertedIndex`].
//!
//! `index_file` indexes one document; `index_directory` walks a directory
//! recursively with [`ignore::WalkBuilder`] (the same crate
//! `gik-core`'s file discovery uses), skipping and logging unsupported or
//! unreadable files rather than aborting the whole walk (spec.md §4.3
//! "Failure handling").

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::error::IngestError;
use crate::index::InvertedIndex;
use crate::model::{DocId, DocumentMeta, Position};
use crate::reader::{DocumentReader, PlainTextReader};
use crate::tokenizer::Tokenizer;

/// File extensions (lowercase, no leading dot) `index_directory` enumerates
/// by default — spec.md §6's full supported-document-extension set, not
/// just the formats [`PlainTextReader`] can itself decode. Enumerating the
/// wider set and letting the reader reject what it can't handle means a
/// `.pdf` sitting next to a `.txt` is still visited, logged, and skipped
/// (spec.md §4.3), rather than silently vanishing before any read is
/// attempted.
pub const ENUMERATED_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "doc", "docx", "ppt", "pptx", "xls", "xlsx", "htm", "html", "xml",
];

/// Assigns document ids and feeds tokenized text into an [`InvertedIndex`].
pub struct Indexer {
    tokenizer: Tokenizer,
    reader: Arc<dyn DocumentReader>,
    extensions: Vec<String>,
    next_doc_id: AtomicU64,
}

impl Indexer {
    /// Builds an indexer with the default tokenizer, [`PlainTextReader`],
    /// and [`ENUMERATED_EXTENSIONS`].
    pub fn new() -> Self {
        Self::with_reader(Arc::new(PlainTextReader))
    }

    /// Builds an indexer using a custom [`DocumentReader`], enumerating
    /// [`ENUMERATED_EXTENSIONS`] — the reader decides which of those it can
    /// actually decode.
    pub fn with_reader(reader: Arc<dyn DocumentReader>) -> Self {
        Self::with_reader_and_extensions(
            reader,
            ENUMERATED_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        )
    }

    /// Builds an indexer using a custom [`DocumentReader`] and the set of
    /// extensions `index_directory` should walk into, for an
    /// [`crate::engine::EngineConfig`] override.
    pub fn with_reader_and_extensions(reader: Arc<dyn DocumentReader>, extensions: Vec<String>) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            reader,
            extensions,
            next_doc_id: AtomicU64::new(1),
        }
    }

    /// Builds an indexer with a caller-supplied tokenizer (e.g. one with an
    /// overridden stopword list), reader, and extension list.
    pub fn with_tokenizer(
        tokenizer: Tokenizer,
        reader: Arc<dyn DocumentReader>,
        extensions: Vec<String>,
    ) -> Self {
        Self {
            tokenizer,
            reader,
            extensions,
            next_doc_id: AtomicU64::new(1),
        }
    }

    /// Reads, tokenizes, and indexes a single file, returning its assigned
    /// [`DocId`].
    pub fn index_file(&self, index: &mut InvertedIndex, path: &Path) -> Result<DocId, IngestError> {
        if !path.is_file() {
            return Err(IngestError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let text = self.reader.read(path)?;
        let tokens = self.tokenizer.tokenize(&text);
        let doc_id = self.next_doc_id.fetch_add(1, Ordering::SeqCst);

        for (position, token) in tokens.iter().enumerate() {
            index.add_term(token, doc_id, position as Position);
        }
        index.set_doc_length(doc_id, tokens.len());
        index.add_doc_meta(DocumentMeta {
            id: doc_id,
            path: path.to_path_buf(),
            title: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned()),
            length: tokens.len(),
        });

        debug!(doc_id, path = %path.display(), tokens = tokens.len(), "indexed document");
        Ok(doc_id)
    }

    /// Walks `root` recursively, indexing every file whose extension is in
    /// `self.extensions` (defaults to [`ENUMERATED_EXTENSIONS`]). Per-file
    /// read failures — including a reader rejecting an enumerated but
    /// unsupported format — are logged and skipped; the walk itself never
    /// aborts because one document failed.
    ///
    /// Returns the ids of the documents that were successfully indexed, in
    /// the order the walk visited them.
    pub fn index_directory(&self, index: &mut InvertedIndex, root: &Path) -> Vec<DocId> {
        let mut indexed = Vec::new();
        let walker = WalkBuilder::new(root).build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "failed to walk directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let has_supported_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| self.extensions.iter().any(|supported| supported == &ext.to_lowercase()))
                .unwrap_or(false);
            if !has_supported_extension {
                continue;
            }

            match self.index_file(index, path) {
                Ok(doc_id) => indexed.push(doc_id),
                Err(err) => warn!(path = %path.display(), error = %err, "skipped document"),
            }
        }

        indexed
    }
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn index_file_assigns_increasing_ids() {
        let indexer = Indexer::new();
        let mut index = InvertedIndex::new();

        let mut a = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(a, "fox").unwrap();
        let mut b = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(b, "dog").unwrap();

        let id_a = indexer.index_file(&mut index, a.path()).unwrap();
        let id_b = indexer.index_file(&mut index, b.path()).unwrap();
        assert!(id_b > id_a);
    }

    #[test]
    fn index_file_rejects_unsupported_extension() {
        let indexer = Indexer::new();
        let mut index = InvertedIndex::new();
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        let err = indexer.index_file(&mut index, file.path()).unwrap_err();
        assert!(matches!(err, IngestError::Reader(_)));
    }

    #[test]
    fn index_directory_skips_unsupported_files_and_indexes_the_rest() {
        let indexer = Indexer::new();
        let mut index = InvertedIndex::new();
        let dir = tempfile::tempdir().unwrap();

        fs::write(dir.path().join("a.txt"), "quick fox").unwrap();
        fs::write(dir.path().join("b.pdf"), b"%PDF-1.4 binary").unwrap();
        fs::write(dir.path().join("c.txt"), "lazy dog").unwrap();

        let indexed = indexer.index_directory(&mut index, dir.path());
        assert_eq!(indexed.len(), 2);
        assert_eq!(index.document_count(), 2);
    }

    #[test]
    fn index_directory_descends_into_subdirectories() {
        let indexer = Indexer::new();
        let mut index = InvertedIndex::new();
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("d.txt"), "red fox").unwrap();

        let indexed = indexer.index_directory(&mut index, dir.path());
        assert_eq!(indexed.len(), 1);
    }
}
