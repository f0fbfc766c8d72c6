//! Document reading.
//!
//! The inverted index and ranker operate purely on text; turning a path
//! into text is a separate, swappable concern (spec.md §1 "External
//! interfaces" names PDF/Office ingestion as owned by a collaborating
//! component, not this crate). [`DocumentReader`] is the seam: the shipped
//! [`PlainTextReader`] handles the handful of formats that are already
//! plain text, and rejects everything else with
//! [`ReaderError::UnsupportedExtension`] rather than guessing.

use std::path::Path;

use crate::error::ReaderError;

/// File extensions (lowercase, no leading dot) [`PlainTextReader`] accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "htm", "html", "xml"];

/// Converts a file on disk into the text the tokenizer should see.
///
/// Implementations are expected to be cheap to construct and safe to share
/// across threads — [`crate::indexer::Indexer`] holds one for the lifetime
/// of an `index_directory` walk.
pub trait DocumentReader: Send + Sync {
    /// Reads `path`, returning its text content.
    fn read(&self, path: &Path) -> Result<String, ReaderError>;
}

/// Default [`DocumentReader`]: reads UTF-8 text for the extensions in
/// [`SUPPORTED_EXTENSIONS`] verbatim, with no HTML/XML tag stripping — the
/// tokenizer's term-extraction regex already ignores `<`, `>`, and `/`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextReader;

impl DocumentReader for PlainTextReader {
    fn read(&self, path: &Path) -> Result<String, ReaderError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        let Some(extension) = extension else {
            return Err(ReaderError::MissingExtension {
                path: path.to_path_buf(),
            });
        };

        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ReaderError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension,
            });
        }

        let bytes = std::fs::read(path).map_err(|source| ReaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        String::from_utf8(bytes).map_err(|_| ReaderError::InvalidEncoding {
            path: path.to_path_buf(),
        })
    }
}
