//! Error types for reading and writing alignment documents.

use std::path::PathBuf;

/// Errors arising from alignment document I/O.
#[derive(Debug, thiserror::Error)]
pub enum AlignmentError {
    /// The document could not be read or written.
    #[error("alignment I/O failed for {}: {source}", path.display())]
    Io {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The document is not a valid alignment.
    #[error("invalid alignment document {origin}: {source}")]
    Json {
        /// Path (or `<string>`) of the document.
        origin: String,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },
}
