//! Error types for loading ontology documents.

use std::path::PathBuf;

/// Errors arising while loading an ontology.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The document could not be read.
    #[error("failed to read ontology {}: {source}", path.display())]
    Io {
        /// Path of the unreadable document.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The document is not a valid ontology.
    #[error("failed to parse ontology {origin}: {source}")]
    Parse {
        /// Path (or `<string>`) of the malformed document.
        origin: String,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },
}
