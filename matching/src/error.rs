//! Error types for matching, refinement and configuration.

use std::path::PathBuf;

use fcamap_fca::LatticeError;

/// Errors raised by matchers and refiners.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// A mapping operation ran before `set_source_target` (or after `close`).
    #[error("{operation} called before source and target ontologies were set")]
    NotConfigured {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// Strict lattice construction rejected the concept set.
    #[error(transparent)]
    Lattice(#[from] LatticeError),
}

/// Errors arising while loading a matcher configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {}: {source}", path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has unknown keys.
    #[error("invalid configuration {origin}: {source}")]
    Toml {
        /// Path (or `<string>`) of the configuration.
        origin: String,
        /// Underlying TOML failure.
        source: toml::de::Error,
    },
}
