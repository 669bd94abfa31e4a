//! Error types for lattice construction.

/// Errors raised by strict lattice construction.
///
/// Lenient construction never fails; it records absent bounds as `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LatticeError {
    /// The top concept is not among the supplied concepts.
    #[error("top concept {top} is not among the {count} supplied concepts")]
    MissingTop {
        /// Display form of the expected top concept.
        top: String,
        /// Number of distinct supplied concepts.
        count: usize,
    },

    /// The bottom concept is not among the supplied concepts.
    #[error("bottom concept {bottom} is not among the {count} supplied concepts")]
    MissingBottom {
        /// Display form of the expected bottom concept.
        bottom: String,
        /// Number of distinct supplied concepts.
        count: usize,
    },
}
