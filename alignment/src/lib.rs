//! Ontology alignments.
//!
//! A [`Mapping`] is the aggregate produced and consumed across matcher and
//! refiner boundaries: a set of [`Correspondence`]s between entities of a
//! source and a target ontology. Mappings round-trip through a small JSON
//! document form and can be scored against a reference with [`Evaluation`].
//!
//! # Entry Point
//!
//! ```
//! use fcamap_alignment::{Category, Evaluation, Mapping};
//!
//! let mut found = Mapping::new();
//! found.add("http://conference#Paper", "http://ekaw#Paper", Category::Class);
//!
//! let reference = found.clone();
//! assert!(Evaluation::compare(&found, &reference).is_exact());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod evaluation;
pub mod mapping;

pub use error::AlignmentError;
pub use evaluation::Evaluation;
pub use mapping::{Category, Correspondence, Mapping};
