//! Formal Concept Analysis for ontology matching.
//!
//! The `fcamap-fca` crate provides three layers:
//!
//! ```text
//! FormalContext<O, A>   ← object → attribute incidence
//!     │  concepts()
//! Concept<O, A>         ← (extent, intent), structural equality
//!     │  ConceptLattice::new
//! ConceptLattice<O, A>  ← arena of concepts + covering relation (Hasse diagram)
//! ```
//!
//! # Entry Point
//!
//! ```
//! use fcamap_fca::{ConceptLattice, FormalContext};
//!
//! let mut context = FormalContext::new();
//! context.add(1, ['a', 'c']);
//! context.add(2, ['a']);
//! context.add(3, ['b']);
//!
//! let mut lattice = ConceptLattice::new(context.concepts());
//! lattice.build_bottom_up();
//! assert!(lattice.top_id().is_some());
//! assert!(lattice.bottom_id().is_some());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod concept;
pub mod context;
pub mod error;
pub mod lattice;

pub use concept::Concept;
pub use context::FormalContext;
pub use error::LatticeError;
pub use lattice::{ConceptId, ConceptLattice, LatticeOptions};
