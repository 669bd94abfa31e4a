//! In-memory ontology model for fcamap.
//!
//! The `fcamap-model` crate is the boundary with ontology providers: it
//! describes a loaded ontology as classes, datatype/object properties and
//! named individuals, each identified by its full IRI, plus the lexical
//! features the matchers extract from their names.
//!
//! # Entry Point
//!
//! ```
//! use fcamap_model::{Class, Ontology};
//!
//! let mut ontology = Ontology::new("http://ekaw");
//! ontology.classes.push(Class {
//!     id: "http://ekaw#ConferenceMember".to_owned(),
//!     labels: vec![],
//!     subclass_of: vec![],
//! });
//! assert!(ontology.name_tokens("http://ekaw#ConferenceMember").contains("member"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod lexical;
pub mod model;

pub use error::ModelError;
pub use model::{iris, Class, Individual, Ontology, Property, PropertyKind};
