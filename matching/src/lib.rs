//! FCA-based ontology matchers and anchor-driven refiners.
//!
//! The `fcamap-matching` crate turns two loaded ontologies into a
//! [`Mapping`]. Matchers build a formal context per entity kind, let
//! `fcamap-fca` order its concepts, and read correspondences off the
//! lattice. Refiners then validate one category of correspondences with
//! another used as anchors.
//!
//! ```text
//! Ontology × Ontology
//!     │  LexicalMatcher            classes, properties, instances
//!     │  AdditionalPropertyMatcher properties via class correspondences
//!     │  AnchoredClassRefiner      classes validated by instance anchors
//!     ▼
//! Mapping
//! ```
//!
//! # Entry Point
//!
//! ```
//! use std::sync::Arc;
//! use fcamap_matching::{run, MatchConfig};
//! use fcamap_model::{Class, Ontology};
//!
//! let class = |id: &str| Class { id: id.to_owned(), labels: vec![], subclass_of: vec![] };
//! let mut source = Ontology::new("http://ekaw");
//! source.classes.push(class("http://ekaw#ConferenceMember"));
//! let mut target = Ontology::new("http://cmt");
//! target.classes.push(class("http://cmt#Conference_Member"));
//!
//! let mapping = run(Arc::new(source), Arc::new(target), &MatchConfig::default())?;
//! assert_eq!(mapping.len(), 1);
//! # Ok::<(), fcamap_matching::MatchError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod enhancement;
pub mod error;
pub mod matching;

use std::sync::Arc;

use fcamap_alignment::{Category, Mapping};
use fcamap_model::Ontology;

pub use config::MatchConfig;
pub use enhancement::class_refiner::AnchoredClassRefiner;
pub use enhancement::factory::{create_class_refiner, create_instance_refiner};
pub use enhancement::instance_refiner::AnchoredInstanceRefiner;
pub use enhancement::{ClassRefiner, InstanceRefiner, RefinerSetting};
pub use error::{ConfigError, MatchError};
pub use matching::additional::AdditionalPropertyMatcher;
pub use matching::factory::{
    create_additional_property_matcher, create_lexical_matcher, create_property_matcher,
    MatcherKind, UnknownMatcher,
};
pub use matching::lexical::LexicalMatcher;
pub use matching::{
    ClassMatcher, Entity, InstanceMatcher, Matcher, MatcherSetting, PropertyMatcher, Side,
};

/// Runs one alignment between `source` and `target`.
///
/// Stages, in order:
/// 1. Lexical matching of classes and properties, then instances when
///    `match_instances` is set.
/// 2. The additional property pass when `additional_properties` is set.
/// 3. Class refinement against the instance correspondences when
///    `refine_classes` is set. Skipped when no instance was matched.
///
/// # Errors
///
/// Returns [`MatchError::Lattice`] when `strict_lattice` is set and a
/// lattice lacks its top or bottom concept.
pub fn run(source: Arc<Ontology>, target: Arc<Ontology>, config: &MatchConfig) -> Result<Mapping, MatchError> {
    tracing::info!(source = %source.iri, target = %target.iri, "alignment started");
    let mut mapping = Mapping::new();

    let mut lexical = create_lexical_matcher(config);
    lexical.set_source_target(Arc::clone(&source), Arc::clone(&target));
    lexical.map_classes(&mut mapping)?;
    lexical.map_properties(&mut mapping)?;
    if config.match_instances {
        lexical.map_instances(&mut mapping)?;
    }
    lexical.close();

    if config.additional_properties {
        let mut additional = create_additional_property_matcher(config);
        additional.set_source_target(Arc::clone(&source), Arc::clone(&target));
        additional.map_properties(&mut mapping)?;
        additional.close();
    }

    if config.refine_classes {
        mapping = refine_classes(mapping, source, target, config)?;
    }

    tracing::info!(
        classes = mapping.count_category(Category::Class),
        properties = mapping.count_category(Category::Property),
        instances = mapping.count_category(Category::Instance),
        "alignment finished"
    );
    Ok(mapping)
}

fn refine_classes(
    mapping: Mapping,
    source: Arc<Ontology>,
    target: Arc<Ontology>,
    config: &MatchConfig,
) -> Result<Mapping, MatchError> {
    if mapping.count_category(Category::Instance) == 0 {
        tracing::warn!("class refinement skipped: no instance correspondences to anchor on");
        return Ok(mapping);
    }

    let mut refiner = create_class_refiner(config);
    refiner.set_source_target(source, target);
    refiner.add_instance_anchors(&mapping);

    let mut refined: Mapping = mapping
        .iter()
        .filter(|c| c.category != Category::Class)
        .cloned()
        .collect();
    refiner.validate_class_anchors(&mapping, &mut refined)?;
    refiner.close();
    Ok(refined)
}
