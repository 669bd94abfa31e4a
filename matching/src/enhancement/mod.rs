//! Refiner contracts: one mapping validates and enhances another.
//!
//! A class refiner is fed instance correspondences as anchors and decides
//! which class candidates those anchors support. An instance refiner works
//! the other way round. Anchors are copied into the refiner; the candidate
//! mapping is never modified and the output receives only correspondences
//! of the refined category.

pub mod class_refiner;
pub mod factory;
pub mod instance_refiner;

use std::collections::BTreeSet;
use std::sync::Arc;

use fcamap_alignment::{Category, Mapping};
use fcamap_model::Ontology;

use crate::error::MatchError;

/// Shared configuration surface of every refiner.
pub trait RefinerSetting {
    /// Sets the ontologies the mappings refer to.
    fn set_source_target(&mut self, source: Arc<Ontology>, target: Arc<Ontology>);

    /// Releases the ontologies and forgets all anchors. Safe to call at any
    /// time, repeatedly.
    fn close(&mut self);
}

/// Validates class correspondences against instance anchors.
pub trait ClassRefiner: RefinerSetting {
    /// Records the instance correspondences of `anchors`. Repeated calls
    /// accumulate.
    fn add_instance_anchors(&mut self, anchors: &Mapping);

    /// Writes the supported class candidates, plus any new class pairs the
    /// anchors establish, into `output`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotConfigured`] before `set_source_target`.
    fn validate_class_anchors(&self, candidates: &Mapping, output: &mut Mapping) -> Result<(), MatchError>;
}

/// Validates instance correspondences against class anchors.
pub trait InstanceRefiner: RefinerSetting {
    /// Records the class correspondences of `anchors`. Repeated calls
    /// accumulate.
    fn add_class_anchors(&mut self, anchors: &Mapping);

    /// Writes the instance candidates consistent with the class anchors into
    /// `output`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotConfigured`] before `set_source_target`.
    fn validate_instance_anchors(&self, candidates: &Mapping, output: &mut Mapping) -> Result<(), MatchError>;
}

/// Copies the (source, target) pairs of one category.
pub(crate) fn anchor_pairs(mapping: &Mapping, category: Category) -> impl Iterator<Item = (String, String)> + '_ {
    mapping
        .iter_category(category)
        .map(|c| (c.source.clone(), c.target.clone()))
}

/// Anchor pairs held by a refiner.
pub(crate) type Anchors = BTreeSet<(String, String)>;
