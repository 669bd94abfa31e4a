//! Matcher contracts and the FCA projection shared by concrete matchers.
//!
//! A matcher is configured with a source and a target ontology, then asked
//! to enlarge a [`Mapping`] in place. Capabilities are separate traits so a
//! concrete matcher provides only what it can:
//!
//! ```text
//! MatcherSetting            ← source/target models, type extraction, close
//!   ├─ ClassMatcher         ← map_classes
//!   ├─ PropertyMatcher      ← map_datatype_properties, map_object_properties
//!   └─ InstanceMatcher      ← map_instances
//! Matcher = all three
//! ```
//!
//! Property matching does not depend on class matching having run first;
//! any type information a matcher needs is read from the models on demand.

pub mod additional;
pub mod factory;
pub mod lexical;

use std::fmt;
use std::sync::Arc;

use fcamap_alignment::Mapping;
use fcamap_fca::{ConceptLattice, FormalContext, LatticeOptions};
use fcamap_model::Ontology;

use crate::error::MatchError;

/// Shared configuration surface of every matcher.
pub trait MatcherSetting {
    /// Sets the ontologies to match. Replaces any previous pair.
    fn set_source_target(&mut self, source: Arc<Ontology>, target: Arc<Ontology>);

    /// Chooses whether declared types are used on each side. Matchers that
    /// do not use type information ignore this.
    fn set_extract_type(&mut self, source: bool, target: bool) {
        let _ = (source, target);
    }

    /// Releases the ontologies. Safe to call at any time, repeatedly.
    fn close(&mut self);
}

/// Adds class ↔ class correspondences.
pub trait ClassMatcher: MatcherSetting {
    /// Adds class correspondences to `mapping`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotConfigured`] before `set_source_target`.
    fn map_classes(&mut self, mapping: &mut Mapping) -> Result<(), MatchError>;
}

/// Adds property ↔ property correspondences, per property kind.
pub trait PropertyMatcher: MatcherSetting {
    /// Adds datatype and object property correspondences.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotConfigured`] before `set_source_target`.
    fn map_properties(&mut self, mapping: &mut Mapping) -> Result<(), MatchError> {
        self.map_datatype_properties(mapping)?;
        self.map_object_properties(mapping)
    }

    /// Adds datatype property correspondences.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotConfigured`] before `set_source_target`.
    fn map_datatype_properties(&mut self, mapping: &mut Mapping) -> Result<(), MatchError>;

    /// Adds object property correspondences.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotConfigured`] before `set_source_target`.
    fn map_object_properties(&mut self, mapping: &mut Mapping) -> Result<(), MatchError>;
}

/// Adds instance ↔ instance correspondences.
pub trait InstanceMatcher: MatcherSetting {
    /// Adds instance correspondences to `mapping`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotConfigured`] before `set_source_target`.
    fn map_instances(&mut self, mapping: &mut Mapping) -> Result<(), MatchError>;
}

/// A matcher providing every capability.
pub trait Matcher: ClassMatcher + PropertyMatcher + InstanceMatcher {}

impl<T: ClassMatcher + PropertyMatcher + InstanceMatcher> Matcher for T {}

/// Which ontology an entity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// The source ontology.
    Source,
    /// The target ontology.
    Target,
}

/// A lattice object: an entity IRI tagged with its side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    /// Side the entity belongs to.
    pub side: Side,
    /// Full IRI.
    pub iri: String,
}

impl Entity {
    /// A source-side entity.
    pub fn source(iri: impl Into<String>) -> Self {
        Self {
            side: Side::Source,
            iri: iri.into(),
        }
    }

    /// A target-side entity.
    pub fn target(iri: impl Into<String>) -> Self {
        Self {
            side: Side::Target,
            iri: iri.into(),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.side {
            Side::Source => 's',
            Side::Target => 't',
        };
        write!(f, "{tag}:{}", self.iri)
    }
}

/// The configured source/target pair of a matcher or refiner.
#[derive(Debug, Clone, Default)]
pub(crate) struct Models(Option<(Arc<Ontology>, Arc<Ontology>)>);

impl Models {
    pub(crate) fn set(&mut self, source: Arc<Ontology>, target: Arc<Ontology>) {
        self.0 = Some((source, target));
    }

    pub(crate) fn clear(&mut self) {
        self.0 = None;
    }

    pub(crate) fn get(&self, operation: &'static str) -> Result<(Arc<Ontology>, Arc<Ontology>), MatchError> {
        self.0
            .as_ref()
            .map(|(s, t)| (Arc::clone(s), Arc::clone(t)))
            .ok_or(MatchError::NotConfigured { operation })
    }
}

/// Closes `context` and orders its concepts top-down.
pub(crate) fn ordered_lattice(
    context: &FormalContext<Entity, String>,
    options: LatticeOptions,
) -> Result<ConceptLattice<Entity, String>, MatchError> {
    let mut lattice = ConceptLattice::with_options(context.concepts(), options)?;
    lattice.build_top_down();
    Ok(lattice)
}

/// Orders the concepts of `context` into a lattice and returns every
/// `(source, target)` IRI pair that is introduced alone at some lattice node:
/// the node's introduced objects are exactly one source and one target
/// entity, so the two carry identical attribute sets that no other entity
/// shares.
pub(crate) fn one_to_one_pairs(
    context: &FormalContext<Entity, String>,
    options: LatticeOptions,
) -> Result<Vec<(String, String)>, MatchError> {
    let lattice = ordered_lattice(context, options)?;

    let mut pairs = Vec::new();
    for id in lattice.ids() {
        let introduced = lattice.introduced_objects(id);
        let mut sources = introduced.iter().filter(|e| e.side == Side::Source);
        let mut targets = introduced.iter().filter(|e| e.side == Side::Target);
        if let (Some(s), None, Some(t), None) =
            (sources.next(), sources.next(), targets.next(), targets.next())
        {
            pairs.push((s.iri.clone(), t.iri.clone()));
        }
    }
    tracing::debug!(
        objects = context.object_count(),
        concepts = lattice.len(),
        pairs = pairs.len(),
        "projected lattice onto one-to-one pairs"
    );
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_identical_intents_pair_up() {
        let mut ctx = FormalContext::new();
        ctx.add(Entity::source("s#Paper"), ["paper".to_owned()]);
        ctx.add(Entity::target("t#paper"), ["paper".to_owned()]);
        ctx.add(Entity::source("s#Author"), ["author".to_owned()]);
        ctx.add(Entity::target("t#Reviewer"), ["reviewer".to_owned()]);

        let pairs = one_to_one_pairs(&ctx, LatticeOptions::default()).unwrap();
        assert_eq!(pairs, vec![("s#Paper".to_owned(), "t#paper".to_owned())]);
    }

    #[test]
    fn ambiguous_groups_are_skipped() {
        let mut ctx = FormalContext::new();
        ctx.add(Entity::source("s#Chair"), ["chair".to_owned()]);
        ctx.add(Entity::source("s#chair"), ["chair".to_owned()]);
        ctx.add(Entity::target("t#Chair"), ["chair".to_owned()]);

        let pairs = one_to_one_pairs(&ctx, LatticeOptions::default()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn subsumed_names_do_not_pair() {
        let mut ctx = FormalContext::new();
        ctx.add(Entity::source("s#Member"), ["member".to_owned()]);
        ctx.add(
            Entity::target("t#ConferenceMember"),
            ["conference".to_owned(), "member".to_owned()],
        );

        let pairs = one_to_one_pairs(&ctx, LatticeOptions::default()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn unconfigured_models_fail_loudly() {
        let models = Models::default();
        let err = models.get("map_classes").unwrap_err();
        assert_eq!(
            err.to_string(),
            "map_classes called before source and target ontologies were set"
        );
    }
}
