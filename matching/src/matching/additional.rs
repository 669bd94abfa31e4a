//! Structural property matcher driven by existing class correspondences.
//!
//! Each class correspondence in the incoming mapping gets a canonical key
//! `k` (its position among the class correspondences). A property is then
//! described by the keys of its domain and range, so `s#writtenBy` with
//! domain `s#Paper` and `t#hasAuthor` with domain `t#Paper` share the
//! attribute `domain:k` once `s#Paper = t#Paper` is known. Datatype ranges
//! are XSD IRIs and are compared as-is.
//!
//! Properties lacking a domain or range, or whose domain or object range
//! has no class correspondence, are left out. Properties that already take
//! part in a property correspondence are skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use fcamap_alignment::{Category, Mapping};
use fcamap_fca::{FormalContext, LatticeOptions};
use fcamap_model::{Ontology, Property, PropertyKind};

use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::matching::{one_to_one_pairs, Entity, MatcherSetting, Models, PropertyMatcher, Side};

/// Property matcher over domain/range structure.
#[derive(Debug, Clone, Default)]
pub struct AdditionalPropertyMatcher {
    models: Models,
    options: LatticeOptions,
}

/// Canonical keys of the classes on one side of the class correspondences.
type ClassKeys<'m> = BTreeMap<&'m str, BTreeSet<usize>>;

impl AdditionalPropertyMatcher {
    /// Creates an unconfigured matcher with lenient lattice construction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unconfigured matcher from run settings.
    #[must_use]
    pub fn with_config(config: &MatchConfig) -> Self {
        Self {
            models: Models::default(),
            options: config.lattice_options(),
        }
    }

    fn map_kind(
        &self,
        kind: PropertyKind,
        operation: &'static str,
        mapping: &mut Mapping,
    ) -> Result<(), MatchError> {
        let (source, target) = self.models.get(operation)?;

        let mut source_keys = ClassKeys::new();
        let mut target_keys = ClassKeys::new();
        for (k, c) in mapping.iter_category(Category::Class).enumerate() {
            source_keys.entry(c.source.as_str()).or_default().insert(k);
            target_keys.entry(c.target.as_str()).or_default().insert(k);
        }
        if source_keys.is_empty() {
            tracing::debug!(kind = kind.as_str(), "no class correspondences to anchor properties");
            return Ok(());
        }

        let matched_sources: BTreeSet<&str> = mapping
            .iter_category(Category::Property)
            .map(|c| c.source.as_str())
            .collect();
        let matched_targets: BTreeSet<&str> = mapping
            .iter_category(Category::Property)
            .map(|c| c.target.as_str())
            .collect();

        let mut context = FormalContext::new();
        add_properties(
            &mut context,
            &source,
            kind,
            Side::Source,
            &source_keys,
            &matched_sources,
        );
        add_properties(
            &mut context,
            &target,
            kind,
            Side::Target,
            &target_keys,
            &matched_targets,
        );

        let pairs = if context.is_empty() {
            Vec::new()
        } else {
            one_to_one_pairs(&context, self.options)?
        };

        let added = pairs
            .into_iter()
            .filter(|(s, t)| mapping.add(s.as_str(), t.as_str(), Category::Property))
            .count();
        tracing::info!(kind = kind.as_str(), added, "additional property matching done");
        Ok(())
    }
}

fn add_properties(
    context: &mut FormalContext<Entity, String>,
    ontology: &Ontology,
    kind: PropertyKind,
    side: Side,
    keys: &ClassKeys<'_>,
    matched: &BTreeSet<&str>,
) {
    for property in ontology.properties_of_kind(kind) {
        if matched.contains(property.id.as_str()) {
            continue;
        }
        if let Some(attributes) = structural_attributes(property, keys) {
            let entity = Entity {
                side,
                iri: property.id.clone(),
            };
            context.add(entity, attributes);
        }
    }
}

fn structural_attributes(property: &Property, keys: &ClassKeys<'_>) -> Option<BTreeSet<String>> {
    let domain = keys.get(property.domain.as_deref()?)?;
    let range = property.range.as_deref()?;

    let mut attributes: BTreeSet<String> = domain.iter().map(|k| format!("domain:{k}")).collect();
    match property.kind {
        PropertyKind::Object => {
            attributes.extend(keys.get(range)?.iter().map(|k| format!("range:{k}")));
        }
        PropertyKind::Datatype | PropertyKind::Annotation => {
            attributes.insert(format!("range:{range}"));
        }
    }
    Some(attributes)
}

impl MatcherSetting for AdditionalPropertyMatcher {
    fn set_source_target(&mut self, source: Arc<Ontology>, target: Arc<Ontology>) {
        self.models.set(source, target);
    }

    fn close(&mut self) {
        self.models.clear();
    }
}

impl PropertyMatcher for AdditionalPropertyMatcher {
    fn map_datatype_properties(&mut self, mapping: &mut Mapping) -> Result<(), MatchError> {
        self.map_kind(PropertyKind::Datatype, "map_datatype_properties", mapping)
    }

    fn map_object_properties(&mut self, mapping: &mut Mapping) -> Result<(), MatchError> {
        self.map_kind(PropertyKind::Object, "map_object_properties", mapping)
    }
}
