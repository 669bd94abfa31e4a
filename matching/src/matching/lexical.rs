//! Lexical matcher: entities are matched when they are the only source and
//! target entity carrying a given set of name tokens.
//!
//! One formal context is built per entity kind, with (side, IRI) entities
//! as objects and normalized name tokens as attributes. After closing the
//! context and ordering it into a lattice, every node that introduces
//! exactly one source and one target entity yields a correspondence.

use std::collections::BTreeSet;
use std::sync::Arc;

use fcamap_alignment::{Category, Mapping};
use fcamap_fca::{ConceptLattice, FormalContext, LatticeOptions};
use fcamap_model::{Ontology, PropertyKind};

use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::matching::{
    one_to_one_pairs, ordered_lattice, ClassMatcher, Entity, InstanceMatcher, MatcherSetting,
    Models, PropertyMatcher,
};

/// FCA-based lexical matcher.
#[derive(Debug, Clone, Default)]
pub struct LexicalMatcher {
    models: Models,
    extract_source_type: bool,
    extract_target_type: bool,
    options: LatticeOptions,
}

impl LexicalMatcher {
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
            extract_source_type: config.extract_type_source,
            extract_target_type: config.extract_type_target,
            options: config.lattice_options(),
        }
    }

    /// Builds and orders the lexical lattice of every entity kind, for
    /// inspection or DOT export. Kinds with no named entity are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotConfigured`] before `set_source_target` and
    /// [`MatchError::Lattice`] when strict construction fails.
    pub fn lattices(&self) -> Result<Vec<(&'static str, ConceptLattice<Entity, String>)>, MatchError> {
        let (source, target) = self.models.get("lattices")?;
        let contexts = [
            (
                "classes",
                lexical_context(
                    source.classes.iter().map(|c| c.id.as_str()),
                    target.classes.iter().map(|c| c.id.as_str()),
                    &source,
                    &target,
                ),
            ),
            (
                "datatype_properties",
                lexical_context(
                    source.properties_of_kind(PropertyKind::Datatype).map(|p| p.id.as_str()),
                    target.properties_of_kind(PropertyKind::Datatype).map(|p| p.id.as_str()),
                    &source,
                    &target,
                ),
            ),
            (
                "object_properties",
                lexical_context(
                    source.properties_of_kind(PropertyKind::Object).map(|p| p.id.as_str()),
                    target.properties_of_kind(PropertyKind::Object).map(|p| p.id.as_str()),
                    &source,
                    &target,
                ),
            ),
            (
                "instances",
                lexical_context(
                    source.individuals.iter().map(|i| i.id.as_str()),
                    target.individuals.iter().map(|i| i.id.as_str()),
                    &source,
                    &target,
                ),
            ),
        ];

        let mut lattices = Vec::new();
        for (name, context) in contexts {
            if !context.is_empty() {
                lattices.push((name, ordered_lattice(&context, self.options)?));
            }
        }
        Ok(lattices)
    }

    fn match_entities<'a>(
        &self,
        sources: impl Iterator<Item = &'a str>,
        targets: impl Iterator<Item = &'a str>,
        source: &Ontology,
        target: &Ontology,
    ) -> Result<Vec<(String, String)>, MatchError> {
        let context = lexical_context(sources, targets, source, target);
        if context.is_empty() {
            return Ok(Vec::new());
        }
        one_to_one_pairs(&context, self.options)
    }

    fn map_property_kind(
        &self,
        kind: PropertyKind,
        operation: &'static str,
        mapping: &mut Mapping,
    ) -> Result<(), MatchError> {
        let (source, target) = self.models.get(operation)?;
        let pairs = self.match_entities(
            source.properties_of_kind(kind).map(|p| p.id.as_str()),
            target.properties_of_kind(kind).map(|p| p.id.as_str()),
            &source,
            &target,
        )?;

        let mut added = 0usize;
        for (s, t) in pairs {
            let source_domain = source.find_property(&s).and_then(|p| p.domain.as_deref());
            let target_domain = target.find_property(&t).and_then(|p| p.domain.as_deref());
            let domains_agree = match (
                source_domain.filter(|_| self.extract_source_type),
                target_domain.filter(|_| self.extract_target_type),
            ) {
                (Some(sd), Some(td)) => same_name(&source, sd, &target, td),
                _ => true,
            };
            if !domains_agree {
                tracing::debug!(source = %s, target = %t, "property pair rejected: domains differ");
                continue;
            }
            if mapping.add(s, t, Category::Property) {
                added += 1;
            }
        }
        tracing::info!(kind = kind.as_str(), added, "lexical property matching done");
        Ok(())
    }

    fn types_agree(&self, source: &Ontology, s: &str, target: &Ontology, t: &str) -> bool {
        if !(self.extract_source_type && self.extract_target_type) {
            return true;
        }
        let source_types = source.types_of(s);
        let target_types = target.types_of(t);
        if source_types.is_empty() || target_types.is_empty() {
            return true;
        }
        source_types
            .iter()
            .any(|st| target_types.iter().any(|tt| same_name(source, st, target, tt)))
    }
}

fn lexical_context<'a>(
    sources: impl Iterator<Item = &'a str>,
    targets: impl Iterator<Item = &'a str>,
    source: &Ontology,
    target: &Ontology,
) -> FormalContext<Entity, String> {
    let mut context = FormalContext::new();
    for iri in sources {
        let tokens = source.name_tokens(iri);
        if !tokens.is_empty() {
            context.add(Entity::source(iri), tokens);
        }
    }
    for iri in targets {
        let tokens = target.name_tokens(iri);
        if !tokens.is_empty() {
            context.add(Entity::target(iri), tokens);
        }
    }
    context
}

// Two entities are lexically the same when their token sets are equal and
// non-empty.
fn same_name(source: &Ontology, s: &str, target: &Ontology, t: &str) -> bool {
    let a: BTreeSet<String> = source.name_tokens(s);
    !a.is_empty() && a == target.name_tokens(t)
}

impl MatcherSetting for LexicalMatcher {
    fn set_source_target(&mut self, source: Arc<Ontology>, target: Arc<Ontology>) {
        self.models.set(source, target);
    }

    fn set_extract_type(&mut self, source: bool, target: bool) {
        self.extract_source_type = source;
        self.extract_target_type = target;
    }

    fn close(&mut self) {
        self.models.clear();
    }
}

impl ClassMatcher for LexicalMatcher {
    fn map_classes(&mut self, mapping: &mut Mapping) -> Result<(), MatchError> {
        let (source, target) = self.models.get("map_classes")?;
        let pairs = self.match_entities(
            source.classes.iter().map(|c| c.id.as_str()),
            target.classes.iter().map(|c| c.id.as_str()),
            &source,
            &target,
        )?;
        let added = pairs
            .into_iter()
            .filter(|(s, t)| mapping.add(s.as_str(), t.as_str(), Category::Class))
            .count();
        tracing::info!(added, "lexical class matching done");
        Ok(())
    }
}

impl PropertyMatcher for LexicalMatcher {
    fn map_datatype_properties(&mut self, mapping: &mut Mapping) -> Result<(), MatchError> {
        self.map_property_kind(PropertyKind::Datatype, "map_datatype_properties", mapping)
    }

    fn map_object_properties(&mut self, mapping: &mut Mapping) -> Result<(), MatchError> {
        self.map_property_kind(PropertyKind::Object, "map_object_properties", mapping)
    }
}

impl InstanceMatcher for LexicalMatcher {
    fn map_instances(&mut self, mapping: &mut Mapping) -> Result<(), MatchError> {
        let (source, target) = self.models.get("map_instances")?;
        let pairs = self.match_entities(
            source.individuals.iter().map(|i| i.id.as_str()),
            target.individuals.iter().map(|i| i.id.as_str()),
            &source,
            &target,
        )?;

        let mut added = 0usize;
        for (s, t) in pairs {
            if !self.types_agree(&source, &s, &target, &t) {
                tracing::debug!(source = %s, target = %t, "instance pair rejected: types differ");
                continue;
            }
            if mapping.add(s, t, Category::Instance) {
                added += 1;
            }
        }
        tracing::info!(added, "lexical instance matching done");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcamap_model::{Class, Individual, Property};

    fn class(id: &str) -> Class {
        Class {
            id: id.to_owned(),
            labels: vec![],
            subclass_of: vec![],
        }
    }

    fn property(id: &str, kind: PropertyKind, domain: Option<&str>) -> Property {
        Property {
            id: id.to_owned(),
            labels: vec![],
            kind,
            domain: domain.map(str::to_owned),
            range: None,
        }
    }

    fn individual(id: &str, types: &[&str]) -> Individual {
        Individual {
            id: id.to_owned(),
            labels: vec![],
            types: types.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    fn configured(source: Ontology, target: Ontology) -> LexicalMatcher {
        let mut matcher = LexicalMatcher::new();
        matcher.set_source_target(Arc::new(source), Arc::new(target));
        matcher
    }

    #[test]
    fn unconfigured_matcher_reports_the_operation() {
        let mut matcher = LexicalMatcher::new();
        let mut mapping = Mapping::new();
        let err = matcher.map_classes(&mut mapping).unwrap_err();
        assert!(matches!(err, MatchError::NotConfigured { operation: "map_classes" }));
        let err = matcher.map_object_properties(&mut mapping).unwrap_err();
        assert!(matches!(err, MatchError::NotConfigured { operation: "map_object_properties" }));
    }

    #[test]
    fn close_is_safe_before_and_after_matching() {
        let mut matcher = LexicalMatcher::new();
        matcher.close();
        matcher.set_source_target(Arc::new(Ontology::new("s")), Arc::new(Ontology::new("t")));
        let mut mapping = Mapping::new();
        matcher.map_classes(&mut mapping).unwrap();
        matcher.close();
        matcher.close();
        assert!(matcher.map_classes(&mut mapping).is_err());
    }

    #[test]
    fn lattices_cover_non_empty_kinds() {
        let mut s = Ontology::new("s");
        s.classes.extend([class("s#Paper"), class("s#Author")]);
        let mut t = Ontology::new("t");
        t.classes.push(class("t#Paper"));
        t.individuals.push(individual("t#p1", &["t#Paper"]));

        let lattices = configured(s, t).lattices().unwrap();
        let names: Vec<&str> = lattices.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["classes", "instances"]);
        assert!(lattices[0].1.to_dot().contains("s:s#Paper"));
    }

    #[test]
    fn properties_are_partitioned_by_kind() {
        let mut s = Ontology::new("s");
        s.properties.push(property("s#hasName", PropertyKind::Datatype, None));
        let mut t = Ontology::new("t");
        t.properties.push(property("t#has_name", PropertyKind::Object, None));

        let mut matcher = configured(s, t);
        let mut mapping = Mapping::new();
        matcher.map_properties(&mut mapping).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn property_domains_must_agree_when_types_are_extracted() {
        let mut s = Ontology::new("s");
        s.classes.push(class("s#Paper"));
        s.properties.push(property("s#title", PropertyKind::Datatype, Some("s#Paper")));
        let mut t = Ontology::new("t");
        t.classes.push(class("t#Event"));
        t.properties.push(property("t#title", PropertyKind::Datatype, Some("t#Event")));

        let mut matcher = configured(s, t);
        let mut mapping = Mapping::new();
        matcher.set_extract_type(true, true);
        matcher.map_datatype_properties(&mut mapping).unwrap();
        assert!(mapping.is_empty());

        matcher.set_extract_type(true, false);
        matcher.map_datatype_properties(&mut mapping).unwrap();
        assert!(mapping.contains("s#title", "t#title", Category::Property));
    }

    #[test]
    fn instance_types_must_agree_when_extracted() {
        let mut s = Ontology::new("s");
        s.classes.push(class("s#Person"));
        s.individuals.push(individual("s#berlin", &["s#Person"]));
        let mut t = Ontology::new("t");
        t.classes.push(class("t#City"));
        t.individuals.push(individual("t#Berlin", &["t#City"]));

        let mut matcher = configured(s, t);
        matcher.set_extract_type(true, true);
        let mut mapping = Mapping::new();
        matcher.map_instances(&mut mapping).unwrap();
        assert!(mapping.is_empty());

        matcher.set_extract_type(false, false);
        matcher.map_instances(&mut mapping).unwrap();
        assert!(mapping.contains("s#berlin", "t#Berlin", Category::Instance));
    }
}
