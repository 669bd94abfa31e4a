//! Class refinement from instance anchors.
//!
//! Every instance anchor `(i, j)` votes for each pair `(s, t)` with
//! `s ∈ types(i)` and `t ∈ types(j)`. A class candidate survives if it has
//! at least one vote. A pair outside the candidates is proposed when its
//! votes reach the configured support and no other pair sharing `s` or `t`
//! has as many.

use std::collections::BTreeMap;
use std::sync::Arc;

use fcamap_alignment::{Category, Mapping};
use fcamap_model::Ontology;

use crate::config::MatchConfig;
use crate::enhancement::{anchor_pairs, Anchors, ClassRefiner, RefinerSetting};
use crate::error::MatchError;
use crate::matching::Models;

/// Class refiner backed by instance anchors.
#[derive(Debug, Clone)]
pub struct AnchoredClassRefiner {
    models: Models,
    anchors: Anchors,
    min_anchor_support: usize,
}

impl Default for AnchoredClassRefiner {
    fn default() -> Self {
        Self::new(1)
    }
}

impl AnchoredClassRefiner {
    /// Creates an unconfigured refiner. A support below one is treated as one.
    #[must_use]
    pub fn new(min_anchor_support: usize) -> Self {
        Self {
            models: Models::default(),
            anchors: Anchors::new(),
            min_anchor_support: min_anchor_support.max(1),
        }
    }

    /// Creates an unconfigured refiner from run settings.
    #[must_use]
    pub fn with_config(config: &MatchConfig) -> Self {
        Self::new(config.min_anchor_support)
    }

    /// Number of distinct instance anchors recorded.
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    fn votes<'a>(&'a self, source: &'a Ontology, target: &'a Ontology) -> BTreeMap<(&'a str, &'a str), usize> {
        let mut votes = BTreeMap::new();
        for (i, j) in &self.anchors {
            for s in source.types_of(i) {
                for t in target.types_of(j) {
                    *votes.entry((s.as_str(), t.as_str())).or_insert(0) += 1;
                }
            }
        }
        votes
    }
}

/// Highest vote per key and how many pairs reach it.
fn best_by<'a>(
    votes: &BTreeMap<(&'a str, &'a str), usize>,
    key: impl Fn(&(&'a str, &'a str)) -> &'a str,
) -> BTreeMap<&'a str, (usize, usize)> {
    let mut best: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for (pair, &n) in votes {
        let entry = best.entry(key(pair)).or_insert((0, 0));
        if n > entry.0 {
            *entry = (n, 1);
        } else if n == entry.0 {
            entry.1 += 1;
        }
    }
    best
}

impl RefinerSetting for AnchoredClassRefiner {
    fn set_source_target(&mut self, source: Arc<Ontology>, target: Arc<Ontology>) {
        self.models.set(source, target);
    }

    fn close(&mut self) {
        self.models.clear();
        self.anchors.clear();
    }
}

impl ClassRefiner for AnchoredClassRefiner {
    fn add_instance_anchors(&mut self, anchors: &Mapping) {
        self.anchors.extend(anchor_pairs(anchors, Category::Instance));
    }

    fn validate_class_anchors(&self, candidates: &Mapping, output: &mut Mapping) -> Result<(), MatchError> {
        let (source, target) = self.models.get("validate_class_anchors")?;
        let votes = self.votes(&source, &target);

        let mut kept = 0usize;
        let mut rejected = 0usize;
        for c in candidates.iter_category(Category::Class) {
            if votes.contains_key(&(c.source.as_str(), c.target.as_str())) {
                output.insert(c.clone());
                kept += 1;
            } else {
                tracing::debug!(source = %c.source, target = %c.target, "class candidate has no instance support");
                rejected += 1;
            }
        }

        let by_source = best_by(&votes, |&(s, _)| s);
        let by_target = best_by(&votes, |&(_, t)| t);
        let unique_best = |best: &BTreeMap<&str, (usize, usize)>, key: &str, n: usize| {
            best.get(key).is_some_and(|&(max, count)| max == n && count == 1)
        };

        let mut proposed = 0usize;
        for (&(s, t), &n) in &votes {
            if n < self.min_anchor_support || candidates.contains(s, t, Category::Class) {
                continue;
            }
            if unique_best(&by_source, s, n) && unique_best(&by_target, t, n) && output.add(s, t, Category::Class) {
                tracing::debug!(source = s, target = t, support = n, "class pair proposed by instance anchors");
                proposed += 1;
            }
        }

        tracing::info!(
            anchors = self.anchors.len(),
            kept,
            rejected,
            proposed,
            "class refinement done"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcamap_model::Individual;

    fn individual(id: &str, types: &[&str]) -> Individual {
        Individual {
            id: id.to_owned(),
            labels: vec![],
            types: types.iter().map(|t| (*t).to_owned()).collect(),
        }
    }

    fn ontologies() -> (Arc<Ontology>, Arc<Ontology>) {
        let mut s = Ontology::new("s");
        s.individuals.extend([
            individual("s#p1", &["s#Paper"]),
            individual("s#p2", &["s#Paper"]),
            individual("s#alice", &["s#Person"]),
        ]);
        let mut t = Ontology::new("t");
        t.individuals.extend([
            individual("t#a1", &["t#Article"]),
            individual("t#a2", &["t#Article"]),
            individual("t#bob", &["t#Human"]),
        ]);
        (Arc::new(s), Arc::new(t))
    }

    fn instance_anchors() -> Mapping {
        let mut m = Mapping::new();
        m.add("s#p1", "t#a1", Category::Instance);
        m.add("s#p2", "t#a2", Category::Instance);
        m.add("s#alice", "t#bob", Category::Instance);
        m
    }

    fn candidates() -> Mapping {
        let mut m = Mapping::new();
        m.add("s#Paper", "t#Article", Category::Class);
        m.add("s#Document", "t#Human", Category::Class);
        m.add("s#p1", "t#a1", Category::Instance);
        m
    }

    #[test]
    fn unsupported_candidates_are_dropped_and_new_pairs_proposed() {
        let (s, t) = ontologies();
        let mut refiner = AnchoredClassRefiner::new(1);
        refiner.set_source_target(s, t);
        refiner.add_instance_anchors(&instance_anchors());

        let mut out = Mapping::new();
        refiner.validate_class_anchors(&candidates(), &mut out).unwrap();

        assert!(out.contains("s#Paper", "t#Article", Category::Class));
        assert!(!out.contains("s#Document", "t#Human", Category::Class));
        assert!(out.contains("s#Person", "t#Human", Category::Class));
        assert_eq!(out.count_category(Category::Instance), 0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn proposals_respect_minimum_support() {
        let (s, t) = ontologies();
        let mut refiner = AnchoredClassRefiner::new(2);
        refiner.set_source_target(s, t);
        refiner.add_instance_anchors(&instance_anchors());

        let mut out = Mapping::new();
        refiner.validate_class_anchors(&Mapping::new(), &mut out).unwrap();
        assert!(out.contains("s#Paper", "t#Article", Category::Class));
        assert!(!out.contains("s#Person", "t#Human", Category::Class));
    }

    #[test]
    fn tied_pairs_are_not_proposed() {
        let mut s = Ontology::new("s");
        s.individuals.push(individual("s#x", &["s#A"]));
        let mut t = Ontology::new("t");
        t.individuals.push(individual("t#x", &["t#B", "t#C"]));

        let mut refiner = AnchoredClassRefiner::default();
        refiner.set_source_target(Arc::new(s), Arc::new(t));
        let mut anchors = Mapping::new();
        anchors.add("s#x", "t#x", Category::Instance);
        refiner.add_instance_anchors(&anchors);

        let mut out = Mapping::new();
        refiner.validate_class_anchors(&Mapping::new(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn close_forgets_models_and_anchors() {
        let (s, t) = ontologies();
        let mut refiner = AnchoredClassRefiner::default();
        refiner.close();
        refiner.set_source_target(s, t);
        refiner.add_instance_anchors(&instance_anchors());
        assert_eq!(refiner.anchor_count(), 3);
        refiner.close();
        assert_eq!(refiner.anchor_count(), 0);

        let err = refiner
            .validate_class_anchors(&candidates(), &mut Mapping::new())
            .unwrap_err();
        assert!(matches!(err, MatchError::NotConfigured { operation: "validate_class_anchors" }));
    }
}
