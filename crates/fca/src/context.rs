//! Formal contexts and their closed concept sets.
//!
//! A formal context is an incidence relation between objects and attributes.
//! Its concepts are exactly the pairs `(B', B)` where `B` is an intersection
//! of object intents (or the full attribute set) and `B'` is the set of
//! objects carrying every attribute of `B`.

use std::collections::{BTreeMap, BTreeSet};

use crate::concept::Concept;

/// Object → attribute incidence.
#[derive(Debug, Clone)]
pub struct FormalContext<O, A> {
    incidence: BTreeMap<O, BTreeSet<A>>,
}

impl<O: Ord + Clone, A: Ord + Clone> FormalContext<O, A> {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            incidence: BTreeMap::new(),
        }
    }

    /// Adds an object with its attributes. Adding an object twice merges the
    /// attribute sets.
    pub fn add(&mut self, object: O, attributes: impl IntoIterator<Item = A>) {
        self.incidence.entry(object).or_default().extend(attributes);
    }

    /// Number of objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.incidence.len()
    }

    /// Whether the context has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidence.is_empty()
    }

    /// Attributes of one object, if present.
    #[must_use]
    pub fn intent_of(&self, object: &O) -> Option<&BTreeSet<A>> {
        self.incidence.get(object)
    }

    /// Every attribute carried by at least one object.
    #[must_use]
    pub fn attributes(&self) -> BTreeSet<A> {
        self.incidence.values().flatten().cloned().collect()
    }

    /// Objects carrying every attribute of `intent`.
    #[must_use]
    pub fn extent_of(&self, intent: &BTreeSet<A>) -> BTreeSet<O> {
        self.incidence
            .iter()
            .filter(|(_, attrs)| attrs.is_superset(intent))
            .map(|(object, _)| object.clone())
            .collect()
    }

    /// All formal concepts of the context.
    ///
    /// Intents are closed under intersection incrementally, one object at a
    /// time; the result always contains the top `(G, ∩ g')` and bottom
    /// `(M', M)` concepts.
    #[must_use]
    pub fn concepts(&self) -> BTreeSet<Concept<O, A>> {
        let mut intents: BTreeSet<BTreeSet<A>> = BTreeSet::new();
        intents.insert(self.attributes());

        for object_intent in self.incidence.values() {
            let met: Vec<BTreeSet<A>> = intents
                .iter()
                .map(|b| b.intersection(object_intent).cloned().collect())
                .collect();
            intents.extend(met);
        }

        let concepts: BTreeSet<Concept<O, A>> = intents
            .into_iter()
            .map(|intent| Concept::new(self.extent_of(&intent), intent))
            .collect();
        tracing::debug!(
            objects = self.incidence.len(),
            concepts = concepts.len(),
            "closed formal context"
        );
        concepts
    }
}

impl<O: Ord + Clone, A: Ord + Clone> Default for FormalContext<O, A> {
    fn default() -> Self {
        Self::new()
    }
}
