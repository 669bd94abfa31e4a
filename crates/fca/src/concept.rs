//! Formal concepts.

use std::collections::BTreeSet;
use std::fmt;

/// A formal concept: an extent (set of objects) paired with an intent (set
/// of attributes shared by every object of the extent).
///
/// Equality, ordering and hashing are structural over `(extent, intent)`,
/// so concepts can be used directly as map keys. Both halves are kept in
/// sorted sets, which also makes the [`fmt::Display`] form deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Concept<O, A> {
    extent: BTreeSet<O>,
    intent: BTreeSet<A>,
}

impl<O: Ord, A: Ord> Concept<O, A> {
    /// Creates a concept, copying the extent and intent out of the given
    /// iterators.
    pub fn new(extent: impl IntoIterator<Item = O>, intent: impl IntoIterator<Item = A>) -> Self {
        Self {
            extent: extent.into_iter().collect(),
            intent: intent.into_iter().collect(),
        }
    }

    /// The objects of this concept.
    #[must_use]
    pub fn extent(&self) -> &BTreeSet<O> {
        &self.extent
    }

    /// The attributes of this concept.
    #[must_use]
    pub fn intent(&self) -> &BTreeSet<A> {
        &self.intent
    }

    /// Whether `self` lies at or above `other`: its extent contains
    /// `other`'s extent.
    #[must_use]
    pub fn covers_extent_of(&self, other: &Self) -> bool {
        self.extent.is_superset(&other.extent)
    }

    /// Whether `self` lies at or below `other`: its intent contains
    /// `other`'s intent.
    #[must_use]
    pub fn covers_intent_of(&self, other: &Self) -> bool {
        self.intent.is_superset(&other.intent)
    }
}

impl<O: fmt::Display, A: fmt::Display> fmt::Display for Concept<O, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_set(f, &self.extent)?;
        f.write_str(" | ")?;
        write_set(f, &self.intent)
    }
}

fn write_set<T: fmt::Display>(f: &mut fmt::Formatter<'_>, set: &BTreeSet<T>) -> fmt::Result {
    f.write_str("{")?;
    for (i, item) in set.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("}")
}
