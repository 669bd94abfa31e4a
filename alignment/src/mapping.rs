//! Correspondences and mappings between two ontologies.
//!
//! A [`Mapping`] owns only correspondence records. Ontology entities are
//! referenced by IRI, never by pointer into a loaded model.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AlignmentError;

/// The kind of entity a correspondence relates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Class ↔ class.
    Class,
    /// Property ↔ property (datatype or object).
    Property,
    /// Instance ↔ instance.
    Instance,
}

impl Category {
    /// Returns the lowercase name used in documents and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Class => "class",
            Category::Property => "property",
            Category::Instance => "instance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One asserted equivalence between a source and a target entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Correspondence {
    /// Which kind of entities are related.
    pub category: Category,
    /// IRI of the source-ontology entity.
    pub source: String,
    /// IRI of the target-ontology entity.
    pub target: String,
}

impl Correspondence {
    /// Creates a correspondence.
    pub fn new(source: impl Into<String>, target: impl Into<String>, category: Category) -> Self {
        Self {
            category,
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for Correspondence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} = {}", self.category, self.source, self.target)
    }
}

/// A set of correspondences. Equality is set equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    correspondences: BTreeSet<Correspondence>,
}

impl Mapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a correspondence. Returns `false` if it was already present.
    pub fn add(&mut self, source: impl Into<String>, target: impl Into<String>, category: Category) -> bool {
        self.insert(Correspondence::new(source, target, category))
    }

    /// Inserts a correspondence record. Returns `false` if it was already present.
    pub fn insert(&mut self, correspondence: Correspondence) -> bool {
        self.correspondences.insert(correspondence)
    }

    /// Whether the given correspondence is present.
    #[must_use]
    pub fn contains(&self, source: &str, target: &str, category: Category) -> bool {
        self.correspondences
            .iter()
            .any(|c| c.category == category && c.source == source && c.target == target)
    }

    /// Number of correspondences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.correspondences.len()
    }

    /// Whether the mapping has no correspondences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.correspondences.is_empty()
    }

    /// All correspondences, ordered by category, source, then target.
    pub fn iter(&self) -> impl Iterator<Item = &Correspondence> {
        self.correspondences.iter()
    }

    /// Correspondences of one category.
    pub fn iter_category(&self, category: Category) -> impl Iterator<Item = &Correspondence> {
        self.correspondences
            .iter()
            .filter(move |c| c.category == category)
    }

    /// Number of correspondences of one category.
    #[must_use]
    pub fn count_category(&self, category: Category) -> usize {
        self.iter_category(category).count()
    }

    /// Targets related to `source` within one category.
    pub fn targets_of<'a>(&'a self, source: &'a str, category: Category) -> impl Iterator<Item = &'a str> {
        self.iter_category(category)
            .filter(move |c| c.source == source)
            .map(|c| c.target.as_str())
    }

    /// Whether `source` (on the source side) or `target` (on the target
    /// side) already takes part in a correspondence of this category.
    #[must_use]
    pub fn is_matched(&self, source: &str, target: &str, category: Category) -> bool {
        self.iter_category(category)
            .any(|c| c.source == source || c.target == target)
    }

    /// Adds every correspondence of `other`. Returns how many were new.
    pub fn extend(&mut self, other: &Mapping) -> usize {
        other
            .iter()
            .filter(|c| self.correspondences.insert((*c).clone()))
            .count()
    }

    /// Parses a mapping from its JSON document form.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::Json`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, AlignmentError> {
        serde_json::from_str(json).map_err(|source| AlignmentError::Json {
            origin: "<string>".to_owned(),
            source,
        })
    }

    /// Renders the mapping as a pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::Json`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, AlignmentError> {
        serde_json::to_string_pretty(self).map_err(|source| AlignmentError::Json {
            origin: "<string>".to_owned(),
            source,
        })
    }

    /// Loads a mapping from a JSON document on disk.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::Io`] if the file cannot be read and
    /// [`AlignmentError::Json`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self, AlignmentError> {
        let content = std::fs::read_to_string(path).map_err(|source| AlignmentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mapping: Self = serde_json::from_str(&content).map_err(|source| AlignmentError::Json {
            origin: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), correspondences = mapping.len(), "loaded alignment");
        Ok(mapping)
    }

    /// Writes the mapping as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`AlignmentError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), AlignmentError> {
        let json = self.to_json_string()?;
        std::fs::write(path, json).map_err(|source| AlignmentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = &'a Correspondence;
    type IntoIter = std::collections::btree_set::Iter<'a, Correspondence>;

    fn into_iter(self) -> Self::IntoIter {
        self.correspondences.iter()
    }
}

impl FromIterator<Correspondence> for Mapping {
    fn from_iter<I: IntoIterator<Item = Correspondence>>(iter: I) -> Self {
        Self {
            correspondences: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut m = Mapping::new();
        assert!(m.add("s#A", "t#A", Category::Class));
        assert!(!m.add("s#A", "t#A", Category::Class));
        assert!(m.add("s#A", "t#A", Category::Instance));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut a = Mapping::new();
        a.add("s#A", "t#A", Category::Class);
        a.add("s#p", "t#p", Category::Property);
        a.add("s#i", "t#i", Category::Instance);

        let mut b = Mapping::new();
        b.add("s#i", "t#i", Category::Instance);
        b.add("s#A", "t#A", Category::Class);
        b.add("s#p", "t#p", Category::Property);

        assert_eq!(a, b);
        b.add("s#B", "t#B", Category::Class);
        assert_ne!(a, b);
    }

    #[test]
    fn category_filters() {
        let mut m = Mapping::new();
        m.add("s#A", "t#A", Category::Class);
        m.add("s#A", "t#B", Category::Class);
        m.add("s#p", "t#p", Category::Property);

        assert_eq!(m.count_category(Category::Class), 2);
        assert_eq!(m.targets_of("s#A", Category::Class).collect::<Vec<_>>(), vec!["t#A", "t#B"]);
        assert!(m.contains("s#p", "t#p", Category::Property));
        assert!(!m.contains("s#p", "t#p", Category::Class));
        assert!(m.is_matched("s#p", "t#zzz", Category::Property));
        assert!(!m.is_matched("s#q", "t#q", Category::Property));
    }

    #[test]
    fn extend_counts_new_records() {
        let mut a = Mapping::new();
        a.add("s#A", "t#A", Category::Class);
        let mut b = Mapping::new();
        b.add("s#A", "t#A", Category::Class);
        b.add("s#B", "t#B", Category::Class);
        assert_eq!(a.extend(&b), 1);
        assert_eq!(a, b);
    }

    #[test]
    fn json_document_shape() {
        let mut m = Mapping::new();
        m.add("s#A", "t#A", Category::Class);
        let json = m.to_json_string().unwrap();
        assert!(json.contains("\"category\": \"class\""));
        assert_eq!(Mapping::from_json_str(&json).unwrap(), m);
    }
}
