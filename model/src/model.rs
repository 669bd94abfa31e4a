//! Core ontology model types.
//!
//! These types are the in-memory view of a loaded ontology that the matchers
//! consume. Every entity is identified by its full IRI; the matching layer
//! never holds references into the model across calls, only IRIs.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::lexical::{local_name, tokenize};

/// An OWL class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Full IRI (e.g., `"http://ekaw#Paper"`).
    pub id: String,
    /// Human-readable labels (`rdfs:label`), in document order.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Full IRIs of parent classes (`rdfs:subClassOf`).
    #[serde(default)]
    pub subclass_of: Vec<String>,
}

/// Whether a property is a datatype, object, or annotation property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// `owl:DatatypeProperty`: relates a resource to an XSD literal.
    Datatype,
    /// `owl:ObjectProperty`: relates two resources.
    Object,
    /// `owl:AnnotationProperty`, documentation only and never matched.
    Annotation,
}

impl PropertyKind {
    /// Returns the lowercase name used in documents and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Datatype => "datatype",
            PropertyKind::Object => "object",
            PropertyKind::Annotation => "annotation",
        }
    }
}

/// An OWL property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Full IRI.
    pub id: String,
    /// Human-readable labels.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Datatype, object, or annotation property.
    pub kind: PropertyKind,
    /// Full IRI of the domain class, or `None` if unspecified.
    #[serde(default)]
    pub domain: Option<String>,
    /// Full IRI of the range class or XSD datatype, or `None` if unspecified.
    #[serde(default)]
    pub range: Option<String>,
}

/// A named individual (OWL `owl:NamedIndividual`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    /// Full IRI.
    pub id: String,
    /// Human-readable labels.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Full IRIs of the classes this individual is asserted to belong to.
    #[serde(default)]
    pub types: Vec<String>,
}

/// A loaded ontology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    /// Ontology IRI.
    pub iri: String,
    /// All OWL classes.
    #[serde(default)]
    pub classes: Vec<Class>,
    /// All datatype, object and annotation properties.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// All named individuals.
    #[serde(default)]
    pub individuals: Vec<Individual>,
}

impl Ontology {
    /// Creates an empty ontology with the given IRI.
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            ..Self::default()
        }
    }

    /// Parses an ontology from its JSON document form.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] if the document is not a valid ontology.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|source| ModelError::Parse {
            origin: "<string>".to_owned(),
            source,
        })
    }

    /// Loads an ontology from a JSON document on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`] if the file cannot be read and
    /// [`ModelError::Parse`] if its content is not a valid ontology. Both
    /// carry the offending path.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ontology: Self =
            serde_json::from_str(&content).map_err(|source| ModelError::Parse {
                origin: path.display().to_string(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            classes = ontology.classes.len(),
            properties = ontology.properties.len(),
            individuals = ontology.individuals.len(),
            "loaded ontology"
        );
        Ok(ontology)
    }

    /// Looks up a class by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn find_class(&self, iri: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == iri)
    }

    /// Looks up a property by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn find_property(&self, iri: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == iri)
    }

    /// Looks up a named individual by its full IRI. Returns `None` if not found.
    #[must_use]
    pub fn find_individual(&self, iri: &str) -> Option<&Individual> {
        self.individuals.iter().find(|i| i.id == iri)
    }

    /// Iterates over the properties of one kind.
    pub fn properties_of_kind(&self, kind: PropertyKind) -> impl Iterator<Item = &Property> + '_ {
        self.properties.iter().filter(move |p| p.kind == kind)
    }

    /// Declared types of an individual; empty if the individual is unknown.
    #[must_use]
    pub fn types_of(&self, individual: &str) -> &[String] {
        self.find_individual(individual)
            .map_or(&[][..], |i| i.types.as_slice())
    }

    /// Lexical tokens of an entity: the union of the tokens of its labels
    /// and of its IRI local name. Unknown IRIs fall back to the local name.
    #[must_use]
    pub fn name_tokens(&self, iri: &str) -> BTreeSet<String> {
        let labels: &[String] = if let Some(c) = self.find_class(iri) {
            &c.labels
        } else if let Some(p) = self.find_property(iri) {
            &p.labels
        } else if let Some(i) = self.find_individual(iri) {
            &i.labels
        } else {
            &[]
        };
        let mut tokens = tokenize(local_name(iri));
        for label in labels {
            tokens.extend(tokenize(label));
        }
        tokens
    }

    /// Returns the total number of entities (classes, properties, individuals).
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.classes.len() + self.properties.len() + self.individuals.len()
    }
}

/// Standard IRI constants.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// RDFS namespace.
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    /// XSD namespace.
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    /// `owl:Thing`.
    pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    /// `xsd:string`.
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
}
