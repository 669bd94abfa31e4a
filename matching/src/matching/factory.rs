//! Constructors for the concrete matchers.

use std::fmt;
use std::str::FromStr;

use crate::config::MatchConfig;
use crate::matching::additional::AdditionalPropertyMatcher;
use crate::matching::lexical::LexicalMatcher;
use crate::matching::PropertyMatcher;

/// Creates the lexical matcher configured from `config`.
#[must_use]
pub fn create_lexical_matcher(config: &MatchConfig) -> LexicalMatcher {
    LexicalMatcher::with_config(config)
}

/// Creates the structural property matcher configured from `config`.
#[must_use]
pub fn create_additional_property_matcher(config: &MatchConfig) -> AdditionalPropertyMatcher {
    AdditionalPropertyMatcher::with_config(config)
}

/// Property matchers selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// [`LexicalMatcher`].
    Lexical,
    /// [`AdditionalPropertyMatcher`].
    AdditionalProperty,
}

impl MatcherKind {
    /// Name accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MatcherKind::Lexical => "lexical",
            MatcherKind::AdditionalProperty => "additional-property",
        }
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unrecognized matcher name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown matcher `{0}` (expected `lexical` or `additional-property`)")]
pub struct UnknownMatcher(pub String);

impl FromStr for MatcherKind {
    type Err = UnknownMatcher;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexical" => Ok(MatcherKind::Lexical),
            "additional-property" | "additional_property" => Ok(MatcherKind::AdditionalProperty),
            other => Err(UnknownMatcher(other.to_owned())),
        }
    }
}

/// Creates a boxed property matcher of the given kind.
#[must_use]
pub fn create_property_matcher(kind: MatcherKind, config: &MatchConfig) -> Box<dyn PropertyMatcher> {
    match kind {
        MatcherKind::Lexical => Box::new(create_lexical_matcher(config)),
        MatcherKind::AdditionalProperty => Box::new(create_additional_property_matcher(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::matching::MatcherSetting;
    use fcamap_alignment::{Category, Mapping};
    use fcamap_model::{Ontology, Property, PropertyKind};

    #[test]
    fn kinds_parse_by_name() {
        assert_eq!("lexical".parse::<MatcherKind>().unwrap(), MatcherKind::Lexical);
        assert_eq!(
            "additional-property".parse::<MatcherKind>().unwrap(),
            MatcherKind::AdditionalProperty
        );
        assert_eq!(MatcherKind::AdditionalProperty.to_string(), "additional-property");
        assert!("edit-distance".parse::<MatcherKind>().is_err());
    }

    #[test]
    fn boxed_matcher_is_usable() {
        let prop = |id: &str| Property {
            id: id.to_owned(),
            labels: vec![],
            kind: PropertyKind::Object,
            domain: None,
            range: None,
        };
        let mut s = Ontology::new("s");
        s.properties.push(prop("s#isReviewedBy"));
        let mut t = Ontology::new("t");
        t.properties.push(prop("t#is_reviewed_by"));

        let mut matcher = create_property_matcher(MatcherKind::Lexical, &MatchConfig::default());
        matcher.set_source_target(Arc::new(s), Arc::new(t));
        let mut mapping = Mapping::new();
        matcher.map_properties(&mut mapping).unwrap();
        matcher.close();
        assert!(mapping.contains("s#isReviewedBy", "t#is_reviewed_by", Category::Property));
    }
}
