//! Matcher configuration.
//!
//! ```toml
//! extract_type_source = true
//! extract_type_target = true
//! strict_lattice = false
//! match_instances = true
//! additional_properties = true
//! refine_classes = false
//! min_anchor_support = 1
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use std::path::Path;

use fcamap_fca::LatticeOptions;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for one alignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Use declared domains and instance types of the source ontology.
    pub extract_type_source: bool,
    /// Use declared domains and instance types of the target ontology.
    pub extract_type_target: bool,
    /// Fail instead of degrading when a lattice lacks its top or bottom.
    pub strict_lattice: bool,
    /// Run instance matching.
    pub match_instances: bool,
    /// Run the structural additional-property pass after lexical matching.
    pub additional_properties: bool,
    /// Validate class correspondences against instance anchors.
    pub refine_classes: bool,
    /// Anchors needed before the class refiner proposes a new class pair.
    pub min_anchor_support: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            extract_type_source: true,
            extract_type_target: true,
            strict_lattice: false,
            match_instances: true,
            additional_properties: true,
            refine_classes: false,
            min_anchor_support: 1,
        }
    }
}

impl MatchConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed input or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            origin: "<string>".to_owned(),
            source,
        })
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Toml`] if it is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Toml {
            origin: path.display().to_string(),
            source,
        })
    }

    /// Lattice construction options implied by this configuration.
    #[must_use]
    pub fn lattice_options(&self) -> LatticeOptions {
        LatticeOptions {
            strict: self.strict_lattice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(MatchConfig::from_toml_str("").unwrap(), MatchConfig::default());
    }

    #[test]
    fn partial_document_overrides() {
        let config = MatchConfig::from_toml_str("strict_lattice = true\nmin_anchor_support = 3\n").unwrap();
        assert!(config.strict_lattice);
        assert_eq!(config.min_anchor_support, 3);
        assert!(config.match_instances);
        assert!(config.lattice_options().strict);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = MatchConfig::from_toml_str("threshold = 0.5").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }
}
