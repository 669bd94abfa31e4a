//! Instance refinement from class anchors.

use std::sync::Arc;

use fcamap_alignment::{Category, Mapping};
use fcamap_model::Ontology;

use crate::enhancement::{anchor_pairs, Anchors, InstanceRefiner, RefinerSetting};
use crate::error::MatchError;
use crate::matching::Models;

/// Instance refiner backed by class anchors.
///
/// An instance candidate `(i, j)` is kept when some class anchor `(a, b)`
/// has `a ∈ types(i)` and `b ∈ types(j)`, or when either instance declares
/// no type at all.
#[derive(Debug, Clone, Default)]
pub struct AnchoredInstanceRefiner {
    models: Models,
    anchors: Anchors,
}

impl AnchoredInstanceRefiner {
    /// Creates an unconfigured refiner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct class anchors recorded.
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    fn supports(&self, source: &Ontology, target: &Ontology, i: &str, j: &str) -> bool {
        let source_types = source.types_of(i);
        let target_types = target.types_of(j);
        if source_types.is_empty() || target_types.is_empty() {
            return true;
        }
        self.anchors
            .iter()
            .any(|(a, b)| source_types.contains(a) && target_types.contains(b))
    }
}

impl RefinerSetting for AnchoredInstanceRefiner {
    fn set_source_target(&mut self, source: Arc<Ontology>, target: Arc<Ontology>) {
        self.models.set(source, target);
    }

    fn close(&mut self) {
        self.models.clear();
        self.anchors.clear();
    }
}

impl InstanceRefiner for AnchoredInstanceRefiner {
    fn add_class_anchors(&mut self, anchors: &Mapping) {
        self.anchors.extend(anchor_pairs(anchors, Category::Class));
    }

    fn validate_instance_anchors(&self, candidates: &Mapping, output: &mut Mapping) -> Result<(), MatchError> {
        let (source, target) = self.models.get("validate_instance_anchors")?;

        let mut kept = 0usize;
        let mut rejected = 0usize;
        for c in candidates.iter_category(Category::Instance) {
            if self.supports(&source, &target, &c.source, &c.target) {
                output.insert(c.clone());
                kept += 1;
            } else {
                tracing::debug!(source = %c.source, target = %c.target, "instance candidate contradicts class anchors");
                rejected += 1;
            }
        }
        tracing::info!(anchors = self.anchors.len(), kept, rejected, "instance refinement done");
        Ok(())
    }
}
