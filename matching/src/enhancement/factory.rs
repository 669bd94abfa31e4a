//! Constructors for the concrete refiners.

use crate::config::MatchConfig;
use crate::enhancement::class_refiner::AnchoredClassRefiner;
use crate::enhancement::instance_refiner::AnchoredInstanceRefiner;

/// Creates the instance-anchored class refiner configured from `config`.
#[must_use]
pub fn create_class_refiner(config: &MatchConfig) -> AnchoredClassRefiner {
    AnchoredClassRefiner::with_config(config)
}

/// Creates the class-anchored instance refiner.
#[must_use]
pub fn create_instance_refiner() -> AnchoredInstanceRefiner {
    AnchoredInstanceRefiner::new()
}
