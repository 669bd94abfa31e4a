//! Evaluation of a mapping against a reference alignment: correct, missing
//! and spurious correspondences with precision, recall and F-measure.

use crate::mapping::{Category, Correspondence, Mapping};

/// Outcome of comparing a produced mapping with a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Correspondences present in both.
    pub correct: Vec<Correspondence>,
    /// Reference correspondences that were not produced.
    pub missing: Vec<Correspondence>,
    /// Produced correspondences absent from the reference.
    pub spurious: Vec<Correspondence>,
}

impl Evaluation {
    /// Compares `found` with `reference`.
    #[must_use]
    pub fn compare(found: &Mapping, reference: &Mapping) -> Self {
        let correct = found
            .iter()
            .filter(|c| reference.contains(&c.source, &c.target, c.category))
            .cloned()
            .collect();
        let missing = reference
            .iter()
            .filter(|c| !found.contains(&c.source, &c.target, c.category))
            .cloned()
            .collect();
        let spurious = found
            .iter()
            .filter(|c| !reference.contains(&c.source, &c.target, c.category))
            .cloned()
            .collect();
        Self {
            correct,
            missing,
            spurious,
        }
    }

    /// Restricts the evaluation to one category.
    #[must_use]
    pub fn for_category(&self, category: Category) -> Self {
        let keep = |list: &[Correspondence]| -> Vec<Correspondence> {
            list.iter().filter(|c| c.category == category).cloned().collect()
        };
        Self {
            correct: keep(&self.correct),
            missing: keep(&self.missing),
            spurious: keep(&self.spurious),
        }
    }

    /// Correct / produced. 1.0 when nothing was produced and nothing was
    /// expected, 0.0 when nothing was produced but something was expected.
    #[must_use]
    pub fn precision(&self) -> f64 {
        ratio(self.correct.len(), self.correct.len() + self.spurious.len(), self.missing.is_empty())
    }

    /// Correct / expected. 1.0 when nothing was expected and nothing was
    /// produced.
    #[must_use]
    pub fn recall(&self) -> f64 {
        ratio(self.correct.len(), self.correct.len() + self.missing.len(), self.spurious.is_empty())
    }

    /// Harmonic mean of precision and recall.
    #[must_use]
    pub fn f_measure(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// Whether the produced mapping equals the reference.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.missing.is_empty() && self.spurious.is_empty()
    }
}

fn ratio(numerator: usize, denominator: usize, other_side_empty: bool) -> f64 {
    if denominator == 0 {
        if other_side_empty {
            1.0
        } else {
            0.0
        }
    } else {
        numerator as f64 / denominator as f64
    }
}
