//! Similarity Scorer - weighted distance and compatibility.

use super::{AttributeKey, AttributeVector, AttributeWeights, MAX_SCORE};
use crate::domain::foundation::Percentage;

/// Weighted Euclidean distance over attribute vectors.
///
/// The maximum possible distance for the weight configuration is computed
/// once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScorer {
    weights: AttributeWeights,
    max_distance: f64,
}

impl SimilarityScorer {
    /// Creates a scorer for the given weights.
    pub fn new(weights: AttributeWeights) -> Self {
        let max_distance = AttributeKey::ALL
            .iter()
            .map(|key| weights.get(*key) * MAX_SCORE * MAX_SCORE)
            .sum::<f64>()
            .sqrt();

        Self {
            weights,
            max_distance,
        }
    }

    /// Returns the weights in use.
    pub fn weights(&self) -> &AttributeWeights {
        &self.weights
    }

    /// Largest distance two in-range vectors can have.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// `sqrt(Σ weight[k] * (a[k] - b[k])²)`.
    pub fn distance(&self, a: &AttributeVector, b: &AttributeVector) -> f64 {
        AttributeKey::ALL
            .iter()
            .map(|key| {
                let diff = a[*key] - b[*key];
                self.weights.get(*key) * diff * diff
            })
            .sum::<f64>()
            .sqrt()
    }

    /// `round(max(0, 1 - distance / max_distance) * 100)`.
    ///
    /// 100 only at distance zero; never increases as distance grows.
    pub fn compatibility(&self, distance: f64) -> Percentage {
        Percentage::from_fraction(1.0 - distance / self.max_distance)
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(AttributeWeights::uniform())
    }
}
