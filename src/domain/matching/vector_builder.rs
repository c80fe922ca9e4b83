//! Vector Builder - folds selected traits into a user attribute vector.

use super::{AttributeKey, AttributeVector, Intensity, Trait, UserSelection};

/// Builds user vectors from trait selections.
pub struct VectorBuilder;

impl VectorBuilder {
    /// Builds the user's attribute vector.
    ///
    /// # Algorithm
    /// Start from the baseline (every attribute at 5). For each trait in
    /// input order, scale its impact by the matching selection's
    /// `intensity / 100` (1.0 when no selection exists), add it to every
    /// attribute and clamp to `[0, 10]` immediately.
    ///
    /// Clamping happens per trait, so the order of `traits` can change the
    /// result once a component saturates.
    ///
    /// # Edge Cases
    /// - No traits: returns the baseline vector
    /// - Selections for traits not in `traits`: ignored
    /// - Duplicate selections for one trait: the first wins
    pub fn build_user_vector(traits: &[Trait], selections: &[UserSelection]) -> AttributeVector {
        let mut vector = AttributeVector::baseline();

        for t in traits {
            let multiplier = Self::intensity_for(t, selections).multiplier();

            for key in AttributeKey::ALL {
                vector.shift_clamped(key, t.impact()[key] * multiplier);
            }
        }

        vector
    }

    /// Intensity that applies to `t`: its first selection, or full strength.
    pub fn intensity_for(t: &Trait, selections: &[UserSelection]) -> Intensity {
        selections
            .iter()
            .find(|s| &s.trait_id == t.id())
            .map(|s| s.intensity)
            .unwrap_or_default()
    }
}
