//! Gap Analyzer - per-attribute shortfall between a user and a mentor.

use serde::Serialize;

use super::{AttributeKey, AttributeVector};

/// The shortfall on one attribute.
///
/// `delta = mentor_score - user_score`; positive means the mentor is ahead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GapSummary {
    pub attribute: AttributeKey,
    pub user_score: f64,
    pub mentor_score: f64,
    pub delta: f64,
}

impl GapSummary {
    fn for_key(key: AttributeKey, user: &AttributeVector, mentor: &AttributeVector) -> Self {
        let user_score = user[key];
        let mentor_score = mentor[key];
        Self {
            attribute: key,
            user_score,
            mentor_score,
            delta: mentor_score - user_score,
        }
    }

    /// True when the user already meets or exceeds the mentor here.
    pub fn is_closed(&self) -> bool {
        self.delta <= 0.0
    }
}

/// Stateless gap analysis.
pub struct GapAnalyzer;

impl GapAnalyzer {
    /// Finds the attribute with the largest shortfall.
    ///
    /// # Algorithm
    /// Walk keys in canonical order and keep the first strict maximum of
    /// `mentor[key] - user[key]`.
    ///
    /// # Edge Cases
    /// - Identical vectors: every delta is 0, the primary gap is `risk`
    /// - User ahead everywhere: the least negative delta wins
    pub fn analyze_gap(user: &AttributeVector, mentor: &AttributeVector) -> GapSummary {
        let (first, rest) = AttributeKey::ALL.split_at(1);
        let mut best = GapSummary::for_key(first[0], user, mentor);

        for key in rest {
            let gap = GapSummary::for_key(*key, user, mentor);
            if gap.delta > best.delta {
                best = gap;
            }
        }

        best
    }

    /// All five gaps, sorted by descending delta.
    ///
    /// The sort is stable, so equal deltas keep canonical key order and the
    /// first entry always equals [`GapAnalyzer::analyze_gap`].
    pub fn analyze_all_gaps(user: &AttributeVector, mentor: &AttributeVector) -> Vec<GapSummary> {
        let mut gaps: Vec<GapSummary> = AttributeKey::ALL
            .into_iter()
            .map(|key| GapSummary::for_key(key, user, mentor))
            .collect();
        gaps.sort_by(|a, b| b.delta.total_cmp(&a.delta));
        gaps
    }
}
