//! Feedback records - one labeled ranking event per completed user choice.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{AttributeVector, RankedMatch, RankedMatches};
use crate::domain::foundation::{
    FeedbackId, MentorId, Percentage, Timestamp, UserId, ValidationError,
};

/// Allowed drift of the displayed probabilities' sum from 1.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// One candidate exactly as it was displayed to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCandidate {
    pub mentor_id: MentorId,
    pub distance: f64,
    pub compatibility: Percentage,
    pub match_probability: f64,
    pub rank: usize,
}

impl From<&RankedMatch> for FeedbackCandidate {
    fn from(m: &RankedMatch) -> Self {
        Self {
            mentor_id: m.result.mentor.id.clone(),
            distance: m.result.distance,
            compatibility: m.result.compatibility,
            match_probability: m.match_probability,
            rank: m.rank,
        }
    }
}

/// An append-only training example: what was shown and what was picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub user_vector: AttributeVector,
    pub candidates: Vec<FeedbackCandidate>,
    pub selected_mentor_id: MentorId,
    pub timestamp: Timestamp,
}

impl FeedbackRecord {
    /// Builds a record from displayed candidates.
    ///
    /// # Errors
    /// - `EmptyField` when no candidates were displayed
    /// - `InvalidFormat` when a candidate's distance is negative or not
    ///   finite, a probability lies outside `[0, 1]`, the probabilities do
    ///   not sum to 1, a mentor appears twice, the ranks are not exactly
    ///   `0..n`, or `selected` is not among the candidates
    pub fn try_new(
        user_id: Option<UserId>,
        user_vector: AttributeVector,
        candidates: Vec<FeedbackCandidate>,
        selected: MentorId,
        timestamp: Timestamp,
    ) -> Result<Self, ValidationError> {
        if candidates.is_empty() {
            return Err(ValidationError::empty_field("candidates"));
        }
        validate_candidates(&candidates)?;
        if !candidates.iter().any(|c| c.mentor_id == selected) {
            return Err(ValidationError::invalid_format(
                "selected_mentor_id",
                format!("'{}' was not among the displayed candidates", selected),
            ));
        }

        Ok(Self {
            id: FeedbackId::new(),
            user_id,
            user_vector,
            candidates,
            selected_mentor_id: selected,
            timestamp,
        })
    }

    /// Builds a record from a ranking result and the user's pick.
    pub fn from_ranking(
        user_id: Option<UserId>,
        ranking: &RankedMatches,
        selected: MentorId,
        timestamp: Timestamp,
    ) -> Result<Self, ValidationError> {
        let candidates = ranking.top_matches.iter().map(FeedbackCandidate::from).collect();
        Self::try_new(user_id, ranking.user_vector, candidates, selected, timestamp)
    }

    /// The selected candidate's display rank.
    pub fn selected_rank(&self) -> Option<usize> {
        self.candidates
            .iter()
            .find(|c| c.mentor_id == self.selected_mentor_id)
            .map(|c| c.rank)
    }
}

fn validate_candidates(candidates: &[FeedbackCandidate]) -> Result<(), ValidationError> {
    let mut mentors = HashSet::new();
    let mut ranks = HashSet::new();

    for candidate in candidates {
        if !candidate.distance.is_finite() || candidate.distance < 0.0 {
            return Err(ValidationError::invalid_format(
                "candidates.distance",
                format!(
                    "'{}' has distance {}, expected a finite value >= 0",
                    candidate.mentor_id, candidate.distance
                ),
            ));
        }
        if !(0.0..=1.0).contains(&candidate.match_probability) {
            return Err(ValidationError::invalid_format(
                "candidates.match_probability",
                format!(
                    "'{}' has probability {}, expected a value in [0, 1]",
                    candidate.mentor_id, candidate.match_probability
                ),
            ));
        }
        if !mentors.insert(&candidate.mentor_id) {
            return Err(ValidationError::invalid_format(
                "candidates.mentor_id",
                format!("'{}' appears more than once", candidate.mentor_id),
            ));
        }
        if candidate.rank >= candidates.len() || !ranks.insert(candidate.rank) {
            return Err(ValidationError::invalid_format(
                "candidates.rank",
                format!("ranks must be exactly 0..{}", candidates.len()),
            ));
        }
    }

    let total: f64 = candidates.iter().map(|c| c.match_probability).sum();
    if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
        return Err(ValidationError::invalid_format(
            "candidates.match_probability",
            format!("probabilities sum to {}, expected 1", total),
        ));
    }

    Ok(())
}
