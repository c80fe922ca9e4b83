//! Ranker - top-N mentor ranking with softmax confidence and anti-match.

use serde::Serialize;

use super::{AttributeVector, MatchingError, Mentor, SimilarityScorer};
use crate::domain::foundation::Percentage;

/// A mentor scored against one user vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub mentor: Mentor,
    pub distance: f64,
    pub compatibility: Percentage,
    pub user_vector: AttributeVector,
}

/// A match shown in the top-N list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatch {
    #[serde(flatten)]
    pub result: MatchResult,
    /// 0-based display position.
    pub rank: usize,
    /// Softmax share among the top-N, in `(0, 1]`.
    pub match_probability: f64,
}

/// Outcome of one ranking call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatches {
    pub top_matches: Vec<RankedMatch>,
    pub anti_match: MatchResult,
    pub user_vector: AttributeVector,
}

impl RankedMatches {
    /// The closest mentor, if any were ranked.
    pub fn best(&self) -> Option<&RankedMatch> {
        self.top_matches.first()
    }
}

/// Ranks mentor pools against a user vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker {
    scorer: SimilarityScorer,
}

impl Ranker {
    /// Creates a ranker using the given scorer.
    pub fn new(scorer: SimilarityScorer) -> Self {
        Self { scorer }
    }

    /// Returns the scorer in use.
    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    /// Ranks `pool` against `user`.
    ///
    /// # Algorithm
    /// 1. Distance and compatibility for every mentor
    /// 2. Stable ascending sort by distance (input order breaks ties)
    /// 3. Top `min(top_n, pool.len())` entries get softmax probabilities
    ///    over `-distance`
    /// 4. The anti-match is the last entry of the sorted list
    ///
    /// # Errors
    /// - `EmptyPool` when `pool` is empty
    /// - `InvalidTopN` when `top_n` is zero
    ///
    /// # Edge Cases
    /// - Pool of one: the sole mentor is both the top match and the anti-match
    /// - Equal largest distances: the later one in input order is the anti-match
    pub fn rank(
        &self,
        user: &AttributeVector,
        pool: &[Mentor],
        top_n: usize,
    ) -> Result<RankedMatches, MatchingError> {
        if pool.is_empty() {
            return Err(MatchingError::EmptyPool);
        }
        if top_n == 0 {
            return Err(MatchingError::InvalidTopN);
        }

        let mut scored: Vec<(usize, f64)> = pool
            .iter()
            .enumerate()
            .map(|(index, mentor)| (index, self.scorer.distance(user, &mentor.dna)))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        let take = top_n.min(scored.len());
        let distances: Vec<f64> = scored[..take].iter().map(|(_, d)| *d).collect();
        let probabilities = softmax_confidence(&distances);

        let top_matches = scored[..take]
            .iter()
            .zip(probabilities)
            .enumerate()
            .map(|(rank, ((index, distance), match_probability))| RankedMatch {
                result: self.match_result(user, &pool[*index], *distance),
                rank,
                match_probability,
            })
            .collect();

        // Non-empty: checked above.
        let (worst_index, worst_distance) = scored[scored.len() - 1];
        let anti_match = self.match_result(user, &pool[worst_index], worst_distance);

        Ok(RankedMatches {
            top_matches,
            anti_match,
            user_vector: *user,
        })
    }

    fn match_result(&self, user: &AttributeVector, mentor: &Mentor, distance: f64) -> MatchResult {
        MatchResult {
            mentor: mentor.clone(),
            distance,
            compatibility: self.scorer.compatibility(distance),
            user_vector: *user,
        }
    }
}

/// Softmax over negated distances.
///
/// Scores are shifted by their maximum before exponentiation, so the
/// result is invariant to adding a constant to every distance. Returns an
/// empty vector for empty input.
pub fn softmax_confidence(distances: &[f64]) -> Vec<f64> {
    let max_score = distances
        .iter()
        .map(|d| -d)
        .fold(f64::NEG_INFINITY, f64::max);

    let exps: Vec<f64> = distances.iter().map(|d| (-d - max_score).exp()).collect();
    let sum: f64 = exps.iter().sum();

    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MentorId;
    use crate::domain::matching::AttributeWeights;
    use proptest::prelude::*;

    fn mentor(id: &str, dna: [f64; 5]) -> Mentor {
        Mentor::new(
            MentorId::new(id).unwrap(),
            id,
            AttributeVector::try_new(dna).unwrap(),
        )
    }

    fn origin() -> AttributeVector {
        AttributeVector::try_new([0.0; 5]).unwrap()
    }

    fn ids(matches: &RankedMatches) -> Vec<&str> {
        matches
            .top_matches
            .iter()
            .map(|m| m.result.mentor.id.as_str())
            .collect()
    }

    #[test]
    fn ranks_three_mentors_and_picks_anti_match() {
        let pool = vec![
            mentor("far", [9.0, 0.0, 0.0, 0.0, 0.0]),
            mentor("near", [2.0, 0.0, 0.0, 0.0, 0.0]),
            mentor("mid", [5.0, 0.0, 0.0, 0.0, 0.0]),
        ];

        let ranked = Ranker::default().rank(&origin(), &pool, 2).unwrap();

        assert_eq!(ids(&ranked), vec!["near", "mid"]);
        assert_eq!(ranked.top_matches[0].result.distance, 2.0);
        assert_eq!(ranked.top_matches[1].result.distance, 5.0);
        assert_eq!(ranked.top_matches[0].rank, 0);
        assert_eq!(ranked.top_matches[1].rank, 1);
        assert!(
            ranked.top_matches[0].match_probability > ranked.top_matches[1].match_probability
        );
        assert_eq!(ranked.anti_match.mentor.id.as_str(), "far");
        assert_eq!(ranked.anti_match.distance, 9.0);
    }

    #[test]
    fn empty_pool_is_an_error() {
        let result = Ranker::default().rank(&origin(), &[], 3);
        assert_eq!(result, Err(MatchingError::EmptyPool));
    }

    #[test]
    fn zero_top_n_is_an_error() {
        let pool = vec![mentor("a", [1.0; 5])];
        assert_eq!(
            Ranker::default().rank(&origin(), &pool, 0),
            Err(MatchingError::InvalidTopN)
        );
    }

    #[test]
    fn single_mentor_is_both_top_and_anti_match() {
        let pool = vec![mentor("solo", [4.0; 5])];
        let ranked = Ranker::default().rank(&origin(), &pool, 3).unwrap();

        assert_eq!(ranked.top_matches.len(), 1);
        assert_eq!(ranked.top_matches[0].match_probability, 1.0);
        assert_eq!(ranked.anti_match.mentor.id.as_str(), "solo");
    }

    #[test]
    fn ties_keep_input_order() {
        let pool = vec![
            mentor("first", [3.0, 0.0, 0.0, 0.0, 0.0]),
            mentor("second", [0.0, 3.0, 0.0, 0.0, 0.0]),
            mentor("third", [0.0, 0.0, 3.0, 0.0, 0.0]),
        ];
        let ranked = Ranker::default().rank(&origin(), &pool, 3).unwrap();

        assert_eq!(ids(&ranked), vec!["first", "second", "third"]);
        assert_eq!(ranked.anti_match.mentor.id.as_str(), "third");
        for m in &ranked.top_matches {
            assert!((m.match_probability - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn exact_match_scores_full_compatibility() {
        let dna = [6.0, 7.0, 8.0, 2.0, 5.0];
        let user = AttributeVector::try_new(dna).unwrap();
        let pool = vec![mentor("twin", dna), mentor("other", [0.0; 5])];

        let ranked = Ranker::default().rank(&user, &pool, 1).unwrap();

        let best = ranked.best().unwrap();
        assert_eq!(best.result.distance, 0.0);
        assert_eq!(best.result.compatibility, Percentage::HUNDRED);
        assert_eq!(best.result.user_vector, user);
    }

    #[test]
    fn top_n_larger_than_pool_returns_whole_pool() {
        let pool = vec![mentor("a", [1.0; 5]), mentor("b", [2.0; 5])];
        let ranked = Ranker::default().rank(&origin(), &pool, 10).unwrap();
        assert_eq!(ranked.top_matches.len(), 2);
    }

    #[test]
    fn softmax_is_shift_invariant() {
        let base = softmax_confidence(&[1.0, 2.0, 4.0]);
        let shifted = softmax_confidence(&[101.0, 102.0, 104.0]);
        for (a, b) in base.iter().zip(shifted.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn softmax_survives_large_distances() {
        let probs = softmax_confidence(&[900.0, 901.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn softmax_of_empty_input_is_empty() {
        assert!(softmax_confidence(&[]).is_empty());
    }

    #[test]
    fn ranking_does_not_mutate_inputs() {
        let user = AttributeVector::baseline();
        let pool = vec![mentor("a", [1.0; 5]), mentor("b", [9.0; 5])];
        let before = pool.clone();
        let _ = Ranker::default().rank(&user, &pool, 1).unwrap();
        assert_eq!(pool, before);
        assert_eq!(user, AttributeVector::baseline());
    }

    fn arb_pool() -> impl Strategy<Value = Vec<Mentor>> {
        prop::collection::vec(prop::array::uniform5(0.0f64..=10.0), 1..12).prop_map(|dnas| {
            dnas.into_iter()
                .enumerate()
                .map(|(i, dna)| mentor(&format!("m{}", i), dna))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn probabilities_sum_to_one_and_favor_closest(
            user in prop::array::uniform5(0.0f64..=10.0),
            pool in arb_pool(),
            top_n in 1usize..6,
        ) {
            let user = AttributeVector::try_new(user).unwrap();
            let ranker = Ranker::new(SimilarityScorer::new(AttributeWeights::emphasized()));
            let ranked = ranker.rank(&user, &pool, top_n).unwrap();

            let sum: f64 = ranked.top_matches.iter().map(|m| m.match_probability).sum();
            prop_assert!((sum - 1.0).abs() < 1e-6);

            let first = &ranked.top_matches[0];
            for m in &ranked.top_matches {
                prop_assert!(first.result.distance <= m.result.distance);
                prop_assert!(first.match_probability >= m.match_probability);
            }
        }

        #[test]
        fn anti_match_is_farthest(
            user in prop::array::uniform5(0.0f64..=10.0),
            pool in arb_pool(),
        ) {
            let user = AttributeVector::try_new(user).unwrap();
            let ranker = Ranker::default();
            let ranked = ranker.rank(&user, &pool, 3).unwrap();

            for m in &pool {
                let d = ranker.scorer().distance(&user, &m.dna);
                prop_assert!(ranked.anti_match.distance >= d);
            }
        }

        #[test]
        fn ranking_is_deterministic(
            user in prop::array::uniform5(0.0f64..=10.0),
            pool in arb_pool(),
        ) {
            let user = AttributeVector::try_new(user).unwrap();
            let first = Ranker::default().rank(&user, &pool, 3).unwrap();
            let second = Ranker::default().rank(&user, &pool, 3).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
