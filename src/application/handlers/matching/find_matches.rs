//! FindMatches - Query handler for ranking mentors against trait selections.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use super::{MentorPoolCache, PoolOrigin};
use crate::domain::matching::{
    AnnotatedBenchmark, AttributeVector, Challenge, GapAnalyzer, GapSummary, MatchResult,
    MatchingError, MentorResource, RankedMatch, Ranker, RemediationSelector, Trait,
    UserSelection, VectorBuilder,
};
use crate::ports::TraitCatalog;

/// Query to rank the mentor pool for a set of trait selections.
#[derive(Debug, Clone, Default)]
pub struct FindMatchesQuery {
    pub selections: Vec<UserSelection>,
    /// Overrides the configured number of top matches.
    pub top_n: Option<usize>,
}

/// Everything the caller shows after matching.
///
/// Gap, challenges, benchmarks and resources all refer to the top match.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub user_vector: AttributeVector,
    pub top_matches: Vec<RankedMatch>,
    pub anti_match: MatchResult,
    pub primary_gap: GapSummary,
    pub all_gaps: Vec<GapSummary>,
    pub challenges: Vec<Challenge>,
    pub benchmarks: Vec<AnnotatedBenchmark>,
    pub resources: Vec<MentorResource>,
    pub pool_origin: PoolOrigin,
}

/// Handler for finding mentor matches.
pub struct FindMatchesHandler {
    traits: Arc<dyn TraitCatalog>,
    pool: Arc<MentorPoolCache>,
    remediation: Arc<RemediationSelector>,
    ranker: Ranker,
    default_top_n: usize,
}

impl FindMatchesHandler {
    pub fn new(
        traits: Arc<dyn TraitCatalog>,
        pool: Arc<MentorPoolCache>,
        remediation: Arc<RemediationSelector>,
        ranker: Ranker,
        default_top_n: usize,
    ) -> Self {
        Self {
            traits,
            pool,
            remediation,
            ranker,
            default_top_n,
        }
    }

    pub async fn handle(&self, query: FindMatchesQuery) -> Result<MatchReport, MatchingError> {
        // 1. Resolve selected traits and build the user vector
        let traits = resolve_traits(self.traits.as_ref(), &query.selections)?;
        let user_vector = VectorBuilder::build_user_vector(&traits, &query.selections);

        // 2. Rank the current pool
        let pool = self.pool.get_or_refresh().await;
        let top_n = query.top_n.unwrap_or(self.default_top_n);
        let ranking = self.ranker.rank(&user_vector, &pool.mentors, top_n)?;

        // 3. Explain the gap to the top match
        let best = ranking.best().ok_or(MatchingError::EmptyPool)?;
        let mentor = &best.result.mentor;
        let primary_gap = GapAnalyzer::analyze_gap(&user_vector, &mentor.dna);
        let all_gaps = GapAnalyzer::analyze_all_gaps(&user_vector, &mentor.dna);

        // 4. Remediation for the primary gap
        let attribute = primary_gap.attribute;
        let challenges = self
            .remediation
            .select_challenges(attribute, primary_gap.user_score);
        let benchmarks = self.remediation.annotate_benchmarks(
            attribute,
            primary_gap.user_score,
            primary_gap.mentor_score,
        );
        let resources = RemediationSelector::filter_resources(&mentor.resources, attribute);

        debug!(
            mentor_id = %mentor.id,
            compatibility = %best.result.compatibility,
            gap = %attribute,
            delta = primary_gap.delta,
            candidates = pool.mentors.len(),
            "Computed mentor matches"
        );

        Ok(MatchReport {
            user_vector,
            top_matches: ranking.top_matches,
            anti_match: ranking.anti_match,
            primary_gap,
            all_gaps,
            challenges,
            benchmarks,
            resources,
            pool_origin: pool.origin,
        })
    }
}

/// Looks up the traits behind `selections`, in selection order.
///
/// A trait selected twice is resolved once.
pub(crate) fn resolve_traits(
    catalog: &dyn TraitCatalog,
    selections: &[UserSelection],
) -> Result<Vec<Trait>, MatchingError> {
    let mut seen = HashSet::with_capacity(selections.len());
    let mut traits = Vec::with_capacity(selections.len());

    for selection in selections {
        if !seen.insert(&selection.trait_id) {
            continue;
        }
        let found = catalog
            .find(&selection.trait_id)
            .ok_or_else(|| MatchingError::UnknownTrait(selection.trait_id.clone()))?;
        traits.push(found.clone());
    }

    Ok(traits)
}
