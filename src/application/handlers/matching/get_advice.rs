//! GetAdvice - Query handler for coaching text on the gap to one mentor.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::find_matches::resolve_traits;
use super::MentorPoolCache;
use crate::domain::foundation::MentorId;
use crate::domain::matching::{GapAnalyzer, GapSummary, MatchingError, UserSelection, VectorBuilder};
use crate::ports::{AdviceGenerator, AdviceRequest, TraitCatalog};

/// Query for advice on closing the gap to `mentor_id`.
#[derive(Debug, Clone)]
pub struct GetAdviceQuery {
    pub selections: Vec<UserSelection>,
    pub mentor_id: MentorId,
}

/// Advice plus the gap it addresses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResult {
    pub advice: String,
    pub mentor_id: MentorId,
    pub gap: GapSummary,
    /// Name of the generator that wrote the text, or "template".
    pub generated_by: String,
    pub fallback: bool,
}

/// Handler for advice generation.
///
/// Generator failures never reach the caller: any error or blank output is
/// replaced by the templated fallback.
pub struct GetAdviceHandler {
    traits: Arc<dyn TraitCatalog>,
    pool: Arc<MentorPoolCache>,
    generator: Arc<dyn AdviceGenerator>,
}

impl GetAdviceHandler {
    pub fn new(
        traits: Arc<dyn TraitCatalog>,
        pool: Arc<MentorPoolCache>,
        generator: Arc<dyn AdviceGenerator>,
    ) -> Self {
        Self {
            traits,
            pool,
            generator,
        }
    }

    pub async fn handle(&self, query: GetAdviceQuery) -> Result<AdviceResult, MatchingError> {
        let traits = resolve_traits(self.traits.as_ref(), &query.selections)?;
        let user_vector = VectorBuilder::build_user_vector(&traits, &query.selections);

        let pool = self.pool.get_or_refresh().await;
        let mentor = pool
            .find(&query.mentor_id)
            .ok_or_else(|| MatchingError::UnknownMentor(query.mentor_id.clone()))?;

        let gap = GapAnalyzer::analyze_gap(&user_vector, &mentor.dna);
        let request = AdviceRequest {
            user_traits: traits.iter().map(|t| t.label().to_string()).collect(),
            mentor: mentor.clone(),
            gap,
        };

        let (advice, generated_by, fallback) = match self.generator.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!(
                    generator = self.generator.name(),
                    mentor_id = %query.mentor_id,
                    "Advice generated"
                );
                (text.trim().to_string(), self.generator.name().to_string(), false)
            }
            Ok(_) => {
                warn!(
                    generator = self.generator.name(),
                    "Advice generator returned no text, using template"
                );
                (request.fallback_text(), "template".to_string(), true)
            }
            Err(err) => {
                warn!(
                    generator = self.generator.name(),
                    error = %err,
                    "Advice generation failed, using template"
                );
                (request.fallback_text(), "template".to_string(), true)
            }
        };

        Ok(AdviceResult {
            advice,
            mentor_id: query.mentor_id,
            gap,
            generated_by,
            fallback,
        })
    }
}
