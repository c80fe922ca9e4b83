//! HTTP handlers for matching endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{error, info};

use crate::application::{
    FeedbackError, FindMatchesHandler, FindMatchesQuery, GetAdviceHandler, GetAdviceQuery,
    MentorPoolCache, RecordChoiceCommand, RecordChoiceHandler,
};
use crate::domain::foundation::DomainError;
use crate::domain::matching::{MatchingError, Ranker, RemediationSelector};
use crate::ports::{AdviceGenerator, Clock, FeedbackSink, TraitCatalog};

use super::dto::{
    ErrorResponse, FeedbackAcceptedResponse, FindMatchesRequest, GetAdviceRequest,
    HealthResponse, MentorListResponse, RecordFeedbackRequest, TraitListResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct MatchingAppState {
    pub traits: Arc<dyn TraitCatalog>,
    pub mentor_pool: Arc<MentorPoolCache>,
    pub remediation: Arc<RemediationSelector>,
    pub ranker: Ranker,
    pub default_top_n: usize,
    pub advice_generator: Arc<dyn AdviceGenerator>,
    pub feedback_sink: Arc<dyn FeedbackSink>,
    pub clock: Arc<dyn Clock>,
}

impl MatchingAppState {
    /// Create handlers on demand from the shared state.
    pub fn find_matches_handler(&self) -> FindMatchesHandler {
        FindMatchesHandler::new(
            self.traits.clone(),
            self.mentor_pool.clone(),
            self.remediation.clone(),
            self.ranker,
            self.default_top_n,
        )
    }

    pub fn get_advice_handler(&self) -> GetAdviceHandler {
        GetAdviceHandler::new(
            self.traits.clone(),
            self.mentor_pool.clone(),
            self.advice_generator.clone(),
        )
    }

    pub fn record_choice_handler(&self) -> RecordChoiceHandler {
        RecordChoiceHandler::new(self.feedback_sink.clone(), self.clock.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/matches - Rank mentors for the given trait selections
pub async fn find_matches(
    State(state): State<MatchingAppState>,
    Json(request): Json<FindMatchesRequest>,
) -> Result<impl IntoResponse, MatchingApiError> {
    let handler = state.find_matches_handler();
    let query = FindMatchesQuery {
        selections: request.selections,
        top_n: request.top_n,
    };

    let report = handler.handle(query).await?;

    Ok(Json(report))
}

/// POST /api/advice - Coaching text for the gap to one mentor
pub async fn get_advice(
    State(state): State<MatchingAppState>,
    Json(request): Json<GetAdviceRequest>,
) -> Result<impl IntoResponse, MatchingApiError> {
    let handler = state.get_advice_handler();
    let query = GetAdviceQuery {
        selections: request.selections,
        mentor_id: request.mentor_id,
    };

    let result = handler.handle(query).await?;

    Ok(Json(result))
}

/// GET /api/traits - List selectable traits
pub async fn list_traits(State(state): State<MatchingAppState>) -> impl IntoResponse {
    Json(TraitListResponse::new(state.traits.all()))
}

/// GET /api/mentors - List the current mentor pool
pub async fn list_mentors(State(state): State<MatchingAppState>) -> impl IntoResponse {
    let pool = state.mentor_pool.get_or_refresh().await;
    Json(MentorListResponse::from(&pool))
}

/// GET /health - Liveness and cache status
pub async fn health(State(state): State<MatchingAppState>) -> impl IntoResponse {
    let age = state.mentor_pool.age().await;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        feedback_backend: state.feedback_sink.backend(),
        advice_generator: state.advice_generator.name(),
        mentor_cache_age_secs: age.map(|a| a.as_secs()),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/matches/feedback - Record the user's pick among displayed matches
///
/// Returns 202 once the record is validated; persistence happens afterwards.
pub async fn record_feedback(
    State(state): State<MatchingAppState>,
    Json(request): Json<RecordFeedbackRequest>,
) -> Result<impl IntoResponse, MatchingApiError> {
    let handler = state.record_choice_handler();
    let cmd = RecordChoiceCommand {
        user_id: request.user_id,
        user_vector: request.user_vector,
        candidates: request.candidates,
        selected: request.selected_mentor_id,
    };

    let id = handler.handle(cmd).await?;

    Ok((StatusCode::ACCEPTED, Json(FeedbackAcceptedResponse { id })))
}

/// POST /api/mentors/refresh - Drop the cached pool and reload it
pub async fn refresh_mentors(State(state): State<MatchingAppState>) -> impl IntoResponse {
    state.mentor_pool.invalidate().await;
    let pool = state.mentor_pool.get_or_refresh().await;
    info!(count = pool.mentors.len(), origin = ?pool.origin, "Mentor pool refresh requested");
    Json(MentorListResponse::from(&pool))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Message returned for every matching failure. No partial result is ever
/// sent alongside it.
pub const MATCH_FAILED_MESSAGE: &str = "Unable to compute match";

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum MatchingApiError {
    Matching(MatchingError),
    Feedback(FeedbackError),
}

impl From<MatchingError> for MatchingApiError {
    fn from(err: MatchingError) -> Self {
        Self::Matching(err)
    }
}

impl From<FeedbackError> for MatchingApiError {
    fn from(err: FeedbackError) -> Self {
        Self::Feedback(err)
    }
}

impl IntoResponse for MatchingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            MatchingApiError::Matching(err) => {
                let status = match &err {
                    MatchingError::UnknownTrait(_)
                    | MatchingError::InvalidTopN
                    | MatchingError::UnknownAttribute(_)
                    | MatchingError::Validation(_) => StatusCode::BAD_REQUEST,
                    MatchingError::UnknownMentor(_) => StatusCode::NOT_FOUND,
                    MatchingError::EmptyPool => StatusCode::SERVICE_UNAVAILABLE,
                    MatchingError::MalformedVector { .. } | MatchingError::MalformedTrait { .. } => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };

                let domain = DomainError::from(err);
                let body = if status.is_client_error() {
                    ErrorResponse::with_details(
                        domain.code.to_string(),
                        MATCH_FAILED_MESSAGE,
                        serde_json::json!({ "reason": domain.message }),
                    )
                } else {
                    error!(error = %domain, "Matching failed");
                    ErrorResponse::new(domain.code.to_string(), MATCH_FAILED_MESSAGE)
                };
                (status, body)
            }
            MatchingApiError::Feedback(err) => {
                let domain = DomainError::from(err);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(domain.code.to_string(), domain.message),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
