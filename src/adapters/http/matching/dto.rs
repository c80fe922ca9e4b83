//! HTTP DTOs (Data Transfer Objects) for matching endpoints.
//!
//! These types define the JSON request/response structure for the matching API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::{MentorPool, PoolOrigin};
use crate::domain::foundation::{FeedbackId, MentorId, UserId};
use crate::domain::matching::{AttributeVector, FeedbackCandidate, Mentor, Trait, UserSelection};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to rank mentors for a set of trait selections.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesRequest {
    #[serde(default)]
    pub selections: Vec<UserSelection>,
    /// Number of top matches; the server default applies when absent.
    #[serde(default)]
    pub top_n: Option<usize>,
}

/// Request to record which displayed mentor the user picked.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFeedbackRequest {
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub user_vector: AttributeVector,
    pub candidates: Vec<FeedbackCandidate>,
    pub selected_mentor_id: MentorId,
}

/// Request for advice on the gap to one mentor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAdviceRequest {
    #[serde(default)]
    pub selections: Vec<UserSelection>,
    pub mentor_id: MentorId,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response after a feedback record was accepted for persistence.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAcceptedResponse {
    pub id: FeedbackId,
}

/// Selectable traits.
#[derive(Debug, Clone, Serialize)]
pub struct TraitListResponse {
    pub count: usize,
    pub traits: Vec<Trait>,
}

impl TraitListResponse {
    pub fn new(traits: &[Trait]) -> Self {
        Self {
            count: traits.len(),
            traits: traits.to_vec(),
        }
    }
}

/// Mentor as listed in the catalog browser.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorSummaryResponse {
    pub id: MentorId,
    pub name: String,
    pub level: u8,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub dna: AttributeVector,
}

impl From<&Mentor> for MentorSummaryResponse {
    fn from(mentor: &Mentor) -> Self {
        Self {
            id: mentor.id.clone(),
            name: mentor.name.clone(),
            level: mentor.level,
            title: mentor.title.clone(),
            image: mentor.image.clone(),
            dna: mentor.dna,
        }
    }
}

/// The current mentor pool plus cache metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorListResponse {
    pub count: usize,
    pub origin: PoolOrigin,
    pub cached: bool,
    pub cache_age_secs: u64,
    pub mentors: Vec<MentorSummaryResponse>,
}

impl From<&MentorPool> for MentorListResponse {
    fn from(pool: &MentorPool) -> Self {
        Self {
            count: pool.mentors.len(),
            origin: pool.origin,
            cached: pool.cached,
            cache_age_secs: pool.age_secs,
            mentors: pool.mentors.iter().map(MentorSummaryResponse::from).collect(),
        }
    }
}

/// Liveness and cache status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub feedback_backend: &'static str,
    pub advice_generator: &'static str,
    /// Absent until a live pool has been loaded.
    pub mentor_cache_age_secs: Option<u64>,
}

/// Error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn find_matches_request_defaults() {
        let request: FindMatchesRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.selections.is_empty());
        assert!(request.top_n.is_none());
    }

    #[test]
    fn find_matches_request_parses_selections() {
        let request: FindMatchesRequest = serde_json::from_value(json!({
            "selections": [
                {"traitId": "NO_SAFETY_NET", "intensity": 40},
                {"traitId": "GRINDSET"}
            ],
            "topN": 5
        }))
        .unwrap();

        assert_eq!(request.top_n, Some(5));
        assert_eq!(request.selections[0].intensity.value(), 40);
        assert_eq!(request.selections[1].intensity.value(), 100);
    }

    #[test]
    fn out_of_range_intensity_is_rejected() {
        let result: Result<FindMatchesRequest, _> = serde_json::from_value(json!({
            "selections": [{"traitId": "GRINDSET", "intensity": 140}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn feedback_request_requires_full_vector() {
        let result: Result<RecordFeedbackRequest, _> = serde_json::from_value(json!({
            "userVector": {"risk": 5},
            "candidates": [],
            "selectedMentorId": "elon-musk"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn error_response_omits_empty_details() {
        let value = serde_json::to_value(ErrorResponse::new("EMPTY_POOL", "Unable to compute match"))
            .unwrap();
        assert_eq!(
            value,
            json!({"code": "EMPTY_POOL", "message": "Unable to compute match"})
        );
    }
}
