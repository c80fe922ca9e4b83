//! AdviceGenerator port - short coaching text for a user's primary gap.
//!
//! Generation is optional. The application layer falls back to templated
//! text on any [`AdviceError`] or empty output.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::matching::{GapSummary, Mentor};

/// What the generator needs to write advice.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceRequest {
    /// Labels of the traits the user selected.
    pub user_traits: Vec<String>,
    pub mentor: Mentor,
    pub gap: GapSummary,
}

impl AdviceRequest {
    /// Deterministic advice used when no generator answers.
    pub fn fallback_text(&self) -> String {
        let attribute = self.gap.attribute;
        format!(
            "Your biggest stretch is {attribute}. Borrow {mentor}'s playbook: double down on one \
             weekly rep that grows {attribute} fast, text three people outside your circle for \
             feedback, and log proof so your confidence is earned, not imagined.",
            attribute = attribute,
            mentor = self.mentor.name,
        )
    }
}

/// Port for natural-language advice generation.
#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    /// Writes advice for the request. May return an empty string.
    async fn generate(&self, request: &AdviceRequest) -> Result<String, AdviceError>;

    /// Short generator name for logs.
    fn name(&self) -> &'static str;
}

/// Advice generation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdviceError {
    /// No generator is configured (e.g. missing API key).
    #[error("advice generator not configured")]
    NotConfigured,

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by provider.
    #[error("rate limited")]
    RateLimited,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Provider returned an error status.
    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),
}
