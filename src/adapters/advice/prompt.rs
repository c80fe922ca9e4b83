//! Prompt text for LLM-backed advice.

use crate::domain::matching::AttributeKey;
use crate::ports::AdviceRequest;

/// System prompt sent with every advice request.
pub const COACH_SYSTEM_PROMPT: &str =
    "You are a direct career coach. Be concise, specific, and culturally aware. No disclaimers.";

/// Builds the user-turn prompt for an advice request.
pub struct AdvicePrompt;

impl AdvicePrompt {
    /// One line each for traits, mentor, mentor DNA, gap, and instructions.
    pub fn build(request: &AdviceRequest) -> String {
        let traits = if request.user_traits.is_empty() {
            "(none)".to_string()
        } else {
            request.user_traits.join(", ")
        };

        let dna = AttributeKey::ALL
            .iter()
            .map(|key| format!("{} {}", key, request.mentor.dna[*key]))
            .collect::<Vec<_>>()
            .join(", ");

        let mentor = if request.mentor.title.is_empty() {
            request.mentor.name.clone()
        } else {
            format!("{} ({})", request.mentor.name, request.mentor.title)
        };

        [
            format!("User traits: {}.", traits),
            format!("Mentor: {}.", mentor),
            format!("Mentor DNA: {}.", dna),
            format!(
                "Gap to close: {} (user {} vs mentor {}).",
                request.gap.attribute, request.gap.user_score, request.gap.mentor_score
            ),
            "Give blunt advice in 2-3 sentences. Avoid fluff.".to_string(),
        ]
        .join("\n")
    }
}
