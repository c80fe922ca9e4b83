//! Matching application handlers.
//!
//! Query and command handlers for mentor matching, advice, and feedback.

mod find_matches;
mod get_advice;
mod mentor_pool_cache;
mod record_choice;

pub use find_matches::{FindMatchesHandler, FindMatchesQuery, MatchReport};
pub use get_advice::{AdviceResult, GetAdviceHandler, GetAdviceQuery};
pub use mentor_pool_cache::{MentorPool, MentorPoolCache, PoolOrigin, DEFAULT_POOL_TTL};
pub use record_choice::{FeedbackError, RecordChoiceCommand, RecordChoiceHandler};
