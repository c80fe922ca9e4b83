//! HTTP adapters - REST API implementations.

pub mod matching;

// Re-export key types for convenience
pub use matching::matching_router;
pub use matching::MatchingAppState;
