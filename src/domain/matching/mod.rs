//! Matching Module - Mentor matching and gap analysis.
//!
//! Pure domain services that turn a user's trait selections into an
//! attribute vector, rank a mentor pool against it, and explain the gap to
//! the best match.
//!
//! # Components
//!
//! - `VectorBuilder` - Baseline plus per-trait impacts, clamped per trait
//! - `SimilarityScorer` - Weighted Euclidean distance and compatibility
//! - `Ranker` - Top-N with softmax confidence, plus the anti-match
//! - `GapAnalyzer` - Primary gap and the full ranked gap list
//! - `RemediationSelector` - Challenges, benchmark ladders, resources
//! - `FeedbackRecord` - Labeled ranking events for later training
//!
//! Nothing here does I/O. Catalog loading and feedback persistence live
//! behind ports.

mod attribute;
mod errors;
mod feedback;
mod gap_analyzer;
mod mentor;
mod ranker;
mod remediation;
mod similarity;
mod traits;
mod vector_builder;

pub use attribute::{
    clamp_score, AttributeKey, AttributeVector, AttributeWeights, ImpactVector, VectorDefect,
    ATTRIBUTE_COUNT, BASELINE_SCORE, MAX_SCORE, MIN_SCORE,
};
pub use errors::{CatalogError, MatchingError};
pub use feedback::{FeedbackCandidate, FeedbackRecord, PROBABILITY_SUM_TOLERANCE};
pub use gap_analyzer::{GapAnalyzer, GapSummary};
pub use mentor::{Mentor, MentorRecord, MentorResource, ResourceKind};
pub use ranker::{softmax_confidence, MatchResult, RankedMatch, RankedMatches, Ranker};
pub use remediation::{
    AnnotatedBenchmark, Benchmark, Challenge, Difficulty, RemediationCatalog,
    RemediationCatalogRecord, RemediationSelector, ADVANCED_THRESHOLD, BENCHMARK_LEVELS,
    BENCHMARK_TOLERANCE, INTERMEDIATE_THRESHOLD,
};
pub use similarity::SimilarityScorer;
pub use traits::{Intensity, Trait, TraitCategory, TraitRecord, UserSelection};
pub use vector_builder::VectorBuilder;
