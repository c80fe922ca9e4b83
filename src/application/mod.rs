//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Queries (find matches, advice) read the catalogs and the mentor pool;
//! the one command (record choice) writes to the feedback sink.

pub mod handlers;

pub use handlers::matching::{
    AdviceResult, FeedbackError, FindMatchesHandler, FindMatchesQuery, GetAdviceHandler,
    GetAdviceQuery, MatchReport, MentorPool, MentorPoolCache, PoolOrigin, RecordChoiceCommand,
    RecordChoiceHandler, DEFAULT_POOL_TTL,
};
