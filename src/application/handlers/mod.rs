//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod matching;
