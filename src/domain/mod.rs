//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `matching` - Attribute vectors, ranking, gap analysis, remediation

pub mod foundation;
pub mod matching;
