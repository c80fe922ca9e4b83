//! Feedback Sink Adapters.
//!
//! ## Available Adapters
//!
//! - `PostgresFeedbackSink` - `match_feedback` table, JSONB payloads
//! - `JsonlFeedbackSink` - Append-only JSON Lines file
//! - `InMemoryFeedbackSink` - Vector-backed, for tests
//! - `NoopFeedbackSink` - Store not configured; warns and drops

mod in_memory;
mod jsonl_file;
mod noop;
mod postgres;

pub use in_memory::InMemoryFeedbackSink;
pub use jsonl_file::JsonlFeedbackSink;
pub use noop::NoopFeedbackSink;
pub use postgres::{connect_or_noop, PostgresFeedbackSink};
