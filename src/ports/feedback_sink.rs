//! FeedbackSink port - durable, append-only log of ranking events.
//!
//! Feedback is best-effort telemetry. Callers log and drop
//! [`PersistenceError`]s; a failed write never changes a ranking result.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::matching::FeedbackRecord;

/// Port for persisting feedback records.
///
/// Writes are at-most-once and unordered. No read contract is defined.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Appends one record.
    async fn record(&self, record: &FeedbackRecord) -> Result<(), PersistenceError>;

    /// Short backend name for logs (`"postgres"`, `"jsonl"`, ...).
    fn backend(&self) -> &'static str;
}

/// Feedback write failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PersistenceError {
    /// The store is not configured or not reachable.
    #[error("feedback store unavailable: {0}")]
    Unavailable(String),

    /// The record could not be encoded for the store.
    #[error("failed to encode feedback record: {0}")]
    Encoding(String),

    /// The store rejected or failed the write.
    #[error("feedback write failed: {0}")]
    Write(String),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Encoding(err.to_string())
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Write(err.to_string())
    }
}
