//! In-memory feedback sink for testing and the `memory` backend.
//!
//! Uses `.expect()` on lock operations, which panics if a lock is
//! poisoned. Records are lost on restart.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::MentorId;
use crate::domain::matching::FeedbackRecord;
use crate::ports::{FeedbackSink, PersistenceError};

/// Keeps feedback records in a vector.
///
/// # Example
///
/// ```ignore
/// let sink = Arc::new(InMemoryFeedbackSink::new());
/// sink.record(&record).await?;
/// assert_eq!(sink.record_count(), 1);
/// ```
#[derive(Default)]
pub struct InMemoryFeedbackSink {
    records: RwLock<Vec<FeedbackRecord>>,
    failure: Option<PersistenceError>,
}

impl InMemoryFeedbackSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every write with `error`.
    pub fn failing(error: PersistenceError) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            failure: Some(error),
        }
    }

    // === Test Helpers ===

    /// All stored records, oldest first.
    pub fn records(&self) -> Vec<FeedbackRecord> {
        self.records
            .read()
            .expect("InMemoryFeedbackSink: records lock poisoned")
            .clone()
    }

    pub fn record_count(&self) -> usize {
        self.records
            .read()
            .expect("InMemoryFeedbackSink: records lock poisoned")
            .len()
    }

    /// Records whose user picked `mentor_id`.
    pub fn records_selecting(&self, mentor_id: &MentorId) -> Vec<FeedbackRecord> {
        self.records()
            .into_iter()
            .filter(|r| &r.selected_mentor_id == mentor_id)
            .collect()
    }
}

#[async_trait]
impl FeedbackSink for InMemoryFeedbackSink {
    async fn record(&self, record: &FeedbackRecord) -> Result<(), PersistenceError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.records
            .write()
            .expect("InMemoryFeedbackSink: records lock poisoned")
            .push(record.clone());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
