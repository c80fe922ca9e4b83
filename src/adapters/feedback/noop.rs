//! Feedback sink used when no store is configured.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

use crate::domain::matching::FeedbackRecord;
use crate::ports::{FeedbackSink, PersistenceError};

/// Drops every record. Warns once so the gap in training data is visible.
#[derive(Default)]
pub struct NoopFeedbackSink {
    warned: AtomicBool,
}

impl NoopFeedbackSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackSink for NoopFeedbackSink {
    async fn record(&self, record: &FeedbackRecord) -> Result<(), PersistenceError> {
        if !self.warned.swap(true, Ordering::Relaxed) {
            warn!(
                feedback_id = %record.id,
                "Feedback store not configured; match feedback is not saved"
            );
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}
