//! RecordChoice - Command handler for logging which mentor the user picked.
//!
//! Persistence is best effort. The record is validated synchronously; the
//! sink write happens on a detached task and its failures are only logged.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::foundation::{
    DomainError, ErrorCode, FeedbackId, MentorId, UserId, ValidationError,
};
use crate::domain::matching::{AttributeVector, FeedbackCandidate, FeedbackRecord};
use crate::ports::{Clock, FeedbackSink};

/// Command to record a completed choice.
#[derive(Debug, Clone)]
pub struct RecordChoiceCommand {
    pub user_id: Option<UserId>,
    pub user_vector: AttributeVector,
    /// Candidates exactly as they were displayed.
    pub candidates: Vec<FeedbackCandidate>,
    pub selected: MentorId,
}

/// Errors surfaced to the caller. Persistence failures are never among them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedbackError {
    #[error("Invalid feedback: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<FeedbackError> for DomainError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Invalid(e) => DomainError::new(ErrorCode::ValidationFailed, e.to_string()),
        }
    }
}

/// Handler for recording ranking feedback.
pub struct RecordChoiceHandler {
    sink: Arc<dyn FeedbackSink>,
    clock: Arc<dyn Clock>,
}

impl RecordChoiceHandler {
    pub fn new(sink: Arc<dyn FeedbackSink>, clock: Arc<dyn Clock>) -> Self {
        Self { sink, clock }
    }

    /// Validates the record and hands it to the sink without waiting.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn handle(&self, cmd: RecordChoiceCommand) -> Result<FeedbackId, FeedbackError> {
        let record = self.build(cmd)?;
        let id = record.id;
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            persist(sink.as_ref(), &record).await;
        });

        Ok(id)
    }

    /// Like [`handle`](Self::handle), but returns after the sink write.
    pub async fn record_and_wait(
        &self,
        cmd: RecordChoiceCommand,
    ) -> Result<FeedbackId, FeedbackError> {
        let record = self.build(cmd)?;
        persist(self.sink.as_ref(), &record).await;
        Ok(record.id)
    }

    fn build(&self, cmd: RecordChoiceCommand) -> Result<FeedbackRecord, FeedbackError> {
        Ok(FeedbackRecord::try_new(
            cmd.user_id,
            cmd.user_vector,
            cmd.candidates,
            cmd.selected,
            self.clock.now(),
        )?)
    }
}

async fn persist(sink: &dyn FeedbackSink, record: &FeedbackRecord) {
    match sink.record(record).await {
        Ok(()) => debug!(
            feedback_id = %record.id,
            backend = sink.backend(),
            selected = %record.selected_mentor_id,
            "Feedback recorded"
        ),
        Err(err) => warn!(
            feedback_id = %record.id,
            backend = sink.backend(),
            error = %err,
            "Feedback store unavailable, record dropped"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::feedback::InMemoryFeedbackSink;
    use crate::domain::foundation::{Percentage, Timestamp};
    use crate::ports::PersistenceError;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn candidate(id: &str, rank: usize) -> FeedbackCandidate {
        FeedbackCandidate {
            mentor_id: MentorId::new(id).unwrap(),
            distance: rank as f64 + 1.0,
            compatibility: Percentage::new(90 - rank as u8 * 10),
            match_probability: if rank == 0 { 0.75 } else { 0.25 },
            rank,
        }
    }

    fn command(selected: &str) -> RecordChoiceCommand {
        RecordChoiceCommand {
            user_id: Some(UserId::new("user-7").unwrap()),
            user_vector: AttributeVector::baseline(),
            candidates: vec![candidate("alpha", 0), candidate("beta", 1)],
            selected: MentorId::new(selected).unwrap(),
        }
    }

    fn handler(sink: Arc<InMemoryFeedbackSink>) -> RecordChoiceHandler {
        let clock = Arc::new(FixedClock::new(Timestamp::from_unix_millis(1_700_000_000_000)));
        RecordChoiceHandler::new(sink, clock)
    }

    #[tokio::test]
    async fn record_and_wait_persists_record() {
        let sink = Arc::new(InMemoryFeedbackSink::new());
        let handler = handler(sink.clone());

        let id = handler.record_and_wait(command("beta")).await.unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].selected_mentor_id.as_str(), "beta");
        assert_eq!(records[0].selected_rank(), Some(1));
        assert_eq!(records[0].timestamp.as_unix_millis(), 1_700_000_000_000);
    }

    #[tokio::test]
    async fn handle_persists_in_background() {
        let sink = Arc::new(InMemoryFeedbackSink::new());
        let handler = handler(sink.clone());

        handler.handle(command("alpha")).await.unwrap();

        for _ in 0..50 {
            if sink.record_count() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(sink.record_count(), 1);
    }

    /// Holds every write until the test releases it.
    struct GatedSink {
        release: Notify,
        inner: InMemoryFeedbackSink,
    }

    #[async_trait]
    impl FeedbackSink for GatedSink {
        async fn record(&self, record: &FeedbackRecord) -> Result<(), PersistenceError> {
            self.release.notified().await;
            self.inner.record(record).await
        }

        fn backend(&self) -> &'static str {
            "gated"
        }
    }

    #[tokio::test]
    async fn handle_returns_before_the_write_completes() {
        let sink = Arc::new(GatedSink {
            release: Notify::new(),
            inner: InMemoryFeedbackSink::new(),
        });
        let clock = Arc::new(FixedClock::new(Timestamp::from_unix_millis(1_700_000_000_000)));
        let handler = RecordChoiceHandler::new(sink.clone(), clock);

        let id = tokio::time::timeout(Duration::from_secs(1), handler.handle(command("alpha")))
            .await
            .expect("handle waited for the sink")
            .unwrap();
        tokio::task::yield_now().await;
        assert_eq!(sink.inner.record_count(), 0);

        sink.release.notify_one();
        for _ in 0..50 {
            if sink.inner.record_count() == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let records = sink.inner.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
    }

    #[tokio::test]
    async fn selection_outside_candidates_is_rejected() {
        let sink = Arc::new(InMemoryFeedbackSink::new());
        let handler = handler(sink.clone());

        let err = handler.record_and_wait(command("gamma")).await.unwrap_err();

        assert!(matches!(
            err,
            FeedbackError::Invalid(ValidationError::InvalidFormat { .. })
        ));
        assert_eq!(sink.record_count(), 0);
    }

    #[tokio::test]
    async fn sink_failure_is_swallowed() {
        let sink = Arc::new(InMemoryFeedbackSink::failing(PersistenceError::Unavailable(
            "database down".to_string(),
        )));
        let handler = handler(sink.clone());

        let result = handler.record_and_wait(command("alpha")).await;

        assert!(result.is_ok());
        assert_eq!(sink.record_count(), 0);
    }

    #[test]
    fn invalid_feedback_maps_to_validation_code() {
        let err = FeedbackError::Invalid(ValidationError::empty_field("candidates"));
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::ValidationFailed);
    }
}
