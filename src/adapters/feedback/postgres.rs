//! PostgreSQL implementation of FeedbackSink.
//!
//! Inserts into `match_feedback`; the user vector and candidate list are
//! stored as JSONB so training jobs can read them without a schema change.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::NoopFeedbackSink;
use crate::domain::matching::FeedbackRecord;
use crate::ports::{FeedbackSink, PersistenceError};

/// PostgreSQL feedback sink.
#[derive(Clone)]
pub struct PostgresFeedbackSink {
    pool: PgPool,
}

impl PostgresFeedbackSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool lazily; the first write establishes the connection.
    pub fn connect_lazy(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, PersistenceError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)
            .map_err(|e| PersistenceError::Unavailable(format!("Invalid database URL: {}", e)))?;
        Ok(Self::new(pool))
    }

    /// Applies the bundled migrations.
    pub async fn migrate(&self) -> Result<(), PersistenceError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| PersistenceError::Unavailable(format!("Migration failed: {}", e)))
    }
}

#[async_trait]
impl FeedbackSink for PostgresFeedbackSink {
    async fn record(&self, record: &FeedbackRecord) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO match_feedback (
                id, user_id, user_vector, candidates, selected_mentor_id, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.user_id.as_ref().map(|u| u.as_str()))
        .bind(Json(&record.user_vector))
        .bind(Json(&record.candidates))
        .bind(record.selected_mentor_id.as_str())
        .bind(record.timestamp.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                PersistenceError::Unavailable(e.to_string())
            }
            other => PersistenceError::Write(format!("Failed to insert match feedback: {}", other)),
        })?;

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Opens the Postgres sink, degrading to [`NoopFeedbackSink`] when the
/// store cannot be set up.
///
/// An invalid URL or a failed migration is logged as a warning; the
/// matching service starts either way. Without migrations the pool stays
/// lazy, so an unreachable database only surfaces on each write.
pub async fn connect_or_noop(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
    run_migrations: bool,
) -> Arc<dyn FeedbackSink> {
    let sink = match PostgresFeedbackSink::connect_lazy(
        database_url,
        max_connections,
        acquire_timeout,
    ) {
        Ok(sink) => sink,
        Err(err) => {
            warn!(error = %err, "Feedback store unavailable, match feedback is not saved");
            return Arc::new(NoopFeedbackSink::new());
        }
    };

    if run_migrations {
        if let Err(err) = sink.migrate().await {
            warn!(error = %err, "Feedback store unavailable, match feedback is not saved");
            return Arc::new(NoopFeedbackSink::new());
        }
        info!("Feedback migrations applied");
    }

    Arc::new(sink)
}
