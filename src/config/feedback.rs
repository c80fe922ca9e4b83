//! Feedback store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Feedback store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackConfig {
    /// Where ranking feedback is written
    #[serde(default)]
    pub backend: FeedbackBackend,

    /// File for the `jsonl` backend
    #[serde(default = "default_jsonl_path")]
    pub jsonl_path: String,

    /// PostgreSQL connection URL for the `postgres` backend
    pub database_url: Option<String>,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Run migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
}

/// Feedback store backends
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackBackend {
    /// Not persisted; a warning is logged once
    #[default]
    None,
    /// Kept in process memory
    Memory,
    /// Appended to a JSON Lines file
    Jsonl,
    /// Inserted into PostgreSQL
    Postgres,
}

impl FeedbackConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate feedback configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            FeedbackBackend::Jsonl if self.jsonl_path.trim().is_empty() => {
                Err(ValidationError::BlankPath("jsonl_path"))
            }
            FeedbackBackend::Postgres => {
                let url = self
                    .database_url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .ok_or(ValidationError::MissingRequired("FEEDBACK__DATABASE_URL"))?;
                if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                    return Err(ValidationError::InvalidDatabaseUrl);
                }
                if self.max_connections == 0 || self.max_connections > 100 {
                    return Err(ValidationError::InvalidPoolSize);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            backend: FeedbackBackend::default(),
            jsonl_path: default_jsonl_path(),
            database_url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

fn default_jsonl_path() -> String {
    "var/match_feedback.jsonl".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    10
}
