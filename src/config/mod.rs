//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MENTOR_MATCH` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a working
//! development server on the built-in catalogs.
//!
//! # Example
//!
//! ```no_run
//! use mentor_match::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod advice;
mod catalog;
mod error;
mod feedback;
mod matching;
mod server;

pub use advice::AdviceConfig;
pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use feedback::{FeedbackBackend, FeedbackConfig};
pub use matching::{MatchingConfig, WeightsPreset, MAX_TOP_N};
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Matching configuration (top N, weights, mentor cache TTL)
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Catalog file overrides
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Feedback store
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Advice generator (OpenAI)
    #[serde(default)]
    pub advice: AdviceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MENTOR_MATCH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MENTOR_MATCH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MENTOR_MATCH__FEEDBACK__BACKEND=postgres` -> `feedback.backend = postgres`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MENTOR_MATCH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.matching.validate()?;
        self.catalog.validate()?;
        self.feedback.validate()?;
        self.advice.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
