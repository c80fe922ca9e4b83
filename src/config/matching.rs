//! Matching engine configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::matching::AttributeWeights;

/// Largest accepted `top_n`.
pub const MAX_TOP_N: usize = 50;

/// Matching configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Number of top matches returned when a request does not say
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Attribute weighting used for distances
    #[serde(default)]
    pub weights: WeightsPreset,

    /// Seconds a loaded mentor pool stays fresh
    #[serde(default = "default_mentor_cache_ttl")]
    pub mentor_cache_ttl_secs: u64,
}

/// Named attribute weightings
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightsPreset {
    /// Every attribute weighs 1.0
    #[default]
    Uniform,
    /// Risk and grind weigh more, education less
    Emphasized,
}

impl MatchingConfig {
    /// Weights for the configured preset
    pub fn attribute_weights(&self) -> AttributeWeights {
        match self.weights {
            WeightsPreset::Uniform => AttributeWeights::uniform(),
            WeightsPreset::Emphasized => AttributeWeights::emphasized(),
        }
    }

    /// Get mentor cache TTL as Duration
    pub fn mentor_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.mentor_cache_ttl_secs)
    }

    /// Validate matching configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.top_n == 0 || self.top_n > MAX_TOP_N {
            return Err(ValidationError::InvalidTopN { max: MAX_TOP_N });
        }
        if self.mentor_cache_ttl_secs == 0 {
            return Err(ValidationError::InvalidCacheTtl);
        }
        Ok(())
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            weights: WeightsPreset::default(),
            mentor_cache_ttl_secs: default_mentor_cache_ttl(),
        }
    }
}

fn default_top_n() -> usize {
    3
}

fn default_mentor_cache_ttl() -> u64 {
    3600
}
