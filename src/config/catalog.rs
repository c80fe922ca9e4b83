//! Catalog file configuration
//!
//! Every catalog ships built in; a configured path replaces the built-in
//! copy.

use serde::Deserialize;

use super::error::ValidationError;

/// Catalog configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// YAML trait catalog
    pub traits_path: Option<String>,

    /// YAML mentor pool, re-read whenever the mentor cache expires
    pub mentors_path: Option<String>,

    /// YAML remediation catalog (challenges and benchmark ladders)
    pub remediation_path: Option<String>,
}

impl CatalogConfig {
    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_path(&self.traits_path, "traits_path")?;
        check_path(&self.mentors_path, "mentors_path")?;
        check_path(&self.remediation_path, "remediation_path")?;
        Ok(())
    }
}

fn check_path(path: &Option<String>, name: &'static str) -> Result<(), ValidationError> {
    match path {
        Some(p) if p.trim().is_empty() => Err(ValidationError::BlankPath(name)),
        _ => Ok(()),
    }
}
