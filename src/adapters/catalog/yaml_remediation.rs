//! Remediation catalog loaded from a YAML file.

use std::path::Path;

use crate::domain::matching::{CatalogError, RemediationCatalog};

/// Reads and validates a remediation catalog file.
pub fn remediation_from_file(path: impl AsRef<Path>) -> Result<RemediationCatalog, CatalogError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let yaml = std::fs::read_to_string(path).map_err(|e| CatalogError::read(&display, e))?;
    RemediationCatalog::from_yaml_str(&display, &yaml)
}
