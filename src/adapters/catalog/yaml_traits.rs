//! YAML-backed trait catalog.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::foundation::TraitId;
use crate::domain::matching::{CatalogError, Trait, TraitRecord};
use crate::ports::TraitCatalog;

const BUILTIN_TRAITS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/traits.yaml"));

/// Trait catalog loaded once from a YAML list of trait records.
///
/// Every record is validated on load; a single malformed trait fails the
/// whole catalog.
#[derive(Debug, Clone)]
pub struct YamlTraitCatalog {
    traits: Vec<Trait>,
    index: HashMap<TraitId, usize>,
}

impl YamlTraitCatalog {
    /// Builds a catalog from already-validated traits.
    pub fn new(traits: Vec<Trait>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(traits.len());
        for (position, t) in traits.iter().enumerate() {
            if index.insert(t.id().clone(), position).is_some() {
                return Err(CatalogError::invalid(format!(
                    "duplicate trait id '{}'",
                    t.id()
                )));
            }
        }
        Ok(Self { traits, index })
    }

    /// Parses a YAML list of trait records.
    pub fn from_yaml_str(source_name: &str, yaml: &str) -> Result<Self, CatalogError> {
        let records: Vec<TraitRecord> =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::parse(source_name, e))?;
        let traits = records
            .into_iter()
            .map(Trait::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(traits)
    }

    /// Reads and parses a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let yaml = std::fs::read_to_string(path).map_err(|e| CatalogError::read(&display, e))?;
        Self::from_yaml_str(&display, &yaml)
    }

    /// The trait catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str("builtin traits", BUILTIN_TRAITS)
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }
}

impl TraitCatalog for YamlTraitCatalog {
    fn all(&self) -> &[Trait] {
        &self.traits
    }

    fn find(&self, id: &TraitId) -> Option<&Trait> {
        self.index.get(id).map(|position| &self.traits[*position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::{AttributeKey, MatchingError, TraitCategory};
    use std::io::Write;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = YamlTraitCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 16);

        let grindset = catalog.find(&TraitId::new("GRINDSET").unwrap()).unwrap();
        assert_eq!(grindset.label(), "Grindset");
        assert_eq!(grindset.category(), TraitCategory::Habits);
        assert_eq!(grindset.impact()[AttributeKey::Grind], 3.0);
        assert_eq!(grindset.verification_prompts().len(), 3);
        assert!(grindset.context_question().is_some());
    }

    #[test]
    fn unknown_id_is_none() {
        let catalog = YamlTraitCatalog::builtin().unwrap();
        assert!(catalog.find(&TraitId::new("NOPE").unwrap()).is_none());
    }

    #[test]
    fn malformed_impact_fails_whole_catalog() {
        let yaml = r#"
- id: OK
  label: Fine
  impact: { risk: 1, network: 0, grind: 0, education: 0, resilience: 0 }
- id: BROKEN
  label: Broken
  impact: { risk: 1, network: 0 }
"#;
        let err = YamlTraitCatalog::from_yaml_str("inline", yaml).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Malformed(MatchingError::MalformedTrait { ref trait_id, .. }) if trait_id == "BROKEN"
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r#"
- id: SAME
  label: One
  impact: { risk: 1, network: 0, grind: 0, education: 0, resilience: 0 }
- id: SAME
  label: Two
  impact: { risk: 0, network: 1, grind: 0, education: 0, resilience: 0 }
"#;
        let err = YamlTraitCatalog::from_yaml_str("inline", yaml).unwrap_err();
        assert_eq!(err, CatalogError::invalid("duplicate trait id 'SAME'"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "- id: SOLO\n  label: Solo\n  impact: {{ risk: 2, network: 0, grind: 0, education: 0, resilience: 0 }}"
        )
        .unwrap();

        let catalog = YamlTraitCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.all().len(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = YamlTraitCatalog::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
