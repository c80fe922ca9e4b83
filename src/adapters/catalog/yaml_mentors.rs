//! Mentor sources backed by YAML seed data.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs;

use crate::domain::matching::{CatalogError, Mentor, MentorRecord};
use crate::ports::MentorSource;

const BUILTIN_MENTORS: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/mentors.yaml"));

/// Parses and validates a YAML list of mentor records.
///
/// Fails on the first malformed mentor or on a repeated id.
pub fn parse_mentors(source_name: &str, yaml: &str) -> Result<Vec<Mentor>, CatalogError> {
    let records: Vec<MentorRecord> =
        serde_yaml::from_str(yaml).map_err(|e| CatalogError::parse(source_name, e))?;

    let mut seen = HashSet::with_capacity(records.len());
    let mut mentors = Vec::with_capacity(records.len());
    for record in records {
        let mentor = Mentor::try_from(record)?;
        if !seen.insert(mentor.id.clone()) {
            return Err(CatalogError::invalid(format!(
                "duplicate mentor id '{}'",
                mentor.id
            )));
        }
        mentors.push(mentor);
    }

    Ok(mentors)
}

/// A fixed, in-memory mentor pool.
#[derive(Debug, Clone)]
pub struct StaticMentorSource {
    mentors: Vec<Mentor>,
}

impl StaticMentorSource {
    pub fn new(mentors: Vec<Mentor>) -> Self {
        Self { mentors }
    }

    /// The mentor pool compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        parse_mentors("builtin mentors", BUILTIN_MENTORS).map(Self::new)
    }

    pub fn mentors(&self) -> &[Mentor] {
        &self.mentors
    }
}

#[async_trait]
impl MentorSource for StaticMentorSource {
    async fn load_mentors(&self) -> Result<Vec<Mentor>, CatalogError> {
        Ok(self.mentors.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Re-reads a YAML mentor file on every load, so edits show up after the
/// pool cache expires or is refreshed.
#[derive(Debug, Clone)]
pub struct YamlFileMentorSource {
    path: PathBuf,
}

impl YamlFileMentorSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MentorSource for YamlFileMentorSource {
    async fn load_mentors(&self) -> Result<Vec<Mentor>, CatalogError> {
        let display = self.path.display().to_string();
        let yaml = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::read(&display, e))?;
        parse_mentors(&display, &yaml)
    }

    fn name(&self) -> &'static str {
        "yaml-file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::{AttributeKey, MatchingError};

    #[test]
    fn builtin_pool_loads() {
        let source = StaticMentorSource::builtin().unwrap();
        let elon = source
            .mentors()
            .iter()
            .find(|m| m.id.as_str() == "elon-musk")
            .unwrap();

        assert_eq!(elon.level, 5);
        assert_eq!(elon.dna.to_array(), [10.0, 8.0, 10.0, 7.0, 10.0]);
        assert_eq!(elon.resources.len(), 3);
        assert_eq!(elon.resources[1].relevant_for, vec![AttributeKey::Education]);
    }

    #[test]
    fn duplicate_mentor_ids_are_rejected() {
        let yaml = r#"
- id: twin
  name: One
  dna: { risk: 1, network: 1, grind: 1, education: 1, resilience: 1 }
- id: twin
  name: Two
  dna: { risk: 2, network: 2, grind: 2, education: 2, resilience: 2 }
"#;
        let err = parse_mentors("inline", yaml).unwrap_err();
        assert_eq!(err, CatalogError::invalid("duplicate mentor id 'twin'"));
    }

    #[test]
    fn malformed_dna_is_reported() {
        let yaml = "- id: half\n  name: Half\n  dna: { risk: 1 }\n";
        let err = parse_mentors("inline", yaml).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Malformed(MatchingError::MalformedVector { .. })
        ));
    }

    #[tokio::test]
    async fn file_source_rereads_on_each_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mentors.yaml");
        let first = "- id: a\n  name: A\n  dna: { risk: 1, network: 1, grind: 1, education: 1, resilience: 1 }\n";
        let second = "- id: b\n  name: B\n  dna: { risk: 2, network: 2, grind: 2, education: 2, resilience: 2 }\n";
        std::fs::write(&path, first).unwrap();

        let source = YamlFileMentorSource::new(&path);
        assert_eq!(source.load_mentors().await.unwrap().len(), 1);

        std::fs::write(&path, format!("{}{}", first, second)).unwrap();
        assert_eq!(source.load_mentors().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_file_fails_load() {
        let source = YamlFileMentorSource::new("/no/such/mentors.yaml");
        assert!(matches!(
            source.load_mentors().await,
            Err(CatalogError::Read { .. })
        ));
    }
}
