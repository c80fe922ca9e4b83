//! Mentor (candidate) profiles and their attached learning resources.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AttributeKey, AttributeVector, MatchingError};
use crate::domain::foundation::{MentorId, ValidationError};

/// Kind of learning resource attached to a mentor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Essay,
    Video,
    Book,
    Course,
    Tool,
}

/// A resource a mentor recommends, optionally tagged by attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorResource {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    pub url: String,
    /// Attributes this resource helps with; empty means "all".
    #[serde(default)]
    pub relevant_for: Vec<AttributeKey>,
}

impl MentorResource {
    /// True when the resource is untagged or tagged with `attribute`.
    pub fn is_relevant_for(&self, attribute: AttributeKey) -> bool {
        self.relevant_for.is_empty() || self.relevant_for.contains(&attribute)
    }
}

/// Raw mentor data from a catalog file or aggregator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorRecord {
    pub id: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub traits: Vec<String>,
    pub dna: BTreeMap<String, f64>,
    #[serde(default)]
    pub resources: Vec<MentorResource>,
    #[serde(default)]
    pub key_quotes: Vec<String>,
}

fn default_level() -> u8 {
    1
}

/// A mentor profile to match users against.
///
/// Read-only input to the matching engine; its lifecycle belongs to the
/// catalog that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: MentorId,
    pub name: String,
    /// 1 (pre-seed) to 5 (unicorn).
    pub level: u8,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub bio: String,
    pub traits: Vec<String>,
    pub dna: AttributeVector,
    pub resources: Vec<MentorResource>,
    pub key_quotes: Vec<String>,
}

impl Mentor {
    /// Creates a mentor with only the fields matching needs.
    pub fn new(id: MentorId, name: impl Into<String>, dna: AttributeVector) -> Self {
        Self {
            id,
            name: name.into(),
            level: default_level(),
            title: String::new(),
            image: None,
            bio: String::new(),
            traits: Vec::new(),
            dna,
            resources: Vec::new(),
            key_quotes: Vec::new(),
        }
    }

    /// Attaches resources.
    pub fn with_resources(mut self, resources: Vec<MentorResource>) -> Self {
        self.resources = resources;
        self
    }
}

impl TryFrom<MentorRecord> for Mentor {
    type Error = MatchingError;

    fn try_from(record: MentorRecord) -> Result<Self, Self::Error> {
        let dna = AttributeVector::try_from(record.dna).map_err(|defect| {
            MatchingError::malformed_vector(format!("mentor '{}' dna", record.id), defect)
        })?;
        let id = MentorId::new(record.id)?;
        if !(1..=5).contains(&record.level) {
            return Err(
                ValidationError::out_of_range("level", 1, 5, record.level as i32).into(),
            );
        }

        Ok(Self {
            id,
            name: record.name,
            level: record.level,
            title: record.title,
            image: record.image.filter(|s| !s.is_empty()),
            bio: record.bio,
            traits: record.traits,
            dna,
            resources: record.resources,
            key_quotes: record.key_quotes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::VectorDefect;
    use serde_json::json;

    #[test]
    fn mentor_builds_from_record() {
        let record: MentorRecord = serde_json::from_value(json!({
            "id": "paul-graham",
            "name": "Paul Graham",
            "level": 4,
            "title": "PROTOCOL WRITER",
            "dna": {"risk": 7, "network": 8, "grind": 7, "education": 9, "resilience": 8},
            "resources": [
                {"type": "essay", "title": "Do Things That Don't Scale",
                 "url": "http://www.paulgraham.com/ds.html", "relevantFor": ["grind"]}
            ]
        }))
        .unwrap();

        let mentor = Mentor::try_from(record).unwrap();
        assert_eq!(mentor.id.as_str(), "paul-graham");
        assert_eq!(mentor.dna[AttributeKey::Education], 9.0);
        assert_eq!(mentor.resources[0].kind, ResourceKind::Essay);
        assert_eq!(mentor.resources[0].relevant_for, vec![AttributeKey::Grind]);
    }

    #[test]
    fn mentor_with_incomplete_dna_is_malformed() {
        let record: MentorRecord = serde_json::from_value(json!({
            "id": "ghost",
            "name": "Ghost",
            "dna": {"risk": 7, "network": 8}
        }))
        .unwrap();

        match Mentor::try_from(record) {
            Err(MatchingError::MalformedVector { context, defect }) => {
                assert_eq!(context, "mentor 'ghost' dna");
                assert_eq!(
                    defect,
                    VectorDefect::MissingKeys(vec![
                        AttributeKey::Grind,
                        AttributeKey::Education,
                        AttributeKey::Resilience
                    ])
                );
            }
            other => panic!("Expected MalformedVector, got {:?}", other),
        }
    }

    #[test]
    fn mentor_level_out_of_range_is_rejected() {
        let record: MentorRecord = serde_json::from_value(json!({
            "id": "x", "name": "X", "level": 9,
            "dna": {"risk": 1, "network": 1, "grind": 1, "education": 1, "resilience": 1}
        }))
        .unwrap();
        assert!(matches!(
            Mentor::try_from(record),
            Err(MatchingError::Validation(_))
        ));
    }

    #[test]
    fn untagged_resource_is_relevant_everywhere() {
        let resource = MentorResource {
            kind: ResourceKind::Book,
            title: "Book".to_string(),
            url: "https://example.com".to_string(),
            relevant_for: vec![],
        };
        assert!(AttributeKey::ALL.iter().all(|k| resource.is_relevant_for(*k)));
    }
}
