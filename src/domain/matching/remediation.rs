//! Remediation Selector - challenges, benchmark ladders and resources for a gap.
//!
//! The catalog content is data, not code. It ships as
//! `data/remediation_catalog.yaml` and can be replaced from a file at
//! startup. Whatever the source, [`RemediationCatalog::try_new`] checks that
//! every attribute has at least one challenge and a full benchmark ladder.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AttributeKey, CatalogError, MentorResource};

/// Number of levels in every benchmark ladder.
pub const BENCHMARK_LEVELS: usize = 5;

/// Half-width of the "you are here" / "target" window around a benchmark.
pub const BENCHMARK_TOLERANCE: f64 = 1.0;

/// Scores below this get starter challenges.
pub const INTERMEDIATE_THRESHOLD: f64 = 4.0;

/// Scores at or above this get advanced challenges.
pub const ADVANCED_THRESHOLD: f64 = 7.0;

const BUILTIN_CATALOG: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/data/remediation_catalog.yaml"
));

/// Challenge difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Starter,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Tier for a user's current score: `< 4` starter, `< 7` intermediate,
    /// otherwise advanced.
    pub fn for_score(score: f64) -> Self {
        if score < INTERMEDIATE_THRESHOLD {
            Difficulty::Starter
        } else if score < ADVANCED_THRESHOLD {
            Difficulty::Intermediate
        } else {
            Difficulty::Advanced
        }
    }
}

/// A concrete exercise that builds one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub attribute: AttributeKey,
    pub difficulty: Difficulty,
    pub estimated_time: String,
    #[serde(default)]
    pub success_criteria: Vec<String>,
}

/// One rung of an attribute's benchmark ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    pub level: u8,
    pub score: f64,
    pub description: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl Benchmark {
    /// True when `score` is within the inclusive ±1 window of this level.
    pub fn is_near(&self, score: f64) -> bool {
        score >= self.score - BENCHMARK_TOLERANCE && score <= self.score + BENCHMARK_TOLERANCE
    }
}

/// A benchmark marked relative to the user and the target mentor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedBenchmark {
    #[serde(flatten)]
    pub benchmark: Benchmark,
    pub is_current: bool,
    pub is_target: bool,
}

/// Catalog file layout.
#[derive(Debug, Clone, Deserialize)]
pub struct RemediationCatalogRecord {
    pub challenges: Vec<Challenge>,
    pub benchmarks: BTreeMap<AttributeKey, Vec<Benchmark>>,
}

/// Validated challenges and benchmark ladders for every attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct RemediationCatalog {
    challenges: BTreeMap<AttributeKey, Vec<Challenge>>,
    benchmarks: BTreeMap<AttributeKey, Vec<Benchmark>>,
}

static BUILTIN: Lazy<Result<RemediationCatalog, CatalogError>> =
    Lazy::new(|| RemediationCatalog::from_yaml_str("builtin", BUILTIN_CATALOG));

impl RemediationCatalog {
    /// Validates a catalog record.
    ///
    /// # Errors
    /// `CatalogError::Invalid` when an attribute has no challenges, or a
    /// benchmark ladder that does not have exactly five levels.
    pub fn try_new(record: RemediationCatalogRecord) -> Result<Self, CatalogError> {
        let mut challenges: BTreeMap<AttributeKey, Vec<Challenge>> = BTreeMap::new();
        for challenge in record.challenges {
            challenges
                .entry(challenge.attribute)
                .or_default()
                .push(challenge);
        }

        let mut benchmarks = record.benchmarks;
        for key in AttributeKey::ALL {
            if challenges.get(&key).map_or(true, Vec::is_empty) {
                return Err(CatalogError::invalid(format!(
                    "no challenges for attribute '{}'",
                    key
                )));
            }

            let ladder = benchmarks.get_mut(&key).ok_or_else(|| {
                CatalogError::invalid(format!("no benchmarks for attribute '{}'", key))
            })?;
            if ladder.len() != BENCHMARK_LEVELS {
                return Err(CatalogError::invalid(format!(
                    "attribute '{}' has {} benchmark levels, expected {}",
                    key,
                    ladder.len(),
                    BENCHMARK_LEVELS
                )));
            }
            ladder.sort_by_key(|b| b.level);
        }

        Ok(Self {
            challenges,
            benchmarks,
        })
    }

    /// Parses and validates a YAML catalog.
    pub fn from_yaml_str(source_name: &str, yaml: &str) -> Result<Self, CatalogError> {
        let record: RemediationCatalogRecord =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::parse(source_name, e))?;
        Self::try_new(record)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        BUILTIN.clone()
    }

    /// All challenges for an attribute, in catalog order.
    pub fn challenges(&self, attribute: AttributeKey) -> &[Challenge] {
        self.challenges
            .get(&attribute)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The benchmark ladder for an attribute, ordered by level.
    pub fn benchmarks(&self, attribute: AttributeKey) -> &[Benchmark] {
        self.benchmarks
            .get(&attribute)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Picks remediation material for a gap attribute.
#[derive(Debug, Clone)]
pub struct RemediationSelector {
    catalog: RemediationCatalog,
}

impl RemediationSelector {
    pub fn new(catalog: RemediationCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RemediationCatalog {
        &self.catalog
    }

    /// Every challenge for `attribute` in the tier matching `user_score`.
    ///
    /// Returns an empty list when the catalog has none of that tier.
    pub fn select_challenges(&self, attribute: AttributeKey, user_score: f64) -> Vec<Challenge> {
        let tier = Difficulty::for_score(user_score);
        self.catalog
            .challenges(attribute)
            .iter()
            .filter(|c| c.difficulty == tier)
            .cloned()
            .collect()
    }

    /// The full five-level ladder for `attribute`.
    pub fn select_benchmarks(&self, attribute: AttributeKey) -> &[Benchmark] {
        self.catalog.benchmarks(attribute)
    }

    /// The ladder with "you are here" and "target" marks.
    ///
    /// Both marks use the inclusive ±1 window, so a score can light up
    /// two adjacent levels (e.g. 6 is near both 5 and 7).
    pub fn annotate_benchmarks(
        &self,
        attribute: AttributeKey,
        user_score: f64,
        target_score: f64,
    ) -> Vec<AnnotatedBenchmark> {
        self.select_benchmarks(attribute)
            .iter()
            .map(|benchmark| AnnotatedBenchmark {
                is_current: benchmark.is_near(user_score),
                is_target: benchmark.is_near(target_score),
                benchmark: benchmark.clone(),
            })
            .collect()
    }

    /// Resources that are untagged or tagged with `attribute`.
    pub fn filter_resources(
        resources: &[MentorResource],
        attribute: AttributeKey,
    ) -> Vec<MentorResource> {
        resources
            .iter()
            .filter(|r| r.is_relevant_for(attribute))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::ResourceKind;

    fn selector() -> RemediationSelector {
        RemediationSelector::new(RemediationCatalog::builtin().unwrap())
    }

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = RemediationCatalog::builtin().unwrap();
        for key in AttributeKey::ALL {
            assert_eq!(catalog.challenges(key).len(), 3);
            assert_eq!(catalog.benchmarks(key).len(), BENCHMARK_LEVELS);
        }
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Difficulty::for_score(0.0), Difficulty::Starter);
        assert_eq!(Difficulty::for_score(3.99), Difficulty::Starter);
        assert_eq!(Difficulty::for_score(4.0), Difficulty::Intermediate);
        assert_eq!(Difficulty::for_score(6.99), Difficulty::Intermediate);
        assert_eq!(Difficulty::for_score(7.0), Difficulty::Advanced);
        assert_eq!(Difficulty::for_score(10.0), Difficulty::Advanced);
    }

    #[test]
    fn selects_challenges_for_user_tier() {
        let selector = selector();

        let starter = selector.select_challenges(AttributeKey::Risk, 2.0);
        assert_eq!(starter.len(), 1);
        assert_eq!(starter[0].id, "risk-starter-1");

        let intermediate = selector.select_challenges(AttributeKey::Network, 5.0);
        assert_eq!(intermediate[0].id, "network-intermediate-1");

        let advanced = selector.select_challenges(AttributeKey::Grind, 8.0);
        assert_eq!(advanced[0].id, "grind-advanced-1");
        assert!(advanced.iter().all(|c| c.attribute == AttributeKey::Grind));
    }

    #[test]
    fn benchmarks_are_full_ladder_in_level_order() {
        let ladder = selector().select_benchmarks(AttributeKey::Resilience).to_vec();
        let levels: Vec<u8> = ladder.iter().map(|b| b.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5]);
        assert_eq!(ladder[0].description, "Fragile");
        assert_eq!(ladder[4].score, 10.0);
    }

    #[test]
    fn benchmark_window_is_inclusive() {
        let b = Benchmark {
            level: 3,
            score: 7.0,
            description: "Steady".to_string(),
            examples: vec![],
        };
        assert!(b.is_near(6.0));
        assert!(b.is_near(8.0));
        assert!(!b.is_near(5.99));
        assert!(!b.is_near(8.01));
    }

    #[test]
    fn annotation_marks_current_and_target_levels() {
        let annotated = selector().annotate_benchmarks(AttributeKey::Risk, 5.0, 10.0);

        let current: Vec<u8> = annotated
            .iter()
            .filter(|a| a.is_current)
            .map(|a| a.benchmark.level)
            .collect();
        let target: Vec<u8> = annotated
            .iter()
            .filter(|a| a.is_target)
            .map(|a| a.benchmark.level)
            .collect();

        // 5 is within ±1 of level 2 (score 5) only.
        assert_eq!(current, vec![2]);
        // 10 is within ±1 of level 4 (score 9) and level 5 (score 10).
        assert_eq!(target, vec![4, 5]);
    }

    #[test]
    fn filters_resources_by_tag() {
        let resource = |title: &str, tags: Vec<AttributeKey>| MentorResource {
            kind: ResourceKind::Essay,
            title: title.to_string(),
            url: format!("https://example.com/{}", title),
            relevant_for: tags,
        };
        let resources = vec![
            resource("grind", vec![AttributeKey::Grind]),
            resource("any", vec![]),
            resource("risk", vec![AttributeKey::Risk, AttributeKey::Network]),
        ];

        let kept = RemediationSelector::filter_resources(&resources, AttributeKey::Risk);
        let titles: Vec<&str> = kept.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["any", "risk"]);
    }

    #[test]
    fn catalog_missing_challenges_is_rejected() {
        let yaml = BUILTIN_CATALOG.replace("attribute: education", "attribute: risk");
        let err = RemediationCatalog::from_yaml_str("test", &yaml).unwrap_err();
        assert_eq!(
            err,
            CatalogError::invalid("no challenges for attribute 'education'")
        );
    }

    #[test]
    fn catalog_with_short_ladder_is_rejected() {
        let mut record: RemediationCatalogRecord = serde_yaml::from_str(BUILTIN_CATALOG).unwrap();
        record
            .benchmarks
            .get_mut(&AttributeKey::Network)
            .unwrap()
            .pop();

        let err = RemediationCatalog::try_new(record).unwrap_err();
        assert!(err.to_string().contains("'network' has 4 benchmark levels"));
    }

    #[test]
    fn unparseable_catalog_reports_source() {
        let err = RemediationCatalog::from_yaml_str("custom.yaml", "challenges: [").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { ref source_name, .. } if source_name == "custom.yaml"));
    }
}
