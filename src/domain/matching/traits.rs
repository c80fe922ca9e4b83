//! Selectable traits and the user's per-trait selections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ImpactVector, MatchingError};
use crate::domain::foundation::{TraitId, ValidationError};

/// Catalog grouping of a trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitCategory {
    Origin,
    Economic,
    Social,
    Career,
    Habits,
    Vibe,
}

impl Default for TraitCategory {
    fn default() -> Self {
        Self::Vibe
    }
}

/// Raw trait data as it arrives from a catalog file or store.
///
/// The impact is kept as an untyped map so that a missing key can be
/// reported against the trait id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitRecord {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub category: TraitCategory,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub context_question: Option<String>,
    #[serde(default)]
    pub verification_prompts: Vec<String>,
    pub impact: BTreeMap<String, f64>,
}

/// A selectable descriptor that nudges the user's vector.
///
/// Immutable once built. Only constructed from catalog data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trait {
    id: TraitId,
    label: String,
    category: TraitCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context_question: Option<String>,
    verification_prompts: Vec<String>,
    impact: ImpactVector,
}

impl Trait {
    /// Creates a trait with no note, context question or verification prompts.
    pub fn new(
        id: TraitId,
        label: impl Into<String>,
        category: TraitCategory,
        impact: ImpactVector,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            category,
            note: None,
            context_question: None,
            verification_prompts: Vec::new(),
            impact,
        }
    }

    pub fn id(&self) -> &TraitId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> TraitCategory {
        self.category
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn context_question(&self) -> Option<&str> {
        self.context_question.as_deref()
    }

    pub fn verification_prompts(&self) -> &[String] {
        &self.verification_prompts
    }

    pub fn impact(&self) -> &ImpactVector {
        &self.impact
    }
}

impl TryFrom<TraitRecord> for Trait {
    type Error = MatchingError;

    fn try_from(record: TraitRecord) -> Result<Self, Self::Error> {
        let impact =
            ImpactVector::try_from(record.impact).map_err(|defect| MatchingError::MalformedTrait {
                trait_id: record.id.clone(),
                defect,
            })?;
        let id = TraitId::new(record.id)?;
        if record.label.trim().is_empty() {
            return Err(ValidationError::empty_field("label").into());
        }

        Ok(Self {
            id,
            label: record.label,
            category: record.category,
            note: record.note,
            context_question: record.context_question,
            verification_prompts: record.verification_prompts,
            impact,
        })
    }
}

/// Slider position for a selected trait, 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    /// Full strength; the default when the user never touched the slider.
    pub const FULL: Self = Self(100);

    /// Creates an intensity, rejecting values above 100.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::out_of_range(
                "intensity",
                0,
                100,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Factor applied to a trait's impact (`intensity / 100`).
    pub fn multiplier(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u8> for Intensity {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Intensity> for u8 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

/// The user's adjustment of one selected trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSelection {
    pub trait_id: TraitId,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub verifications: Vec<bool>,
}

impl UserSelection {
    /// Creates a selection with the given intensity and no verifications.
    pub fn new(trait_id: TraitId, intensity: Intensity) -> Self {
        Self {
            trait_id,
            intensity,
            context: None,
            verifications: Vec::new(),
        }
    }

    /// Number of verification boxes the user checked.
    pub fn verified_count(&self) -> usize {
        self.verifications.iter().filter(|v| **v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matching::{AttributeKey, VectorDefect};
    use serde_json::json;

    fn record(impact: serde_json::Value) -> TraitRecord {
        serde_json::from_value(json!({
            "id": "GRINDSET",
            "label": "Grindset",
            "category": "Habits",
            "impact": impact,
        }))
        .unwrap()
    }

    #[test]
    fn trait_builds_from_complete_record() {
        let t = Trait::try_from(record(json!({
            "risk": 0.0, "network": -1.0, "grind": 3.0, "education": 0.0, "resilience": 1.0
        })))
        .unwrap();

        assert_eq!(t.id().as_str(), "GRINDSET");
        assert_eq!(t.category(), TraitCategory::Habits);
        assert_eq!(t.impact()[AttributeKey::Grind], 3.0);
        assert_eq!(t.impact()[AttributeKey::Network], -1.0);
    }

    #[test]
    fn trait_with_missing_impact_key_is_malformed() {
        let err = Trait::try_from(record(json!({
            "risk": 0.0, "network": 0.0, "grind": 3.0, "education": 0.0
        })))
        .unwrap_err();

        assert_eq!(
            err,
            MatchingError::MalformedTrait {
                trait_id: "GRINDSET".to_string(),
                defect: VectorDefect::MissingKeys(vec![AttributeKey::Resilience]),
            }
        );
    }

    #[test]
    fn intensity_defaults_to_full() {
        let selection: UserSelection =
            serde_json::from_value(json!({"traitId": "GRINDSET"})).unwrap();
        assert_eq!(selection.intensity, Intensity::FULL);
        assert!((selection.intensity.multiplier() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn intensity_above_hundred_is_rejected() {
        assert!(Intensity::try_new(101).is_err());
        let result: Result<UserSelection, _> =
            serde_json::from_value(json!({"traitId": "GRINDSET", "intensity": 150}));
        assert!(result.is_err());
    }

    #[test]
    fn verified_count_counts_checked_boxes() {
        let selection: UserSelection = serde_json::from_value(json!({
            "traitId": "GRINDSET",
            "intensity": 60,
            "verifications": [true, false, true]
        }))
        .unwrap();
        assert_eq!(selection.verified_count(), 2);
    }
}
