//! Attribute keys and the fixed-dimension vectors built on them.
//!
//! Every vector in the matching domain carries exactly one value per
//! [`AttributeKey`]. Three flavours share that shape:
//!
//! - [`AttributeVector`] - a user or mentor profile, clamped to `[0, 10]`
//! - [`ImpactVector`] - a trait's signed shift, finite but unclamped
//! - [`AttributeWeights`] - non-negative per-attribute distance weights

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use super::MatchingError;
use crate::domain::foundation::ValidationError;

/// Score every user vector starts from before traits are applied.
pub const BASELINE_SCORE: f64 = 5.0;

/// Lower bound of every stored attribute value.
pub const MIN_SCORE: f64 = 0.0;

/// Upper bound of every stored attribute value.
pub const MAX_SCORE: f64 = 10.0;

/// Number of attribute dimensions.
pub const ATTRIBUTE_COUNT: usize = 5;

/// Clamps a score into `[MIN_SCORE, MAX_SCORE]`.
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(MIN_SCORE, MAX_SCORE)
}

/// One of the five scoring dimensions shared by all vectors.
///
/// Declaration order is the canonical order used for iteration and
/// tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKey {
    Risk,
    Network,
    Grind,
    Education,
    Resilience,
}

impl AttributeKey {
    /// All keys in canonical order.
    pub const ALL: [AttributeKey; ATTRIBUTE_COUNT] = [
        AttributeKey::Risk,
        AttributeKey::Network,
        AttributeKey::Grind,
        AttributeKey::Education,
        AttributeKey::Resilience,
    ];

    /// Wire name (`"risk"`, `"network"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::Risk => "risk",
            AttributeKey::Network => "network",
            AttributeKey::Grind => "grind",
            AttributeKey::Education => "education",
            AttributeKey::Resilience => "resilience",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AttributeKey::Risk => "Risk",
            AttributeKey::Network => "Network",
            AttributeKey::Grind => "Grind",
            AttributeKey::Education => "Education",
            AttributeKey::Resilience => "Resilience",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttributeKey {
    type Err = MatchingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MatchingError::UnknownAttribute(s.to_string()))
    }
}

/// Why a raw attribute map could not become a vector.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorDefect {
    /// One or more of the five keys is absent.
    MissingKeys(Vec<AttributeKey>),
    /// A key outside the closed attribute set was supplied.
    UnknownKey(String),
    /// A component is NaN or infinite.
    NonFinite(AttributeKey),
}

impl fmt::Display for VectorDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorDefect::MissingKeys(keys) => {
                let names: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
                write!(f, "missing attribute keys [{}]", names.join(", "))
            }
            VectorDefect::UnknownKey(key) => write!(f, "unknown attribute key '{}'", key),
            VectorDefect::NonFinite(key) => write!(f, "attribute '{}' is not a finite number", key),
        }
    }
}

impl std::error::Error for VectorDefect {}

fn components_from_map(map: &BTreeMap<String, f64>) -> Result<[f64; ATTRIBUTE_COUNT], VectorDefect> {
    let mut values = [0.0; ATTRIBUTE_COUNT];
    let mut seen = [false; ATTRIBUTE_COUNT];

    for (name, value) in map {
        let key = name
            .parse::<AttributeKey>()
            .map_err(|_| VectorDefect::UnknownKey(name.clone()))?;
        if !value.is_finite() {
            return Err(VectorDefect::NonFinite(key));
        }
        values[key.index()] = *value;
        seen[key.index()] = true;
    }

    let missing: Vec<AttributeKey> = AttributeKey::ALL
        .into_iter()
        .filter(|key| !seen[key.index()])
        .collect();
    if !missing.is_empty() {
        return Err(VectorDefect::MissingKeys(missing));
    }

    Ok(values)
}

fn check_finite(values: &[f64; ATTRIBUTE_COUNT]) -> Result<(), VectorDefect> {
    match AttributeKey::ALL.into_iter().find(|k| !values[k.index()].is_finite()) {
        Some(key) => Err(VectorDefect::NonFinite(key)),
        None => Ok(()),
    }
}

fn serialize_components<S: Serializer>(
    values: &[f64; ATTRIBUTE_COUNT],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(ATTRIBUTE_COUNT))?;
    for key in AttributeKey::ALL {
        map.serialize_entry(key.as_str(), &values[key.index()])?;
    }
    map.end()
}

// ════════════════════════════════════════════════════════════════════════════
// AttributeVector
// ════════════════════════════════════════════════════════════════════════════

/// A complete, clamped profile: one value in `[0, 10]` per attribute.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct AttributeVector([f64; ATTRIBUTE_COUNT]);

impl AttributeVector {
    /// Builds a vector from values in canonical order, clamping each one.
    pub fn try_new(values: [f64; ATTRIBUTE_COUNT]) -> Result<Self, VectorDefect> {
        check_finite(&values)?;
        Ok(Self(values.map(clamp_score)))
    }

    /// Every component at [`BASELINE_SCORE`].
    pub fn baseline() -> Self {
        Self([BASELINE_SCORE; ATTRIBUTE_COUNT])
    }

    /// Returns the value for one attribute.
    pub fn get(&self, key: AttributeKey) -> f64 {
        self.0[key.index()]
    }

    /// Adds `delta` to one attribute and clamps the result.
    pub(crate) fn shift_clamped(&mut self, key: AttributeKey, delta: f64) {
        let slot = &mut self.0[key.index()];
        *slot = clamp_score(*slot + delta);
    }

    /// Iterates `(key, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, f64)> + '_ {
        AttributeKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Values in canonical order.
    pub fn to_array(&self) -> [f64; ATTRIBUTE_COUNT] {
        self.0
    }
}

impl Default for AttributeVector {
    fn default() -> Self {
        Self::baseline()
    }
}

impl Index<AttributeKey> for AttributeVector {
    type Output = f64;

    fn index(&self, key: AttributeKey) -> &f64 {
        &self.0[key.index()]
    }
}

impl TryFrom<BTreeMap<String, f64>> for AttributeVector {
    type Error = VectorDefect;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let values = components_from_map(&map)?;
        Ok(Self(values.map(clamp_score)))
    }
}

impl Serialize for AttributeVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_components(&self.0, serializer)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ImpactVector
// ════════════════════════════════════════════════════════════════════════════

/// Signed per-attribute shift a trait applies to the baseline profile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>")]
pub struct ImpactVector([f64; ATTRIBUTE_COUNT]);

impl ImpactVector {
    /// Builds an impact from values in canonical order.
    pub fn try_new(values: [f64; ATTRIBUTE_COUNT]) -> Result<Self, VectorDefect> {
        check_finite(&values)?;
        Ok(Self(values))
    }

    /// An impact that shifts nothing.
    pub fn zero() -> Self {
        Self([0.0; ATTRIBUTE_COUNT])
    }

    /// Returns the shift for one attribute.
    pub fn get(&self, key: AttributeKey) -> f64 {
        self.0[key.index()]
    }
}

impl Index<AttributeKey> for ImpactVector {
    type Output = f64;

    fn index(&self, key: AttributeKey) -> &f64 {
        &self.0[key.index()]
    }
}

impl TryFrom<BTreeMap<String, f64>> for ImpactVector {
    type Error = VectorDefect;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Ok(Self(components_from_map(&map)?))
    }
}

impl Serialize for ImpactVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_components(&self.0, serializer)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AttributeWeights
// ════════════════════════════════════════════════════════════════════════════

/// Per-attribute weights for the distance metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeWeights([f64; ATTRIBUTE_COUNT]);

impl AttributeWeights {
    /// Builds weights from values in canonical order.
    ///
    /// Every weight must be finite and non-negative, and at least one must
    /// be positive so the maximum distance is non-zero.
    pub fn try_new(values: [f64; ATTRIBUTE_COUNT]) -> Result<Self, ValidationError> {
        for key in AttributeKey::ALL {
            let w = values[key.index()];
            if !w.is_finite() || w < 0.0 {
                return Err(ValidationError::invalid_format(
                    format!("weights.{}", key),
                    "weight must be a finite, non-negative number",
                ));
            }
        }
        if values.iter().sum::<f64>() <= 0.0 {
            return Err(ValidationError::invalid_format(
                "weights",
                "at least one weight must be positive",
            ));
        }
        Ok(Self(values))
    }

    /// Weight 1.0 on every attribute.
    pub fn uniform() -> Self {
        Self([1.0; ATTRIBUTE_COUNT])
    }

    /// Risk-forward weighting: risk 1.5, network 1.0, grind 1.2,
    /// education 0.8, resilience 1.0.
    pub fn emphasized() -> Self {
        Self([1.5, 1.0, 1.2, 0.8, 1.0])
    }

    /// Returns the weight for one attribute.
    pub fn get(&self, key: AttributeKey) -> f64 {
        self.0[key.index()]
    }
}

impl Default for AttributeWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_iterate_in_canonical_order() {
        let names: Vec<&str> = AttributeKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["risk", "network", "grind", "education", "resilience"]);
    }

    #[test]
    fn key_parses_case_insensitively() {
        assert_eq!("Grind".parse::<AttributeKey>().unwrap(), AttributeKey::Grind);
        assert_eq!(
            "grit".parse::<AttributeKey>(),
            Err(MatchingError::UnknownAttribute("grit".to_string()))
        );
    }

    #[test]
    fn try_new_clamps_out_of_range_values() {
        let v = AttributeVector::try_new([12.0, -3.0, 5.5, 10.0, 0.0]).unwrap();
        assert_eq!(v.to_array(), [10.0, 0.0, 5.5, 10.0, 0.0]);
    }

    #[test]
    fn try_new_rejects_non_finite_values() {
        let err = AttributeVector::try_new([1.0, f64::NAN, 1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(err, VectorDefect::NonFinite(AttributeKey::Network));
    }

    #[test]
    fn shift_clamped_respects_bounds() {
        let mut v = AttributeVector::baseline();
        v.shift_clamped(AttributeKey::Risk, 8.0);
        v.shift_clamped(AttributeKey::Grind, -9.0);
        assert_eq!(v[AttributeKey::Risk], 10.0);
        assert_eq!(v[AttributeKey::Grind], 0.0);
        assert_eq!(v[AttributeKey::Network], BASELINE_SCORE);
    }

    #[test]
    fn vector_serializes_as_named_map() {
        let v = AttributeVector::try_new([10.0, 8.0, 10.0, 7.0, 10.0]).unwrap();
        let value = serde_json::to_value(v).unwrap();
        assert_eq!(
            value,
            json!({"risk": 10.0, "network": 8.0, "grind": 10.0, "education": 7.0, "resilience": 10.0})
        );
    }

    #[test]
    fn vector_deserialization_reports_missing_keys() {
        let result: Result<AttributeVector, _> =
            serde_json::from_value(json!({"risk": 1.0, "network": 2.0, "grind": 3.0}));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("missing attribute keys [education, resilience]"));
    }

    #[test]
    fn vector_deserialization_clamps_values() {
        let v: AttributeVector = serde_json::from_value(
            json!({"risk": 14.0, "network": 2.0, "grind": 3.0, "education": 4.0, "resilience": -1.0}),
        )
        .unwrap();
        assert_eq!(v[AttributeKey::Risk], 10.0);
        assert_eq!(v[AttributeKey::Resilience], 0.0);
    }

    #[test]
    fn impact_keeps_negative_values() {
        let impact: ImpactVector = serde_json::from_value(
            json!({"risk": -2.0, "network": 0.0, "grind": 3.0, "education": 0.0, "resilience": 0.0}),
        )
        .unwrap();
        assert_eq!(impact[AttributeKey::Risk], -2.0);
    }

    #[test]
    fn impact_rejects_unknown_key() {
        let map: BTreeMap<String, f64> = [
            ("risk", 1.0),
            ("network", 0.0),
            ("grind", 0.0),
            ("education", 0.0),
            ("resilience", 0.0),
            ("charisma", 2.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        assert_eq!(
            ImpactVector::try_from(map).unwrap_err(),
            VectorDefect::UnknownKey("charisma".to_string())
        );
    }

    #[test]
    fn weights_reject_negative_and_all_zero() {
        assert!(AttributeWeights::try_new([1.0, -0.1, 1.0, 1.0, 1.0]).is_err());
        assert!(AttributeWeights::try_new([0.0; ATTRIBUTE_COUNT]).is_err());
        assert!(AttributeWeights::try_new([0.0, 0.0, 2.0, 0.0, 0.0]).is_ok());
    }
}
