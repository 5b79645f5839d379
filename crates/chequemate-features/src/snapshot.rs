//! Feature snapshot types shared by the extractor, the store and the matchmaker.

use std::collections::BTreeMap;

use chequemate_history::{ECO_CODE_COUNT, EcoCode};
use chequemate_stats::vector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fraction of games played per time-control label.
///
/// Keys are whatever labels were observed; values sum to 1.0 unless the map is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePreference(BTreeMap<String, f64>);

impl TimePreference {
    #[must_use]
    pub fn new(fractions: BTreeMap<String, f64>) -> Self {
        Self(fractions)
    }

    /// Fraction for `label`, or 0.0 if the label was never observed.
    #[must_use]
    pub fn get(&self, label: &str) -> f64 {
        self.0.get(label).copied().unwrap_or(0.0)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(label, fraction)| (label.as_str(), *fraction))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether at least one label appears in both preferences.
    #[must_use]
    pub fn shares_label_with(&self, other: &Self) -> bool {
        other.labels().any(|label| self.0.contains_key(label))
    }

    /// Sum over this preference's labels of `self[label] * other[label]`.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> f64 {
        self.iter()
            .map(|(label, fraction)| fraction * other.get(label))
            .sum()
    }
}

impl<S> FromIterator<(S, f64)> for TimePreference
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidStyleVectorError {
    #[display("style vector has {len} entries, expected 500")]
    Length { len: usize },
    #[display("style vector entry {index} is {value}, expected a finite non-negative number")]
    Entry { index: usize, value: f64 },
}

/// Normalized opening-code histogram.
///
/// Always [`ECO_CODE_COUNT`] entries, indexed by [`EcoCode::index`]. Entries are
/// non-negative and sum to 1.0, or are all zero when no game carried an opening code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct StyleVector(Vec<f64>);

impl StyleVector {
    #[must_use]
    pub fn zeros() -> Self {
        Self(vec![0.0; ECO_CODE_COUNT])
    }

    /// Builds the vector from per-code counts, dividing by their total.
    ///
    /// # Panics
    ///
    /// Panics if `counts.len() != ECO_CODE_COUNT`.
    #[must_use]
    pub fn from_counts(counts: &[u32]) -> Self {
        assert_eq!(counts.len(), ECO_CODE_COUNT);
        Self(vector::normalize_counts(counts))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, code: EcoCode) -> f64 {
        self.0[code.index()]
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&x| x == 0.0)
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Codes with a non-zero share, in canonical order.
    pub fn nonzero(&self) -> impl Iterator<Item = (EcoCode, f64)> + '_ {
        EcoCode::all()
            .zip(&self.0)
            .filter(|(_, share)| **share > 0.0)
            .map(|(code, share)| (code, *share))
    }
}

impl Default for StyleVector {
    fn default() -> Self {
        Self::zeros()
    }
}

impl TryFrom<Vec<f64>> for StyleVector {
    type Error = InvalidStyleVectorError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        if values.len() != ECO_CODE_COUNT {
            return Err(InvalidStyleVectorError::Length { len: values.len() });
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(InvalidStyleVectorError::Entry { index, value });
        }
        Ok(Self(values))
    }
}

impl From<StyleVector> for Vec<f64> {
    fn from(vector: StyleVector) -> Self {
        vector.0
    }
}

/// The four feature groups extracted from one player's game window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerFeatures {
    pub rating: u32,
    pub streak: i32,
    pub time_preference: TimePreference,
    pub style_vector: StyleVector,
}

/// Stored features of one player. The store keeps at most one snapshot per username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerFeatureSnapshot {
    pub username: String,
    #[serde(flatten)]
    pub features: PlayerFeatures,
    pub last_updated: DateTime<Utc>,
}

impl PlayerFeatureSnapshot {
    #[must_use]
    pub fn new(username: String, features: PlayerFeatures, last_updated: DateTime<Utc>) -> Self {
        Self {
            username,
            features,
            last_updated,
        }
    }

    #[must_use]
    pub fn rating(&self) -> u32 {
        self.features.rating
    }

    #[must_use]
    pub fn streak(&self) -> i32 {
        self.features.streak
    }

    #[must_use]
    pub fn time_preference(&self) -> &TimePreference {
        &self.features.time_preference
    }

    #[must_use]
    pub fn style_vector(&self) -> &StyleVector {
        &self.features.style_vector
    }
}
