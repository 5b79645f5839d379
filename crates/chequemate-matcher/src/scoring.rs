//! Pairwise scoring of a requester against one candidate.
//!
//! Four sub-scores, each in \[0.0, 1.0\], are combined into a composite by a weighted
//! sum:
//!
//! - **Rating** - Gaussian of the rating gap, `exp(-gap² / (2·50²))`
//! - **Streak** - `exp(-|streak| / 5)` of the *requester's* streak; the candidate's streak
//!   plays no part
//! - **Time** - overlap of the two time preferences, summed over the requester's labels
//! - **Style** - `1 - cosine(requester, candidate)` of the style vectors, so contrasting
//!   repertoires score higher

use std::fmt;

use chequemate_features::PlayerFeatures;
use chequemate_stats::vector;
use serde::{Deserialize, Serialize};

/// Spread of the rating Gaussian.
pub const RATING_SIGMA: f64 = 50.0;
/// Decay constant of the streak penalty.
pub const STREAK_DECAY: f64 = 5.0;

/// Weights of the composite score. Each weight must be finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub rating: f64,
    pub streak: f64,
    pub time: f64,
    pub style: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            rating: 0.5,
            streak: 0.2,
            time: 0.2,
            style: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("scoring weight '{name}' must be a finite non-negative number, got {value}")]
pub struct InvalidWeightError {
    pub name: &'static str,
    pub value: f64,
}

impl ScoringWeights {
    /// Rejects negative, infinite and NaN weights.
    pub fn validate(&self) -> Result<(), InvalidWeightError> {
        let weights = [
            ("rating", self.rating),
            ("streak", self.streak),
            ("time", self.time),
            ("style", self.style),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidWeightError { name, value });
            }
        }
        Ok(())
    }
}

/// The four sub-scores of one requester/candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub rating: f64,
    pub streak: f64,
    pub time: f64,
    pub style: f64,
}

impl SubScores {
    #[must_use]
    pub fn compute(requester: &PlayerFeatures, candidate: &PlayerFeatures) -> Self {
        Self {
            rating: rating_score(requester.rating, candidate.rating),
            streak: streak_score(requester.streak),
            time: time_score(requester, candidate),
            style: style_score(requester, candidate),
        }
    }

    #[must_use]
    pub fn weighted_sum(&self, weights: &ScoringWeights) -> f64 {
        weights.rating * self.rating
            + weights.streak * self.streak
            + weights.time * self.time
            + weights.style * self.style
    }
}

#[must_use]
pub fn rating_score(requester_rating: u32, candidate_rating: u32) -> f64 {
    let gap = f64::from(requester_rating.abs_diff(candidate_rating));
    (-(gap * gap) / (2.0 * RATING_SIGMA * RATING_SIGMA)).exp()
}

#[must_use]
pub fn streak_score(requester_streak: i32) -> f64 {
    (-f64::from(requester_streak.unsigned_abs()) / STREAK_DECAY).exp()
}

#[must_use]
pub fn time_score(requester: &PlayerFeatures, candidate: &PlayerFeatures) -> f64 {
    requester
        .time_preference
        .overlap(&candidate.time_preference)
}

#[must_use]
pub fn style_score(requester: &PlayerFeatures, candidate: &PlayerFeatures) -> f64 {
    1.0 - vector::cosine_similarity(
        requester.style_vector.as_slice(),
        candidate.style_vector.as_slice(),
    )
}

/// Scores how good an opponent `candidate` is for `requester`. Higher is better.
///
/// Implementations must be deterministic: the matchmaker relies on equal inputs
/// producing equal scores to keep tie-breaking stable.
pub trait OpponentScorer: fmt::Debug + Send + Sync {
    fn score(&self, requester: &PlayerFeatures, candidate: &PlayerFeatures) -> f64;
}

/// Composite score: weighted sum of [`SubScores`].
#[derive(Debug, Clone, Default)]
pub struct WeightedOpponentScorer {
    weights: ScoringWeights,
}

impl WeightedOpponentScorer {
    #[must_use]
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }
}

impl OpponentScorer for WeightedOpponentScorer {
    fn score(&self, requester: &PlayerFeatures, candidate: &PlayerFeatures) -> f64 {
        SubScores::compute(requester, candidate).weighted_sum(&self.weights)
    }
}
