use chequemate_features::PlayerFeatures;
use serde::{Deserialize, Serialize};

/// Default width of the eligibility rating window.
pub const DEFAULT_MAX_RATING_DELTA: u32 = 300;

/// Why a candidate was filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Ineligible {
    #[display("rating gap {gap} exceeds {max}")]
    RatingGap { gap: u32, max: u32 },
    #[display("no shared time control")]
    NoSharedTimeControl,
}

/// Hard constraints a candidate must pass before it is scored.
///
/// A candidate is eligible when its rating is within `max_rating_delta` of the
/// requester's (inclusive) and the two players share at least one time-control label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityFilter {
    pub max_rating_delta: u32,
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self {
            max_rating_delta: DEFAULT_MAX_RATING_DELTA,
        }
    }
}

impl EligibilityFilter {
    pub fn check(
        &self,
        requester: &PlayerFeatures,
        candidate: &PlayerFeatures,
    ) -> Result<(), Ineligible> {
        let gap = requester.rating.abs_diff(candidate.rating);
        if gap > self.max_rating_delta {
            return Err(Ineligible::RatingGap {
                gap,
                max: self.max_rating_delta,
            });
        }
        if !requester
            .time_preference
            .shares_label_with(&candidate.time_preference)
        {
            return Err(Ineligible::NoSharedTimeControl);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_eligible(&self, requester: &PlayerFeatures, candidate: &PlayerFeatures) -> bool {
        self.check(requester, candidate).is_ok()
    }
}
