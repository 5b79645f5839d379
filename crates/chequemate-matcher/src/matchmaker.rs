//! Opponent selection over a pool of stored snapshots.
//!
//! Selection runs in three steps:
//!
//! 1. **Find the requester** - look the requester up in the pool by
//!    [canonical username](canonical_username), so letter case never matters
//! 2. **Filter** - drop every snapshot of the requester and every candidate the
//!    [`EligibilityFilter`] rejects
//! 3. **Select** - score the survivors and keep the highest score
//!
//! Ties are broken by pool order: among candidates with exactly equal scores the one
//! iterated first wins. Callers wanting a random pick among ties shuffle the pool
//! before calling.

use chequemate_features::PlayerFeatureSnapshot;
use chequemate_history::canonical_username;
use serde::{Deserialize, Serialize};

use crate::{
    eligibility::EligibilityFilter,
    scoring::{OpponentScorer, ScoringWeights, SubScores, WeightedOpponentScorer},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MatchError {
    #[display("requester {username} is not in the feature store")]
    UnknownRequester { username: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchmakerConfig {
    pub max_rating_delta: u32,
    pub weights: ScoringWeights,
}

impl Default for MatchmakerConfig {
    fn default() -> Self {
        Self {
            max_rating_delta: EligibilityFilter::default().max_rating_delta,
            weights: ScoringWeights::default(),
        }
    }
}

/// An eligible, scored opponent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    pub username: String,
    /// Score given by the matchmaker's [`OpponentScorer`]. Candidates are ordered by it.
    pub score: f64,
    /// Breakdown of the weighted composite for this pair.
    ///
    /// Always computed by [`SubScores::compute`], whatever scorer the matchmaker uses, so
    /// with a custom [`OpponentScorer`] it is informational and need not add up to `score`.
    pub sub_scores: SubScores,
    pub snapshot: PlayerFeatureSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched(MatchCandidate),
    NoEligibleCandidate,
}

impl MatchOutcome {
    #[must_use]
    pub fn candidate(&self) -> Option<&MatchCandidate> {
        match self {
            Self::Matched(candidate) => Some(candidate),
            Self::NoEligibleCandidate => None,
        }
    }

    #[must_use]
    pub fn into_candidate(self) -> Option<MatchCandidate> {
        match self {
            Self::Matched(candidate) => Some(candidate),
            Self::NoEligibleCandidate => None,
        }
    }
}

#[derive(Debug)]
pub struct Matchmaker {
    scorer: Box<dyn OpponentScorer>,
    filter: EligibilityFilter,
}

impl Default for Matchmaker {
    fn default() -> Self {
        Self::from_config(&MatchmakerConfig::default())
    }
}

impl Matchmaker {
    #[must_use]
    pub fn new(scorer: Box<dyn OpponentScorer>, filter: EligibilityFilter) -> Self {
        Self { scorer, filter }
    }

    /// Matchmaker with the weighted composite scorer.
    #[must_use]
    pub fn from_config(config: &MatchmakerConfig) -> Self {
        Self::new(
            Box::new(WeightedOpponentScorer::new(config.weights)),
            EligibilityFilter {
                max_rating_delta: config.max_rating_delta,
            },
        )
    }

    /// Picks the best opponent for `requester` from `pool`.
    ///
    /// Returns [`MatchOutcome::NoEligibleCandidate`] when nobody passes the filter, and
    /// [`MatchError::UnknownRequester`] when `requester` has no snapshot in the pool.
    pub fn find_opponent<'p, I>(
        &self,
        requester: &str,
        pool: I,
    ) -> Result<MatchOutcome, MatchError>
    where
        I: IntoIterator<Item = &'p PlayerFeatureSnapshot>,
    {
        let mut best: Option<MatchCandidate> = None;
        for candidate in self.scored_candidates(requester, pool)? {
            if best.as_ref().is_none_or(|b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }

        Ok(match best {
            Some(candidate) => {
                log::info!(
                    "matched {requester} with {} (score {:.4})",
                    candidate.username,
                    candidate.score
                );
                MatchOutcome::Matched(candidate)
            }
            None => {
                log::info!("no eligible opponent for {requester}");
                MatchOutcome::NoEligibleCandidate
            }
        })
    }

    /// Every eligible opponent for `requester`, best first.
    ///
    /// Equal scores keep pool order, so the first entry is the one
    /// [`find_opponent`](Self::find_opponent) picks.
    pub fn rank_candidates<'p, I>(
        &self,
        requester: &str,
        pool: I,
    ) -> Result<Vec<MatchCandidate>, MatchError>
    where
        I: IntoIterator<Item = &'p PlayerFeatureSnapshot>,
    {
        let mut ranked = self.scored_candidates(requester, pool)?;
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(ranked)
    }

    fn scored_candidates<'p, I>(
        &self,
        requester: &str,
        pool: I,
    ) -> Result<Vec<MatchCandidate>, MatchError>
    where
        I: IntoIterator<Item = &'p PlayerFeatureSnapshot>,
    {
        let pool: Vec<&PlayerFeatureSnapshot> = pool.into_iter().collect();
        let key = canonical_username(requester);
        let is_requester = |s: &PlayerFeatureSnapshot| canonical_username(&s.username) == key;
        let Some(me) = pool.iter().find(|&&s| is_requester(s)) else {
            return Err(MatchError::UnknownRequester {
                username: requester.to_owned(),
            });
        };
        let me = &me.features;

        let mut scored = vec![];
        for candidate in pool.iter().filter(|&&s| !is_requester(s)) {
            if let Err(reason) = self.filter.check(me, &candidate.features) {
                log::debug!("{} ineligible for {requester}: {reason}", candidate.username);
                continue;
            }
            let sub_scores = SubScores::compute(me, &candidate.features);
            let score = self.scorer.score(me, &candidate.features);
            log::debug!(
                "{requester} vs {}: score={score:.4} rating={:.4} streak={:.4} time={:.4} style={:.4}",
                candidate.username,
                sub_scores.rating,
                sub_scores.streak,
                sub_scores.time,
                sub_scores.style,
            );
            scored.push(MatchCandidate {
                username: candidate.username.clone(),
                score,
                sub_scores,
                snapshot: (*candidate).clone(),
            });
        }
        Ok(scored)
    }
}
