//! Opponent matching for chequemate.
//!
//! This crate turns a table of stored feature snapshots into an opponent choice for one
//! requesting player.
//!
//! # Architecture
//!
//! ```text
//! pool of snapshots ──► EligibilityFilter ──► OpponentScorer ──► Matchmaker
//!                       (hard constraints)    (soft preference)  (argmax / ranking)
//! ```
//!
//! - [`eligibility`] - rating window and shared time control
//! - [`scoring`] - the four sub-scores and the [`OpponentScorer`] seam
//! - [`matchmaker`] - requester lookup, filtering and selection
//!
//! # Example
//!
//! ```
//! use chequemate_features::{PlayerFeatureSnapshot, PlayerFeatures};
//! use chequemate_matcher::{MatchOutcome, Matchmaker};
//! use chrono::Utc;
//!
//! let player = |name: &str, rating| {
//!     let features = PlayerFeatures {
//!         rating,
//!         time_preference: [("600", 1.0)].into_iter().collect(),
//!         ..PlayerFeatures::default()
//!     };
//!     PlayerFeatureSnapshot::new(name.to_owned(), features, Utc::now())
//! };
//! let pool = [player("me", 1500), player("close", 1510), player("far", 1790)];
//!
//! let outcome = Matchmaker::default().find_opponent("me", &pool).unwrap();
//! let MatchOutcome::Matched(opponent) = outcome else { panic!() };
//! assert_eq!(opponent.username, "close");
//! ```

pub use self::{
    eligibility::EligibilityFilter,
    matchmaker::{MatchCandidate, MatchError, MatchOutcome, Matchmaker, MatchmakerConfig},
    scoring::{
        InvalidWeightError, OpponentScorer, ScoringWeights, SubScores, WeightedOpponentScorer,
    },
};

pub mod eligibility;
pub mod matchmaker;
pub mod scoring;
