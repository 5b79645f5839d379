//! Player feature extraction for Chequemate.
//!
//! This crate turns a player's recent games into a fixed, comparable feature snapshot.
//!
//! # Pipeline
//!
//! ```text
//! Vec<RawGame> (provider order: oldest first)
//!     ↓ GameWindow::from_raw_games    (normalize, exclude bad games, reverse)
//! GameWindow (most recent first)
//!     ↓ FeatureExtractor::extract     (four independent feature groups)
//! PlayerFeatures
//!     ↓ FeatureStore::save            (chequemate-store, stamps last_updated)
//! PlayerFeatureSnapshot
//! ```
//!
//! # Feature Groups
//!
//! See the [`feature`] module for the definition of each group:
//!
//! - **Rating** - own rating in the most recent game
//! - **Streak** - signed run of wins (+) or losses (-), stopped by the first draw
//! - **Time preference** - fraction of games per time-control label
//! - **Style vector** - normalized histogram over the 500 opening codes
//!
//! The [`profile`] module summarizes the same window for people rather than for the
//! matchmaker (coverage, family shares, favorite openings).
//!
//! # Example
//!
//! ```
//! use chequemate_features::{FeatureExtractor, GameWindow, extractor::ExtractorConfig};
//! use chequemate_history::{GameRecord, GameResult, PlayerColor};
//!
//! let game = |result, time_control: &str| GameRecord {
//!     color: PlayerColor::White,
//!     own_rating: 1500,
//!     opponent_rating: 1480,
//!     result,
//!     time_control: time_control.to_owned(),
//!     opening: "C50".parse().ok(),
//! };
//! let window = GameWindow::from_most_recent_first(vec![
//!     game(GameResult::Win, "600"),
//!     game(GameResult::Win, "180"),
//!     game(GameResult::DrawOrOther, "600"),
//! ]);
//!
//! let extractor = FeatureExtractor::new(ExtractorConfig::default());
//! let features = extractor.extract("alice", &window).unwrap();
//! assert_eq!(features.rating, 1500);
//! assert_eq!(features.streak, 2);
//! ```

pub use self::{
    extractor::FeatureExtractor,
    snapshot::{PlayerFeatureSnapshot, PlayerFeatures, StyleVector, TimePreference},
    window::GameWindow,
};

pub mod extractor;
pub mod feature;
pub mod profile;
pub mod snapshot;
pub mod window;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ExtractError {
    #[display("player '{username}' has no games in the history window")]
    NoHistory { username: String },
}
