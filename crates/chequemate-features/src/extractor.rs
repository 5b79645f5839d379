//! Feature Extractor: combines the four feature groups into [`PlayerFeatures`].

use serde::{Deserialize, Serialize};

use crate::{
    ExtractError, GameWindow, PlayerFeatures,
    feature::{self, streak::DEFAULT_STREAK_LOOKBACK},
};

/// Rating substituted for players without games when a fallback is configured.
pub const DEFAULT_FALLBACK_RATING: u32 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum number of recent games scanned for the streak.
    pub streak_lookback: usize,
    /// Rating used for an empty window. `None` makes an empty window an error.
    pub fallback_rating: Option<u32>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            streak_lookback: DEFAULT_STREAK_LOOKBACK,
            fallback_rating: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: ExtractorConfig,
}

impl FeatureExtractor {
    #[must_use]
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts all feature groups for `username` from `window`.
    ///
    /// Fails with [`ExtractError::NoHistory`] when the window is empty and no fallback
    /// rating is configured. With a fallback, an empty window yields the fallback rating,
    /// a zero streak, an empty time preference and a zero style vector.
    pub fn extract(
        &self,
        username: &str,
        window: &GameWindow,
    ) -> Result<PlayerFeatures, ExtractError> {
        let rating = match (feature::current_rating(window), self.config.fallback_rating) {
            (Some(rating), _) => rating,
            (None, Some(fallback)) => {
                log::warn!("{username} has no games, using fallback rating {fallback}");
                fallback
            }
            (None, None) => {
                return Err(ExtractError::NoHistory {
                    username: username.to_owned(),
                });
            }
        };

        let features = PlayerFeatures {
            rating,
            streak: feature::streak(window, self.config.streak_lookback),
            time_preference: feature::time_preference(window),
            style_vector: feature::style_vector(window),
        };
        log::debug!(
            "extracted features for {username}: rating={} streak={} time_controls={} games={}",
            features.rating,
            features.streak,
            features.time_preference.len(),
            window.len(),
        );
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use chequemate_history::{GameRecord, GameResult, PlayerColor};

    use super::*;

    fn game(result: GameResult, own_rating: u32, time_control: &str, opening: &str) -> GameRecord {
        GameRecord {
            color: PlayerColor::White,
            own_rating,
            opponent_rating: 1500,
            result,
            time_control: time_control.to_owned(),
            opening: opening.parse().ok(),
        }
    }

    #[test]
    fn test_extract_all_groups() {
        let window = GameWindow::from_most_recent_first(vec![
            game(GameResult::Win, 1520, "600", "C50"),
            game(GameResult::Win, 1510, "600", "C50"),
            game(GameResult::DrawOrOther, 1505, "180", ""),
            game(GameResult::Checkmated, 1500, "600", "B01"),
        ]);
        let features = FeatureExtractor::default().extract("p", &window).unwrap();

        assert_eq!(features.rating, 1520);
        assert_eq!(features.streak, 2);
        assert_eq!(features.time_preference.get("600"), 0.75);
        assert_eq!(features.time_preference.get("180"), 0.25);
        assert!((features.style_vector.sum() - 1.0).abs() < 1e-12);
        assert!((features.style_vector.get("C50".parse().unwrap()) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_streak_lookback_from_config() {
        let window = GameWindow::from_most_recent_first(vec![
            game(GameResult::Timeout, 1500, "60", "A00");
            12
        ]);
        let extractor = FeatureExtractor::new(ExtractorConfig {
            streak_lookback: 5,
            fallback_rating: None,
        });
        assert_eq!(extractor.extract("p", &window).unwrap().streak, -5);
        assert_eq!(
            FeatureExtractor::default()
                .extract("p", &window)
                .unwrap()
                .streak,
            -10
        );
    }

    #[test]
    fn test_empty_window_without_fallback() {
        let err = FeatureExtractor::default()
            .extract("ghost", &GameWindow::default())
            .unwrap_err();
        assert_eq!(
            err,
            ExtractError::NoHistory {
                username: "ghost".to_owned()
            }
        );
    }

    #[test]
    fn test_empty_window_with_fallback() {
        let extractor = FeatureExtractor::new(ExtractorConfig {
            fallback_rating: Some(DEFAULT_FALLBACK_RATING),
            ..ExtractorConfig::default()
        });
        let features = extractor.extract("ghost", &GameWindow::default()).unwrap();
        assert_eq!(features.rating, 1200);
        assert_eq!(features.streak, 0);
        assert!(features.time_preference.is_empty());
        assert!(features.style_vector.is_zero());
    }
}
