use std::path::Path;

use anyhow::Context;

use chequemate_features::extractor::{DEFAULT_FALLBACK_RATING, ExtractorConfig};
use chequemate_matcher::{MatchmakerConfig, ScoringWeights, eligibility::DEFAULT_MAX_RATING_DELTA};
use serde::{Deserialize, Serialize};

use crate::util;

pub const DEFAULT_HISTORY_MONTHS: usize = 3;
pub const DEFAULT_REFRESH_JOBS: usize = 4;

/// Settings read from the `--config` file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Archive periods fetched per player.
    pub history_months: usize,
    pub streak_lookback: usize,
    /// `null` makes players without games fail to refresh.
    pub fallback_rating: Option<u32>,
    pub max_rating_delta: u32,
    pub weights: ScoringWeights,
    pub refresh_jobs: usize,
    /// Players refreshed when `refresh` is given no usernames.
    pub players: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let extractor = ExtractorConfig::default();
        Self {
            history_months: DEFAULT_HISTORY_MONTHS,
            streak_lookback: extractor.streak_lookback,
            fallback_rating: Some(DEFAULT_FALLBACK_RATING),
            max_rating_delta: DEFAULT_MAX_RATING_DELTA,
            weights: ScoringWeights::default(),
            refresh_jobs: DEFAULT_REFRESH_JOBS,
            players: vec![],
        }
    }
}

impl Config {
    /// Loads the config file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let config: Self = util::read_json_file("config", path)?;
        config
            .weights
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        log::debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    #[must_use]
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            streak_lookback: self.streak_lookback,
            fallback_rating: self.fallback_rating,
        }
    }

    #[must_use]
    pub fn matchmaker_config(&self) -> MatchmakerConfig {
        MatchmakerConfig {
            max_rating_delta: self.max_rating_delta,
            weights: self.weights,
        }
    }
}
