//! Refresh pipeline: history provider → normalizer → extractor → store.

use std::{
    panic,
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use chequemate_features::{ExtractError, FeatureExtractor, GameWindow};
use chequemate_history::{HistoryProvider, ProviderError};
use chequemate_store::{FeatureStore, StoreError};
use serde::Serialize;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RefreshError {
    #[display("failed to fetch match history of {username}")]
    History {
        username: String,
        source: ProviderError,
    },
    #[display("failed to extract features of {username}")]
    Extract {
        username: String,
        source: ExtractError,
    },
    #[display("failed to store features of {username}")]
    Store {
        username: String,
        source: StoreError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshedPlayer {
    pub username: String,
    pub games: usize,
    pub excluded_games: usize,
    pub rating: u32,
    pub streak: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedRefresh {
    pub username: String,
    pub error: String,
}

/// Outcome of refreshing a list of players, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefreshSummary {
    pub refreshed: Vec<RefreshedPlayer>,
    pub failed: Vec<FailedRefresh>,
}

#[derive(Debug)]
pub struct RefreshPipeline<'a> {
    provider: &'a dyn HistoryProvider,
    store: &'a dyn FeatureStore,
    extractor: FeatureExtractor,
    history_months: usize,
}

impl<'a> RefreshPipeline<'a> {
    #[must_use]
    pub fn new(
        provider: &'a dyn HistoryProvider,
        store: &'a dyn FeatureStore,
        extractor: FeatureExtractor,
        history_months: usize,
    ) -> Self {
        Self {
            provider,
            store,
            extractor,
            history_months,
        }
    }

    /// Fetches, normalizes, extracts and saves one player.
    pub fn refresh_player(&self, username: &str) -> Result<RefreshedPlayer, RefreshError> {
        let raw = self
            .provider
            .recent_games(username, self.history_months)
            .map_err(|source| RefreshError::History {
                username: username.to_owned(),
                source,
            })?;
        let (window, excluded) = GameWindow::from_raw_games(username, &raw);
        let features =
            self.extractor
                .extract(username, &window)
                .map_err(|source| RefreshError::Extract {
                    username: username.to_owned(),
                    source,
                })?;
        let snapshot = self
            .store
            .save(username, &features)
            .map_err(|source| RefreshError::Store {
                username: username.to_owned(),
                source,
            })?;

        log::info!(
            "refreshed {username}: {} games ({} excluded), rating {}, streak {}",
            window.len(),
            excluded.len(),
            snapshot.rating(),
            snapshot.streak()
        );
        Ok(RefreshedPlayer {
            username: username.to_owned(),
            games: window.len(),
            excluded_games: excluded.len(),
            rating: snapshot.rating(),
            streak: snapshot.streak(),
        })
    }

    /// Refreshes every player using up to `jobs` worker threads.
    ///
    /// A failure is recorded in the summary and does not stop the other players.
    #[must_use]
    pub fn refresh_all(&self, usernames: &[String], jobs: usize) -> RefreshSummary {
        let jobs = jobs.clamp(1, usernames.len().max(1));
        log::info!("refreshing {} players with {jobs} workers", usernames.len());

        let next = AtomicUsize::new(0);
        let mut results = thread::scope(|s| {
            let mut workers = Vec::with_capacity(jobs);
            for _ in 0..jobs {
                workers.push(s.spawn(|| {
                    let mut done = vec![];
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(username) = usernames.get(index) else {
                            break done;
                        };
                        done.push((index, self.refresh_player(username)));
                    }
                }));
            }
            workers
                .into_iter()
                .flat_map(|worker| worker.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect::<Vec<_>>()
        });
        results.sort_by_key(|(index, _)| *index);

        let mut summary = RefreshSummary::default();
        for (_, result) in results {
            match result {
                Ok(player) => summary.refreshed.push(player),
                Err(e) => {
                    let username = e.username().to_owned();
                    let error = format!("{:#}", anyhow::Error::new(e));
                    log::warn!("{error}");
                    summary.failed.push(FailedRefresh { username, error });
                }
            }
        }
        summary
    }
}

impl RefreshError {
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::History { username, .. }
            | Self::Extract { username, .. }
            | Self::Store { username, .. } => username,
        }
    }
}

#[cfg(test)]
mod tests {
    use chequemate_features::extractor::ExtractorConfig;
    use chequemate_history::{MemoryHistoryProvider, RawArchive, RawGame, RawPlayerSide};
    use chequemate_matcher::Matchmaker;
    use chequemate_store::MemoryFeatureStore;

    use super::*;

    fn side(username: &str, rating: u32, result: &str) -> Option<RawPlayerSide> {
        Some(RawPlayerSide {
            username: Some(username.to_owned()),
            rating: Some(rating),
            result: Some(result.to_owned()),
        })
    }

    fn game(white: &str, black: &str, white_result: &str, rating: u32) -> RawGame {
        let black_result = if white_result == "win" { "resigned" } else { "win" };
        RawGame {
            url: None,
            pgn: Some("[ECO \"C50\"]\n1. e4 e5".to_owned()),
            time_control: Some("600".to_owned()),
            end_time: None,
            white: side(white, rating, white_result),
            black: side(black, rating, black_result),
        }
    }

    fn provider() -> MemoryHistoryProvider {
        let mut provider = MemoryHistoryProvider::new();
        provider.push_archive(
            "alice",
            RawArchive {
                games: vec![
                    game("alice", "bob", "win", 1500),
                    game("alice", "carol", "win", 1510),
                ],
            },
        );
        provider.push_archive(
            "bob",
            RawArchive {
                games: vec![
                    game("alice", "bob", "win", 1400),
                    // names neither player: excluded
                    game("dave", "erin", "win", 1400),
                ],
            },
        );
        provider.push_archive("ghost", RawArchive::default());
        provider
    }

    #[test]
    fn test_refresh_player() {
        let provider = provider();
        let store = MemoryFeatureStore::new();
        let pipeline = RefreshPipeline::new(&provider, &store, FeatureExtractor::default(), 3);

        let alice = pipeline.refresh_player("alice").unwrap();
        assert_eq!(alice.games, 2);
        assert_eq!(alice.excluded_games, 0);
        assert_eq!(alice.rating, 1510);
        assert_eq!(alice.streak, 2);

        let bob = pipeline.refresh_player("bob").unwrap();
        assert_eq!(bob.games, 1);
        assert_eq!(bob.excluded_games, 1);
        assert_eq!(bob.streak, -1);

        let table = store.load_all().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["alice"].time_preference().get("600"), 1.0);
    }

    #[test]
    fn test_refresh_player_username_case() {
        let provider = provider();
        let store = MemoryFeatureStore::new();
        let pipeline = RefreshPipeline::new(&provider, &store, FeatureExtractor::default(), 3);

        pipeline.refresh_player("Alice").unwrap();
        pipeline.refresh_player("alice").unwrap();
        pipeline.refresh_player("bob").unwrap();

        let table = store.load_all().unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), ["alice", "bob"]);
        let outcome = Matchmaker::default()
            .find_opponent("ALICE", table.values())
            .unwrap();
        assert_eq!(outcome.candidate().unwrap().username, "bob");
    }

    #[test]
    fn test_refresh_player_errors() {
        let provider = provider();
        let store = MemoryFeatureStore::new();
        let pipeline = RefreshPipeline::new(&provider, &store, FeatureExtractor::default(), 3);

        assert!(matches!(
            pipeline.refresh_player("nobody"),
            Err(RefreshError::History { .. })
        ));
        assert!(matches!(
            pipeline.refresh_player("ghost"),
            Err(RefreshError::Extract { .. })
        ));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_fallback_rating_for_empty_history() {
        let provider = provider();
        let store = MemoryFeatureStore::new();
        let extractor = FeatureExtractor::new(ExtractorConfig {
            fallback_rating: Some(1200),
            ..ExtractorConfig::default()
        });
        let pipeline = RefreshPipeline::new(&provider, &store, extractor, 3);
        assert_eq!(pipeline.refresh_player("ghost").unwrap().rating, 1200);
    }

    #[test]
    fn test_refresh_all_keeps_input_order() {
        let provider = provider();
        let store = MemoryFeatureStore::new();
        let pipeline = RefreshPipeline::new(&provider, &store, FeatureExtractor::default(), 3);
        let usernames: Vec<String> = ["bob", "nobody", "alice", "ghost"]
            .map(str::to_owned)
            .to_vec();

        for jobs in [1, 2, 8] {
            let summary = pipeline.refresh_all(&usernames, jobs);
            let refreshed: Vec<_> = summary
                .refreshed
                .iter()
                .map(|p| p.username.as_str())
                .collect();
            let failed: Vec<_> = summary
                .failed
                .iter()
                .map(|f| f.username.as_str())
                .collect();
            assert_eq!(refreshed, ["bob", "alice"]);
            assert_eq!(failed, ["nobody", "ghost"]);
            assert!(summary.failed[0].error.contains("no archives found"));
        }
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn test_refresh_all_empty() {
        let provider = provider();
        let store = MemoryFeatureStore::new();
        let pipeline = RefreshPipeline::new(&provider, &store, FeatureExtractor::default(), 3);
        assert_eq!(pipeline.refresh_all(&[], 4), RefreshSummary::default());
    }
}
