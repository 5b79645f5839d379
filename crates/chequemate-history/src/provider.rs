//! Match history providers.
//!
//! A [`HistoryProvider`] returns a player's raw games for the most recent archive
//! periods, oldest period first with the newest period appended last. Within a period
//! games keep the provider's (chronological) order, so the final element is the
//! player's most recent game.
//!
//! Fetching over HTTP is left to external tooling; this module provides a provider
//! reading downloaded archives from disk ([`ArchiveDirProvider`]) and one serving games
//! from memory ([`MemoryHistoryProvider`]).

use std::{
    collections::HashMap,
    fmt, fs,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use crate::{RawArchive, RawGame, canonical_username};

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ProviderError {
    #[display("no archives found for player '{username}'")]
    UnknownPlayer { username: String },
    #[display("failed to read archive {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse archive {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub trait HistoryProvider: fmt::Debug + Send + Sync {
    /// Returns the raw games of the last `months` archive periods for `username`.
    fn recent_games(&self, username: &str, months: usize) -> Result<Vec<RawGame>, ProviderError>;
}

/// Reads monthly archives from a directory tree.
///
/// Layout:
///
/// ```text
/// <root>/
/// └─ <username, lowercase>/
///    ├─ 2024-01.json
///    ├─ 2024-02.json
///    └─ 2024-03.json
/// ```
///
/// Each file holds one [`RawArchive`]. Files are ordered by name, so names must sort
/// chronologically (`YYYY-MM.json` does).
#[derive(Debug, Clone)]
pub struct ArchiveDirProvider {
    root: PathBuf,
}

impl ArchiveDirProvider {
    #[must_use]
    pub fn new<P>(root: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn player_dir(&self, username: &str) -> PathBuf {
        self.root.join(canonical_username(username))
    }

    fn archive_paths(&self, username: &str) -> Result<Vec<PathBuf>, ProviderError> {
        let dir = self.player_dir(username);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ProviderError::UnknownPlayer {
                    username: username.to_owned(),
                });
            }
            Err(source) => return Err(ProviderError::Io { path: dir, source }),
        };

        let mut paths = vec![];
        for entry in entries {
            let entry = entry.map_err(|source| ProviderError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn read_archive(path: &Path) -> Result<RawArchive, ProviderError> {
        let file = File::open(path).map_err(|source| ProviderError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ProviderError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

impl HistoryProvider for ArchiveDirProvider {
    fn recent_games(&self, username: &str, months: usize) -> Result<Vec<RawGame>, ProviderError> {
        let paths = self.archive_paths(username)?;
        let recent = &paths[paths.len().saturating_sub(months)..];
        log::debug!(
            "reading {} of {} archives for {username}",
            recent.len(),
            paths.len()
        );

        let mut games = vec![];
        for path in recent {
            games.extend(Self::read_archive(path)?.games);
        }
        Ok(games)
    }
}

/// Serves archives kept in memory, keyed by lowercase username.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryProvider {
    archives: HashMap<String, Vec<RawArchive>>,
}

impl MemoryHistoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an archive period for `username`. Periods must be pushed oldest first.
    pub fn push_archive(&mut self, username: &str, archive: RawArchive) {
        self.archives
            .entry(canonical_username(username))
            .or_default()
            .push(archive);
    }
}

impl HistoryProvider for MemoryHistoryProvider {
    fn recent_games(&self, username: &str, months: usize) -> Result<Vec<RawGame>, ProviderError> {
        let archives = self
            .archives
            .get(&canonical_username(username))
            .ok_or_else(|| ProviderError::UnknownPlayer {
                username: username.to_owned(),
            })?;
        let recent = &archives[archives.len().saturating_sub(months)..];
        Ok(recent
            .iter()
            .flat_map(|archive| archive.games.iter().cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive_with_urls(urls: &[&str]) -> RawArchive {
        RawArchive {
            games: urls
                .iter()
                .map(|url| RawGame {
                    url: Some((*url).to_owned()),
                    ..RawGame::default()
                })
                .collect(),
        }
    }

    fn urls(games: &[RawGame]) -> Vec<&str> {
        games.iter().filter_map(|g| g.url.as_deref()).collect()
    }

    fn write_archive(dir: &Path, name: &str, archive: &RawArchive) {
        fs::write(dir.join(name), serde_json::to_string(archive).unwrap()).unwrap();
    }

    #[test]
    fn test_archive_dir_keeps_last_months_in_order() {
        let root = tempfile::tempdir().unwrap();
        let player = root.path().join("alice");
        fs::create_dir(&player).unwrap();
        write_archive(&player, "2024-03.json", &archive_with_urls(&["m3a", "m3b"]));
        write_archive(&player, "2024-01.json", &archive_with_urls(&["m1"]));
        write_archive(&player, "2024-02.json", &archive_with_urls(&["m2"]));
        fs::write(player.join("notes.txt"), "ignored").unwrap();

        let provider = ArchiveDirProvider::new(root.path());
        let games = provider.recent_games("Alice", 2).unwrap();
        assert_eq!(urls(&games), ["m2", "m3a", "m3b"]);

        let games = provider.recent_games("alice", 10).unwrap();
        assert_eq!(urls(&games), ["m1", "m2", "m3a", "m3b"]);
    }

    #[test]
    fn test_archive_dir_unknown_player() {
        let root = tempfile::tempdir().unwrap();
        let provider = ArchiveDirProvider::new(root.path());
        assert!(matches!(
            provider.recent_games("nobody", 3),
            Err(ProviderError::UnknownPlayer { .. })
        ));
    }

    #[test]
    fn test_archive_dir_parse_error() {
        let root = tempfile::tempdir().unwrap();
        let player = root.path().join("bob");
        fs::create_dir(&player).unwrap();
        fs::write(player.join("2024-01.json"), "{ not json").unwrap();

        let provider = ArchiveDirProvider::new(root.path());
        assert!(matches!(
            provider.recent_games("bob", 1),
            Err(ProviderError::Parse { .. })
        ));
    }

    #[test]
    fn test_memory_provider() {
        let mut provider = MemoryHistoryProvider::new();
        provider.push_archive("Carol", archive_with_urls(&["a"]));
        provider.push_archive("carol", archive_with_urls(&["b", "c"]));

        assert_eq!(urls(&provider.recent_games("CAROL", 1).unwrap()), ["b", "c"]);
        assert_eq!(urls(&provider.recent_games("carol", 5).unwrap()), ["a", "b", "c"]);
        assert!(provider.recent_games("dave", 1).is_err());
        assert!(provider.recent_games("carol", 0).unwrap().is_empty());
    }
}
