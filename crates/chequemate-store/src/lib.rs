//! Feature Store Adapter.
//!
//! The matchmaking core sees storage only through [`FeatureStore`]:
//!
//! - [`FeatureStore::save`] upserts one player's features, keyed by the
//!   [canonical username](chequemate_history::canonical_username), and stamps the snapshot's
//!   `last_updated` time. Saving twice, in any letter case, leaves a single entry holding
//!   the latest values.
//! - [`FeatureStore::load_all`] returns an owned copy of the whole table. Matchmaking runs
//!   against that copy, so saves made meanwhile are never partially visible.
//!
//! Each save is atomic for its username; nothing is promised about ordering across
//! usernames.
//!
//! Two implementations are provided:
//!
//! - [`MemoryFeatureStore`] - a mutex-guarded map, for tests and single-process use
//! - [`JsonFeatureStore`] - one JSON file, replaced atomically on every save
//!
//! # Example
//!
//! ```
//! use chequemate_features::PlayerFeatures;
//! use chequemate_store::{FeatureStore, MemoryFeatureStore};
//!
//! let store = MemoryFeatureStore::new();
//! let features = PlayerFeatures { rating: 1500, ..PlayerFeatures::default() };
//! store.save("alice", &features).unwrap();
//! store.save("alice", &PlayerFeatures { rating: 1520, ..features }).unwrap();
//!
//! let all = store.load_all().unwrap();
//! assert_eq!(all.len(), 1);
//! assert_eq!(all["alice"].rating(), 1520);
//! ```

use std::{collections::BTreeMap, fmt, io, path::PathBuf};

use chequemate_features::{PlayerFeatureSnapshot, PlayerFeatures};

pub use self::{json_file::JsonFeatureStore, memory::MemoryFeatureStore};

mod json_file;
mod memory;

/// All stored snapshots, keyed by canonical username.
pub type SnapshotTable = BTreeMap<String, PlayerFeatureSnapshot>;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("failed to access feature store {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse feature store {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("failed to serialize feature store {}", path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub trait FeatureStore: fmt::Debug + Send + Sync {
    /// Inserts or replaces the snapshot of `username` and returns what was stored.
    ///
    /// Both the key and the stored snapshot use the canonical form of `username`.
    fn save(
        &self,
        username: &str,
        features: &PlayerFeatures,
    ) -> Result<PlayerFeatureSnapshot, StoreError>;

    /// Loads every stored snapshot.
    fn load_all(&self) -> Result<SnapshotTable, StoreError>;
}
