use std::sync::{Mutex, PoisonError};

use chequemate_features::{PlayerFeatureSnapshot, PlayerFeatures};
use chequemate_history::canonical_username;
use chrono::Utc;

use crate::{FeatureStore, SnapshotTable, StoreError};

#[derive(Debug, Default)]
pub struct MemoryFeatureStore {
    table: Mutex<SnapshotTable>,
}

impl MemoryFeatureStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeatureStore for MemoryFeatureStore {
    fn save(
        &self,
        username: &str,
        features: &PlayerFeatures,
    ) -> Result<PlayerFeatureSnapshot, StoreError> {
        let key = canonical_username(username);
        let snapshot = PlayerFeatureSnapshot::new(key.clone(), features.clone(), Utc::now());
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, snapshot.clone());
        Ok(snapshot)
    }

    fn load_all(&self) -> Result<SnapshotTable, StoreError> {
        Ok(self
            .table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
