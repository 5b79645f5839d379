use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use chequemate_features::{PlayerFeatureSnapshot, PlayerFeatures};
use chequemate_history::canonical_username;
use chrono::Utc;

use crate::{FeatureStore, SnapshotTable, StoreError};

/// Feature store kept in a single JSON file.
///
/// The file holds one object mapping usernames to snapshots. A save reads the table,
/// upserts the entry, writes the result to a sibling file named after the store with
/// `.tmp` appended and renames it over the existing file, so an interrupted save leaves the previous table intact. A missing file is
/// an empty table.
///
/// Saves made through one instance are serialized; separate processes writing the same
/// file concurrently are not coordinated.
#[derive(Debug)]
pub struct JsonFeatureStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFeatureStore {
    #[must_use]
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `features.json` -> `features.json.tmp`, never the store's own path.
    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_table(&self) -> Result<SnapshotTable, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SnapshotTable::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_table(&self, table: &SnapshotTable) -> Result<(), StoreError> {
        let tmp_path = self.tmp_path();
        let result = self.write_tmp(&tmp_path, table).and_then(|()| {
            fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
        });
        if result.is_err() {
            // best effort; the existing file is untouched either way
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }

    fn write_tmp(&self, tmp_path: &Path, table: &SnapshotTable) -> Result<(), StoreError> {
        let file = File::create(tmp_path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, table).map_err(|source| {
            StoreError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        writeln!(writer).map_err(|e| self.io_error(e))?;
        let file = writer
            .into_inner()
            .map_err(|e| self.io_error(e.into_error()))?;
        file.sync_all().map_err(|e| self.io_error(e))
    }
}

impl FeatureStore for JsonFeatureStore {
    fn save(
        &self,
        username: &str,
        features: &PlayerFeatures,
    ) -> Result<PlayerFeatureSnapshot, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut table = self.read_table()?;
        let key = canonical_username(username);
        let snapshot = PlayerFeatureSnapshot::new(key.clone(), features.clone(), Utc::now());
        table.insert(key, snapshot.clone());
        self.write_table(&table)?;
        log::debug!(
            "saved features of {username} to {} ({} players)",
            self.path.display(),
            table.len()
        );
        Ok(snapshot)
    }

    fn load_all(&self) -> Result<SnapshotTable, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.read_table()
    }
}

#[cfg(test)]
mod tests {
    use chequemate_features::StyleVector;

    use super::*;

    fn features(rating: u32) -> PlayerFeatures {
        let mut counts = vec![0; 500];
        counts[42] = 3;
        counts[300] = 1;
        PlayerFeatures {
            rating,
            streak: 3,
            time_preference: [("600", 0.5), ("180+2", 0.5)].into_iter().collect(),
            style_vector: StyleVector::from_counts(&counts),
        }
    }

    #[test]
    fn test_missing_file_is_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFeatureStore::new(dir.path().join("features.json"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.json");

        let store = JsonFeatureStore::new(&path);
        store.save("alice", &features(1500)).unwrap();
        store.save("bob", &features(1400)).unwrap();
        let latest = store.save("alice", &features(1525)).unwrap();

        let reopened = JsonFeatureStore::new(&path);
        let all = reopened.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["alice"], latest);
        assert_eq!(all["alice"].rating(), 1525);
        assert_eq!(all["bob"].rating(), 1400);
        assert_eq!(all["alice"].style_vector(), &features(0).style_vector);
        assert!(!dir.path().join("features.json.tmp").exists());
    }

    #[test]
    fn test_username_case_maps_to_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.json");
        let store = JsonFeatureStore::new(&path);
        store.save("Alice", &features(1500)).unwrap();
        store.save("alice", &features(1510)).unwrap();

        let all = JsonFeatureStore::new(&path).load_all().unwrap();
        assert_eq!(all.keys().collect::<Vec<_>>(), ["alice"]);
        assert_eq!(all["alice"].username, "alice");
        assert_eq!(all["alice"].rating(), 1510);
    }

    #[test]
    fn test_store_path_ending_in_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.tmp");
        let store = JsonFeatureStore::new(&path);
        store.save("alice", &features(1500)).unwrap();
        store.save("bob", &features(1400)).unwrap();

        assert!(!dir.path().join("features.tmp.tmp").exists());
        let all = JsonFeatureStore::new(&path).load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all["alice"].rating(), 1500);
        assert_eq!(all["bob"].rating(), 1400);
    }

    #[test]
    fn test_corrupt_file_is_parse_error_and_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFeatureStore::new(&path);
        assert!(matches!(store.load_all(), Err(StoreError::Parse { .. })));
        assert!(matches!(
            store.save("alice", &features(1500)),
            Err(StoreError::Parse { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_failed_write_keeps_previous_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.json");
        let store = JsonFeatureStore::new(&path);
        store.save("alice", &features(1500)).unwrap();

        // a directory where the temporary file should go makes the write fail
        fs::create_dir(dir.path().join("features.json.tmp")).unwrap();
        assert!(matches!(
            store.save("alice", &features(1600)),
            Err(StoreError::Io { .. })
        ));
        assert_eq!(store.load_all().unwrap()["alice"].rating(), 1500);
    }
}
