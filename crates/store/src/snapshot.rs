//! JSON snapshot file handling

use pulsekit_core::{Error, Result, ResultExt};
use pulsekit_data::WatchReading;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the snapshot inside the store directory
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// File-backed store for the local reading history
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at the given directory, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(Error::from)
            .context(format!("While creating snapshot directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Create a store in the platform data directory
    pub fn default_store() -> Result<Self> {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".pulsekit"))
            .join("pulsekit");
        Self::new(dir)
    }

    /// Directory this store writes into
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    /// Replace the stored history with the given readings
    ///
    /// Writes to a temporary file first so a crash mid-write never leaves
    /// a truncated snapshot behind.
    pub fn save(&self, readings: &[WatchReading]) -> Result<()> {
        let json = serde_json::to_vec_pretty(readings)?;
        let tmp = self.dir.join(format!("{SNAPSHOT_FILE}.tmp"));
        fs::write(&tmp, &json)
            .map_err(Error::from)
            .context("While writing snapshot temp file")?;
        fs::rename(&tmp, self.snapshot_path())
            .map_err(Error::from)
            .context("While replacing snapshot file")?;

        debug!(count = readings.len(), path = %self.snapshot_path().display(), "snapshot saved");
        Ok(())
    }

    /// Load the stored history
    ///
    /// A missing file is first launch and a damaged file is treated the
    /// same way: both return an empty history, with a warning for the
    /// damaged case so corruption is diagnosable.
    #[must_use]
    pub fn load(&self) -> Vec<WatchReading> {
        let path = self.snapshot_path();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "snapshot unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(readings) => readings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "snapshot corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Append one reading to the stored history
    pub fn append(&self, reading: WatchReading) -> Result<()> {
        let mut history = self.load();
        history.push(reading);
        self.save(&history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(ts: i64) -> WatchReading {
        WatchReading::new(ts, 72, 97.5, 36.6, 40)
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();

        store.save(&[reading(1), reading(2)]).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].timestamp_ms, 2);
    }

    #[test]
    fn test_missing_snapshot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();
        fs::write(dir.path().join(SNAPSHOT_FILE), "{ not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_grows_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();

        store.append(reading(1)).unwrap();
        store.append(reading(2)).unwrap();
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();
        store.save(&[reading(1)]).unwrap();
        assert!(!dir.path().join(format!("{SNAPSHOT_FILE}.tmp")).exists());
    }
}
