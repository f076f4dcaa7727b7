use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::model::{GameSize, GameStatistics};

/// Durable storage for per-size statistics records.
pub trait StatsBackend: Send + Sync {
    /// `Ok(None)` when nothing was ever stored for `size`.
    fn load(&self, size: GameSize) -> Result<Option<GameStatistics>, StorageError>;

    fn save(&self, size: GameSize, stats: &GameStatistics) -> Result<(), StorageError>;

    fn remove(&self, size: GameSize) -> Result<(), StorageError>;
}

impl<T: StatsBackend + ?Sized> StatsBackend for Arc<T> {
    fn load(&self, size: GameSize) -> Result<Option<GameStatistics>, StorageError> {
        (**self).load(size)
    }

    fn save(&self, size: GameSize, stats: &GameStatistics) -> Result<(), StorageError> {
        (**self).save(size, stats)
    }

    fn remove(&self, size: GameSize) -> Result<(), StorageError> {
        (**self).remove(size)
    }
}

/// One pretty-printed JSON file per size inside `data_dir`.
#[derive(Debug)]
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)?;
        }
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn stats_path(&self, size: GameSize) -> PathBuf {
        self.data_dir.join(format!("game_statistics_{}.json", size))
    }
}

impl StatsBackend for JsonFileBackend {
    fn load(&self, size: GameSize) -> Result<Option<GameStatistics>, StorageError> {
        let path = self.stats_path(size);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                warn!(target: "stats", "Failed to read {}: {}", path.display(), err);
                return Err(err.into());
            }
        };
        let stats = serde_json::from_str(&contents)?;
        Ok(Some(stats))
    }

    fn save(&self, size: GameSize, stats: &GameStatistics) -> Result<(), StorageError> {
        let path = self.stats_path(size);
        let tmp_path = path.with_extension("json.tmp");
        let contents = serde_json::to_string_pretty(stats)?;

        // rename is atomic, so a reader of the file never sees half a record
        let written = fs::write(&tmp_path, contents).and_then(|_| fs::rename(&tmp_path, &path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_path);
            warn!(target: "stats", "Failed to write {}: {}", path.display(), err);
            return Err(err.into());
        }
        debug!(target: "stats", "Saved statistics to {}", path.display());
        Ok(())
    }

    fn remove(&self, size: GameSize) -> Result<(), StorageError> {
        match fs::remove_file(self.stats_path(size)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Keeps records in process memory only.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Mutex<HashMap<GameSize, GameStatistics>>,
    reject_writes: Mutex<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save`/`remove` fail until turned off again.
    pub fn set_reject_writes(&self, reject: bool) {
        if let Ok(mut flag) = self.reject_writes.lock() {
            *flag = reject;
        }
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        let rejecting = *self.reject_writes.lock().map_err(|_| StorageError::Poisoned)?;
        if rejecting {
            Err(StorageError::WriteRejected("memory backend is read-only".into()))
        } else {
            Ok(())
        }
    }
}

impl StatsBackend for MemoryBackend {
    fn load(&self, size: GameSize) -> Result<Option<GameStatistics>, StorageError> {
        let records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(records.get(&size).cloned())
    }

    fn save(&self, size: GameSize, stats: &GameStatistics) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        records.insert(size, stats.clone());
        Ok(())
    }

    fn remove(&self, size: GameSize) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        records.remove(&size);
        Ok(())
    }
}
