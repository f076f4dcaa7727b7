use chrono::NaiveDate;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::error::{StatsError, StorageError};
use crate::game::stats_backend::StatsBackend;
use crate::model::{ClearScope, GameSize, GameStatistics};

/// Owns every per-size statistics record and the backing that persists them.
///
/// Build one at start-up and share it behind an `Arc`. Mutations hold the
/// write lock across read-modify-persist, and the in-memory record is only
/// replaced once the backing has accepted the write.
pub struct StatsManager {
    backend: Box<dyn StatsBackend>,
    stats: RwLock<HashMap<GameSize, GameStatistics>>,
    default_clear_scope: ClearScope,
}

impl StatsManager {
    pub fn open(backend: impl StatsBackend + 'static) -> Result<Self, StatsError> {
        Self::open_with_scope(backend, ClearScope::default())
    }

    pub fn open_with_scope(
        backend: impl StatsBackend + 'static,
        default_clear_scope: ClearScope,
    ) -> Result<Self, StatsError> {
        let mut stats = HashMap::new();
        for size in GameSize::all() {
            if let Some(record) = backend.load(size)? {
                if !record.is_consistent() {
                    error!(target: "stats", "Refusing inconsistent statistics for size {}: {:?}", size, record);
                    return Err(StorageError::Corrupt(size).into());
                }
                debug!(target: "stats", "Loaded statistics for size {}: {:?}", size, record);
                stats.insert(size, record);
            }
        }

        Ok(Self {
            backend: Box::new(backend),
            stats: RwLock::new(stats),
            default_clear_scope,
        })
    }

    pub fn default_clear_scope(&self) -> ClearScope {
        self.default_clear_scope
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<GameSize, GameStatistics>>, StatsError> {
        self.stats
            .read()
            .map_err(|_| StatsError::Storage(StorageError::Poisoned))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<GameSize, GameStatistics>>, StatsError> {
        self.stats
            .write()
            .map_err(|_| StatsError::Storage(StorageError::Poisoned))
    }

    /// Statistics for a raw size value, zero-valued if nothing was recorded.
    pub fn get(&self, size: u32) -> Result<GameStatistics, StatsError> {
        self.statistics(GameSize::new(size)?)
    }

    pub fn statistics(&self, size: GameSize) -> Result<GameStatistics, StatsError> {
        Ok(self.read()?.get(&size).cloned().unwrap_or_default())
    }

    /// Applies `update` to a copy of the record and persists it, committing
    /// the copy only when the backing accepted it.
    fn mutate<T>(
        &self,
        size: GameSize,
        update: impl FnOnce(&mut GameStatistics) -> T,
    ) -> Result<T, StatsError> {
        let mut stats = self.write()?;
        let mut record = stats.get(&size).cloned().unwrap_or_default();
        let result = update(&mut record);

        if let Err(err) = self.backend.save(size, &record) {
            error!(target: "stats", "Failed to save statistics for size {}: {}", size, err);
            return Err(err.into());
        }
        stats.insert(size, record);
        Ok(result)
    }

    /// Records one finished attempt. Returns true when it set a new best time.
    pub fn record_result(
        &self,
        size: u32,
        won: bool,
        elapsed: Duration,
        completed_on: NaiveDate,
    ) -> Result<bool, StatsError> {
        let size = GameSize::new(size)?;
        let seconds = elapsed.as_secs();
        let is_new_best = self.mutate(size, |record| {
            record.record_started();
            won && record.record_won(seconds, completed_on)
        })?;

        debug!(
            target: "stats",
            "Recorded {} for size {} in {}s",
            if won { "win" } else { "loss" },
            size,
            seconds
        );
        if is_new_best {
            info!(target: "stats", "New best time for size {}: {}s", size, seconds);
        }
        Ok(is_new_best)
    }

    /// Counts a game as played the moment it starts.
    pub fn game_started(&self, size: GameSize) -> Result<(), StatsError> {
        self.mutate(size, |record| record.record_started())?;
        debug!(target: "stats", "Game started for size {}", size);
        Ok(())
    }

    /// Records the win of a game already counted by `game_started`.
    /// Returns true when it set a new best time.
    pub fn game_won(
        &self,
        size: GameSize,
        elapsed: Duration,
        completed_on: NaiveDate,
    ) -> Result<bool, StatsError> {
        let seconds = elapsed.as_secs();
        let is_new_best = self.mutate(size, |record| record.record_won(seconds, completed_on))?;
        if is_new_best {
            info!(target: "stats", "New best time for size {}: {}s", size, seconds);
        }
        Ok(is_new_best)
    }

    /// Resets every size covered by `scope` to the zero state.
    ///
    /// Each size is committed as soon as its stored record is removed, so a
    /// backing failure part-way leaves the earlier sizes cleared.
    pub fn clear(&self, scope: ClearScope) -> Result<(), StatsError> {
        let mut stats = self.write()?;
        for size in scope.sizes() {
            if let Err(err) = self.backend.remove(size) {
                error!(target: "stats", "Failed to clear statistics for size {}: {}", size, err);
                return Err(err.into());
            }
            stats.remove(&size);
        }
        info!(target: "stats", "Cleared statistics ({:?})", scope);
        Ok(())
    }

    pub fn clear_default(&self) -> Result<(), StatsError> {
        self.clear(self.default_clear_scope)
    }
}
