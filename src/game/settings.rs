use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{StatsError, StorageError};
use crate::game::stats_backend::JsonFileBackend;
use crate::game::stats_manager::StatsManager;
use crate::model::ClearScope;

const APP_DIR: &str = "kenken";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StatsSettings {
    #[serde(default = "default_version")]
    version: u32,

    /// Where statistics files live. Falls back to the user data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Scope used when the display clears statistics without naming one.
    #[serde(default)]
    pub default_clear_scope: ClearScope,
}

fn default_version() -> u32 {
    1
}

fn resolve_data_dir(
    configured: Option<&Path>,
    user_data_dir: Option<PathBuf>,
) -> Result<PathBuf, StorageError> {
    match configured {
        Some(dir) => Ok(dir.to_path_buf()),
        None => user_data_dir
            .map(|dir| dir.join(APP_DIR))
            .ok_or(StorageError::NoDataDir),
    }
}

impl Default for StatsSettings {
    fn default() -> Self {
        StatsSettings {
            version: 1,
            data_dir: None,
            default_clear_scope: ClearScope::default(),
        }
    }
}

impl StatsSettings {
    /// Reads settings from `path`, writing defaults there when it does not exist yet.
    pub fn load(path: &Path) -> Result<Self, StatsError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let mut settings = serde_json::from_str::<StatsSettings>(&contents)
                    .map_err(StorageError::from)?;
                settings.migrate();
                Ok(settings)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No settings at {}, using defaults", path.display());
                let default = StatsSettings::default();
                if let Err(err) = default.save(path) {
                    warn!("Failed to save default settings: {}", err);
                }
                Ok(default)
            }
            Err(err) => Err(StorageError::from(err).into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StatsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(StorageError::from)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(StorageError::from)?;
        fs::write(path, contents).map_err(StorageError::from)?;
        Ok(())
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn resolved_data_dir(&self) -> Result<PathBuf, StatsError> {
        Ok(resolve_data_dir(self.data_dir.as_deref(), dirs::data_dir())?)
    }

    pub fn open_manager(&self) -> Result<StatsManager, StatsError> {
        let backend = JsonFileBackend::new(self.resolved_data_dir()?)?;
        StatsManager::open_with_scope(backend, self.default_clear_scope)
    }
}
