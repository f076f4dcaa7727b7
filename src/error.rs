use thiserror::Error;

use crate::model::GameSize;

/// Failures reading or writing the statistics backing.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored record or settings file could not be (de)serialized.
    #[error("format error: {0}")]
    Format(#[from] serde_json::Error),

    /// A thread panicked while holding the statistics lock.
    #[error("statistics lock poisoned")]
    Poisoned,

    #[error("write rejected: {0}")]
    WriteRejected(String),

    /// A stored record breaks the played/won/best-time relationships.
    #[error("inconsistent statistics stored for size {0}")]
    Corrupt(GameSize),

    #[error("no user data directory available")]
    NoDataDir,
}

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("unsupported puzzle size: {0}")]
    InvalidSize(u32),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
