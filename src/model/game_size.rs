use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StatsError;

pub const MIN_GAME_SIZE: u32 = 4;
pub const MAX_GAME_SIZE: u32 = 9;

/// Grid dimension of a puzzle. Statistics are partitioned by it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u32")]
pub struct GameSize(u32);

impl Default for GameSize {
    fn default() -> Self {
        GameSize(MIN_GAME_SIZE)
    }
}

impl GameSize {
    pub fn new(size: u32) -> Result<GameSize, StatsError> {
        if (MIN_GAME_SIZE..=MAX_GAME_SIZE).contains(&size) {
            Ok(GameSize(size))
        } else {
            Err(StatsError::InvalidSize(size))
        }
    }

    pub fn all() -> Vec<GameSize> {
        (MIN_GAME_SIZE..=MAX_GAME_SIZE).map(GameSize).collect()
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Position of this size in a size selector, smallest size first.
    pub fn index(&self) -> usize {
        (self.0 - MIN_GAME_SIZE) as usize
    }

    pub fn from_index(index: usize) -> Result<GameSize, StatsError> {
        let size = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(MIN_GAME_SIZE))
            .unwrap_or(u32::MAX);
        GameSize::new(size)
    }
}

impl TryFrom<u32> for GameSize {
    type Error = StatsError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        GameSize::new(size)
    }
}

impl From<GameSize> for u32 {
    fn from(size: GameSize) -> u32 {
        size.0
    }
}

impl fmt::Display for GameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
