use serde::{Deserialize, Serialize};

use super::GameSize;

/// Which sizes a clear operation resets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClearScope {
    Size(GameSize),
    #[default]
    All,
}

impl ClearScope {
    pub fn sizes(&self) -> Vec<GameSize> {
        match self {
            ClearScope::Size(size) => vec![*size],
            ClearScope::All => GameSize::all(),
        }
    }

    pub fn covers(&self, size: GameSize) -> bool {
        match self {
            ClearScope::Size(scoped) => *scoped == size,
            ClearScope::All => true,
        }
    }
}
