mod clear_scope;
mod game_size;
mod game_stats;

pub use clear_scope::ClearScope;
pub use game_size::{GameSize, MAX_GAME_SIZE, MIN_GAME_SIZE};
pub use game_stats::{BestTime, GameStatistics};
