pub mod error;
pub mod game;
pub mod model;
pub mod ui;

pub use error::{StatsError, StorageError};
pub use game::settings::StatsSettings;
pub use game::stats_backend::{JsonFileBackend, MemoryBackend, StatsBackend};
pub use game::stats_manager::StatsManager;
pub use model::{BestTime, ClearScope, GameSize, GameStatistics};
pub use ui::stats_view::{StatsPresenter, StatsView};
