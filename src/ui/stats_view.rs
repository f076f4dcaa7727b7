use std::sync::Arc;

use crate::error::StatsError;
use crate::game::stats_manager::StatsManager;
use crate::model::{GameSize, GameStatistics};
use crate::ui::stats_formatter::{format_average, format_date, format_duration};

/// The strings a statistics dialog shows for one puzzle size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsView {
    pub size: GameSize,
    pub games_played: String,
    pub games_won: String,
    pub average_time: String,
    pub best_time: String,
    pub best_time_date: String,
}

fn seconds_input(seconds: u64) -> Result<i64, StatsError> {
    i64::try_from(seconds)
        .map_err(|_| StatsError::InvalidInput(format!("duration out of range: {}s", seconds)))
}

impl StatsView {
    /// Time and date fields stay blank until a game of this size is won.
    pub fn from_statistics(size: GameSize, stats: &GameStatistics) -> Result<Self, StatsError> {
        let (best_time, best_time_date) = match stats.best {
            Some(best) => (
                format_duration(seconds_input(best.seconds)?)?,
                format_date(best.date),
            ),
            None => (String::new(), String::new()),
        };

        Ok(Self {
            size,
            games_played: stats.games_played.to_string(),
            games_won: stats.games_won.to_string(),
            average_time: format_average(seconds_input(stats.total_seconds)?, stats.games_won)?,
            best_time,
            best_time_date,
        })
    }

    pub fn load(manager: &StatsManager, size: GameSize) -> Result<Self, StatsError> {
        let stats = manager.statistics(size)?;
        Self::from_statistics(size, &stats)
    }
}

/// Drives a statistics dialog: tracks the selected size and rebuilds the
/// view after selection changes and clears.
pub struct StatsPresenter {
    manager: Arc<StatsManager>,
    selected: GameSize,
}

impl StatsPresenter {
    pub fn new(manager: Arc<StatsManager>) -> Self {
        Self {
            manager,
            selected: GameSize::default(),
        }
    }

    pub fn selected(&self) -> GameSize {
        self.selected
    }

    /// Labels for the size selector, in index order.
    pub fn size_labels() -> Vec<String> {
        GameSize::all().iter().map(|size| size.to_string()).collect()
    }

    pub fn select_index(&mut self, index: usize) -> Result<StatsView, StatsError> {
        self.selected = GameSize::from_index(index)?;
        self.refresh()
    }

    pub fn refresh(&self) -> Result<StatsView, StatsError> {
        StatsView::load(&self.manager, self.selected)
    }

    /// Called once the user confirmed clearing. Uses the store's default scope.
    pub fn clear_confirmed(&self) -> Result<StatsView, StatsError> {
        self.manager.clear_default()?;
        self.refresh()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::time::Duration;
    use test_context::test_context;

    use super::*;
    use crate::game::stats_backend::MemoryBackend;
    use crate::model::ClearScope;
    use crate::tests::UsingLogger;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    #[test]
    fn test_zero_state_renders_blank_times() {
        let view =
            StatsView::from_statistics(GameSize::default(), &GameStatistics::default()).unwrap();
        assert_eq!(view.games_played, "0");
        assert_eq!(view.games_won, "0");
        assert_eq!(view.average_time, "");
        assert_eq!(view.best_time, "");
        assert_eq!(view.best_time_date, "");
    }

    #[test]
    fn test_won_state_renders_times() {
        let mut stats = GameStatistics::default();
        stats.record_started();
        stats.record_won(90, day(1));
        stats.record_started();
        stats.record_won(60, day(2));
        stats.record_started();

        let view = StatsView::from_statistics(GameSize::new(5).unwrap(), &stats).unwrap();
        assert_eq!(view.games_played, "3");
        assert_eq!(view.games_won, "2");
        assert_eq!(view.average_time, "00:01:15");
        assert_eq!(view.best_time, "00:01:00");
        assert_eq!(view.best_time_date, "2024-09-02");
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_presenter_selection_and_clear(_: &mut UsingLogger) {
        let manager = Arc::new(StatsManager::open(MemoryBackend::new()).unwrap());
        manager
            .record_result(6, true, Duration::from_secs(3661), day(3))
            .unwrap();
        manager
            .record_result(4, true, Duration::from_secs(20), day(4))
            .unwrap();

        let mut presenter = StatsPresenter::new(manager.clone());
        assert_eq!(presenter.refresh().unwrap().games_won, "1");

        let view = presenter.select_index(2).unwrap();
        assert_eq!(view.size.value(), 6);
        assert_eq!(view.best_time, "01:01:01");
        assert!(presenter.select_index(6).is_err());
        assert_eq!(presenter.selected().value(), 6);

        let view = presenter.clear_confirmed().unwrap();
        assert_eq!(view.games_played, "0");
        assert_eq!(view.best_time_date, "");
        assert_eq!(manager.get(4).unwrap(), GameStatistics::default());
    }

    #[test]
    fn test_presenter_clear_honours_scope() {
        let four = GameSize::new(4).unwrap();
        let manager = Arc::new(
            StatsManager::open_with_scope(MemoryBackend::new(), ClearScope::Size(four)).unwrap(),
        );
        manager.record_result(4, true, Duration::from_secs(20), day(4)).unwrap();
        manager.record_result(5, true, Duration::from_secs(20), day(4)).unwrap();

        let presenter = StatsPresenter::new(manager.clone());
        assert_eq!(presenter.clear_confirmed().unwrap().games_played, "0");
        assert_eq!(manager.get(5).unwrap().games_played, 1);
    }

    #[test]
    fn test_size_labels() {
        assert_eq!(StatsPresenter::size_labels(), vec!["4", "5", "6", "7", "8", "9"]);
    }
}
