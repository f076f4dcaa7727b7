use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fastest won game for a size and the day it happened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
pub struct BestTime {
    pub seconds: u64,
    pub date: NaiveDate,
}

/// Cumulative play statistics for one puzzle size.
///
/// `best` is present exactly when `games_won > 0`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, Eq, PartialEq)]
pub struct GameStatistics {
    pub games_played: u32,
    pub games_won: u32,
    pub total_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best: Option<BestTime>,
}

impl GameStatistics {
    pub fn best_time(&self) -> Option<u64> {
        self.best.map(|best| best.seconds)
    }

    pub fn best_time_date(&self) -> Option<NaiveDate> {
        self.best.map(|best| best.date)
    }

    pub fn average_seconds(&self) -> Option<u64> {
        if self.games_won > 0 {
            Some(self.total_seconds / self.games_won as u64)
        } else {
            None
        }
    }

    pub fn record_started(&mut self) {
        self.games_played = self.games_played.saturating_add(1);
    }

    /// Returns true when this win set a new best time.
    pub fn record_won(&mut self, seconds: u64, date: NaiveDate) -> bool {
        // a win never reported as started still counts as played
        if self.games_won >= self.games_played {
            self.games_played = self.games_played.saturating_add(1);
        }
        self.games_won = self.games_won.saturating_add(1);
        self.total_seconds = self.total_seconds.saturating_add(seconds);

        let is_new_best = self.best.map_or(true, |best| seconds < best.seconds);
        if is_new_best {
            self.best = Some(BestTime { seconds, date });
        }
        is_new_best
    }

    /// Checks the relationships between fields that every stored record must satisfy.
    pub fn is_consistent(&self) -> bool {
        self.games_won <= self.games_played && (self.games_won > 0) == self.best.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_zero_state() {
        let stats = GameStatistics::default();
        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.best_time(), None);
        assert_eq!(stats.best_time_date(), None);
        assert_eq!(stats.average_seconds(), None);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_faster_win_replaces_best() {
        let mut stats = GameStatistics::default();
        stats.record_started();
        assert!(stats.record_won(90, day(1)));
        stats.record_started();
        assert!(stats.record_won(60, day(2)));

        assert_eq!(stats.best_time(), Some(60));
        assert_eq!(stats.best_time_date(), Some(day(2)));
        assert_eq!(stats.total_seconds, 150);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.average_seconds(), Some(75));
    }

    #[test]
    fn test_equal_time_keeps_earlier_best() {
        let mut stats = GameStatistics::default();
        stats.record_won(60, day(1));
        assert!(!stats.record_won(60, day(5)));
        assert_eq!(stats.best_time_date(), Some(day(1)));
    }

    #[test]
    fn test_win_without_start_counts_as_played() {
        let mut stats = GameStatistics::default();
        stats.record_won(30, day(1));
        stats.record_won(40, day(2));
        assert_eq!(stats.games_played, 2);
        assert!(stats.is_consistent());

        stats.record_started();
        stats.record_started();
        stats.record_won(20, day(3));
        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.games_won, 3);
    }

    #[test]
    fn test_json_omits_absent_best() {
        let json = serde_json::to_string(&GameStatistics::default()).unwrap();
        assert_eq!(
            json,
            r#"{"games_played":0,"games_won":0,"total_seconds":0}"#
        );

        let mut stats = GameStatistics::default();
        stats.record_won(61, day(9));
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains(r#""date":"2024-03-09""#));
    }
}
