use chrono::NaiveDate;

use crate::error::StatsError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `HH:MM:SS`, each field zero-padded to two digits. Hours are not capped.
pub fn format_duration(total_seconds: i64) -> Result<String, StatsError> {
    if total_seconds < 0 {
        return Err(StatsError::InvalidInput(format!(
            "negative duration: {}s",
            total_seconds
        )));
    }
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    Ok(format!("{:02}:{:02}:{:02}", hours, minutes, seconds))
}

/// Average solve time, or an empty string when nothing was won.
pub fn format_average(total_seconds: i64, games_won: u32) -> Result<String, StatsError> {
    if total_seconds < 0 {
        return Err(StatsError::InvalidInput(format!(
            "negative duration: {}s",
            total_seconds
        )));
    }
    if games_won == 0 {
        return Ok(String::new());
    }
    format_duration(total_seconds / games_won as i64)
}

/// Locale-independent `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(text: &str) -> Result<NaiveDate, StatsError> {
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|err| StatsError::InvalidInput(format!("malformed date {:?}: {}", text, err)))?;
    // chrono accepts unpadded fields, the stored pattern does not
    if format_date(date) != text {
        return Err(StatsError::InvalidInput(format!("malformed date {:?}", text)));
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3661).unwrap(), "01:01:01");
        assert_eq!(format_duration(59).unwrap(), "00:00:59");
        assert_eq!(format_duration(0).unwrap(), "00:00:00");
        assert_eq!(format_duration(3600 * 123 + 5).unwrap(), "123:00:05");
    }

    #[test]
    fn test_negative_duration_rejected() {
        assert!(matches!(format_duration(-1), Err(StatsError::InvalidInput(_))));
        assert!(matches!(format_average(-10, 2), Err(StatsError::InvalidInput(_))));
    }

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(150, 2).unwrap(), "00:01:15");
        assert_eq!(format_average(151, 2).unwrap(), "00:01:15");
        assert_eq!(format_average(0, 0).unwrap(), "");
        assert_eq!(format_average(500, 0).unwrap(), "");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2011, 2, 3).unwrap();
        assert_eq!(format_date(date), "2011-02-03");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2011-02-03").unwrap(),
            NaiveDate::from_ymd_opt(2011, 2, 3).unwrap()
        );
        for bad in ["2011-2-3", "03/02/2011", "2011-02-30", "", "2011-02-03T10:00"] {
            assert!(
                matches!(parse_date(bad), Err(StatsError::InvalidInput(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }
}
