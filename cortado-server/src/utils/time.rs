//! Time helpers
//!
//! All timestamps are Unix epoch milliseconds; day bucketing is done in
//! UTC. Date→millis conversion happens above the repository layer, which
//! only ever sees `i64` bounds.

use chrono::{NaiveDate, Utc};

use super::{AppError, AppResult};

/// Current time as Unix epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Format a date as YYYY-MM-DD
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Start of the UTC day (00:00:00) as epoch millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// End of the UTC day as epoch millis
///
/// Returns the following midnight; callers use `< end` (exclusive).
pub fn day_end_millis(date: NaiveDate) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day)
}

/// Half-open `[start, end)` millis window covering one UTC day
pub fn day_bounds_millis(date: NaiveDate) -> (i64, i64) {
    (day_start_millis(date), day_end_millis(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-03-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(parse_date("15/03/2024").is_err());
        assert!(parse_date("not-a-date").is_err());
    }

    #[test]
    fn test_day_bounds_cover_exactly_one_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (start, end) = day_bounds_millis(date);
        assert_eq!(end - start, 24 * 60 * 60 * 1000);
        // 2024-03-15T00:00:00Z
        assert_eq!(start, 1_710_460_800_000);
    }

    #[test]
    fn test_day_bounds_are_half_open() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (start, end) = day_bounds_millis(date);
        let next = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();
        assert_eq!(end, day_start_millis(next));
        assert!(start < end);
    }

    #[test]
    fn test_format_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(format_date(date), "2024-12-01");
        assert_eq!(parse_date(&format_date(date)).unwrap(), date);
    }
}
