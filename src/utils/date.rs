use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, TimeZone};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    Local::now().timestamp_millis()
}

/// Accepts ISO (`2025-03-07`) and Brazilian (`07/03/2025`) dates.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| AppError::InvalidDate(s.to_string()))
}

pub fn format_br(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

pub fn ms_to_local(ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}

/// HH:MM of a millisecond timestamp, "--:--" when out of range.
pub fn hour_of_ms(ms: i64) -> String {
    ms_to_local(ms)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_date_styles_parse() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(parse_date("2025-03-07").unwrap(), d);
        assert_eq!(parse_date(" 07/03/2025 ").unwrap(), d);
        assert!(matches!(parse_date("7 de março"), Err(AppError::InvalidDate(_))));
        assert_eq!(format_br(d), "07/03/2025");
    }

    #[test]
    fn hour_round_trips_local_time() {
        let t = Local.with_ymd_and_hms(2025, 3, 7, 6, 30, 0).unwrap();
        assert_eq!(hour_of_ms(t.timestamp_millis()), "06:30");
        assert_eq!(hour_of_ms(i64::MAX), "--:--");
    }
}
