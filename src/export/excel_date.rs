// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Interpret an export cell as a date (dd/mm/yyyy) or an hour (HH:MM),
/// returning the Excel number format and serial value.
pub(crate) fn parse_to_excel_date(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return excel_serial(d).map(|serial| ("dd/mm/yyyy", serial));
    }

    if s.len() != 5 {
        return None;
    }

    NaiveTime::parse_from_str(s, "%H:%M")
        .ok()
        .map(|t| ("hh:mm", t.num_seconds_from_midnight() as f64 / 86400.0))
}

fn excel_serial(d: NaiveDate) -> Option<f64> {
    let excel_epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - excel_epoch).num_days() as f64)
}
