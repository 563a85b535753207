// src/export/model.rs

use crate::models::ExitLog;
use serde::Serialize;

/// Flat row shared by every export format.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ExitLogExport {
    #[serde(rename = "Data")]
    pub date: String,
    #[serde(rename = "Hora")]
    pub time: String,
    #[serde(rename = "Nome")]
    pub name: String,
    #[serde(rename = "Frota")]
    pub fleet_number: String,
    #[serde(rename = "Matrícula")]
    pub registration: String,
    #[serde(rename = "Zona")]
    pub zone: String,
    #[serde(rename = "DT")]
    pub dt_number: String,
    #[serde(rename = "Volume")]
    pub orders_count: i64,
}

impl From<&ExitLog> for ExitLogExport {
    fn from(l: &ExitLog) -> Self {
        Self {
            date: l.date.format("%d/%m/%Y").to_string(),
            time: l.hour_str(),
            name: l.name.clone(),
            fleet_number: l.fleet_number.clone(),
            registration: l.registration.clone(),
            zone: l.zone.clone(),
            dt_number: l.dt_number.clone(),
            orders_count: l.orders_count,
        }
    }
}

/// Column titles, in serialization order.
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec!["Data", "Hora", "Nome", "Frota", "Matrícula", "Zona", "DT", "Volume"]
}

pub(crate) fn export_to_row(e: &ExitLogExport) -> Vec<String> {
    vec![
        e.date.clone(),
        e.time.clone(),
        e.name.clone(),
        e.fleet_number.clone(),
        e.registration.clone(),
        e.zone.clone(),
        e.dt_number.clone(),
        e.orders_count.to_string(),
    ]
}

pub(crate) fn rows_to_table(rows: &[ExitLogExport]) -> Vec<Vec<String>> {
    rows.iter().map(export_to_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;
    use chrono::{Local, NaiveDate, TimeZone};

    #[test]
    fn row_uses_brazilian_date_and_hour() {
        let at = Local.with_ymd_and_hms(2025, 3, 7, 14, 5, 0).unwrap();
        let log = ExitLog {
            id: "x".into(),
            driver_id: "d".into(),
            name: "João".into(),
            fleet_number: "12".into(),
            registration: "ABC1D23".into(),
            company: "NAVEGAM".into(),
            zone: "SUL".into(),
            dt_number: "DT-1".into(),
            orders_count: 9,
            period: Period::Afternoon,
            exit_time: at.timestamp_millis(),
            date: NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
            tenant_id: None,
        };

        let row = ExitLogExport::from(&log);
        assert_eq!(row.date, "07/03/2025");
        assert_eq!(row.time, "14:05");
        assert_eq!(export_to_row(&row).len(), get_headers().len());

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"Matrícula\":\"ABC1D23\""));
        assert!(json.contains("\"Volume\":9"));
    }
}
