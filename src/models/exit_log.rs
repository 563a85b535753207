use super::{period::Period, queue_entry::QueueEntry};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::Serialize;
use uuid::Uuid;

/// Delivery data captured by the exit form.
#[derive(Debug, Clone)]
pub struct ExitDetails {
    pub zone: String,
    pub dt_number: String,
    pub orders_count: i64,
}

/// Historical record of one driver's departure.
///
/// The driver identity fields are a snapshot taken at exit time, so later
/// edits to the driver do not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitLog {
    pub id: String,
    pub driver_id: String,
    pub name: String,
    pub fleet_number: String,
    pub registration: String,
    pub company: String,
    pub zone: String,
    pub dt_number: String,
    pub orders_count: i64,
    pub period: Period,
    /// Milliseconds since the Unix epoch
    pub exit_time: i64,
    pub date: NaiveDate,
    pub tenant_id: Option<String>,
}

impl ExitLog {
    pub fn from_entry(entry: &QueueEntry, details: ExitDetails, now: DateTime<Local>) -> Self {
        let d = &entry.driver;
        Self {
            id: Uuid::new_v4().to_string(),
            driver_id: d.id.clone(),
            name: d.name.clone(),
            fleet_number: d.fleet_number.clone(),
            registration: d.registration.clone(),
            company: d.company.clone(),
            zone: details.zone,
            dt_number: details.dt_number.trim().to_string(),
            orders_count: details.orders_count,
            period: entry.period,
            exit_time: now.timestamp_millis(),
            date: now.date_naive(),
            tenant_id: d.tenant_id.clone(),
        }
    }

    pub fn exit_local(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.exit_time).single()
    }

    /// Exit time as HH:MM in local time, "--:--" if out of range.
    pub fn hour_str(&self) -> String {
        self.exit_local()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}
