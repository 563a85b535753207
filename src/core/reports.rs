//! History, productivity, daily and company frequency reports.

use crate::db::drivers::find_driver;
use crate::db::exit_logs::{delete_log, find_log, logs_between, logs_for_driver, set_orders_count};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queues::load_queue;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::models::{Driver, ExitLog, Period, QueueEntry, Scope};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Resolve the date window of a report.
///
/// `range` (YYYY, YYYY-MM, YYYY-MM-DD or A:B) wins over `from`/`to`;
/// missing bounds default to the last `default_days` days up to `today`.
pub fn resolve_window(
    from: Option<&str>,
    to: Option<&str>,
    range: Option<&str>,
    default_days: i64,
    today: NaiveDate,
) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some(r) = range {
        return parse_range(r);
    }

    let parse = |s: &str| {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(s.to_string()))
    };

    let end = match to {
        Some(s) => parse(s)?,
        None => today,
    };
    let start = match from {
        Some(s) => parse(s)?,
        None => end - Duration::days(default_days),
    };

    if start > end {
        return Err(AppError::InvalidRange(format!("{start} é posterior a {end}")));
    }
    Ok((start, end))
}

/// Case-insensitive substring match on name, DT number or zone.
pub fn filter_history(logs: Vec<ExitLog>, needle: Option<&str>) -> Vec<ExitLog> {
    let needle = match needle.map(|n| n.trim().to_lowercase()) {
        Some(n) if !n.is_empty() => n,
        _ => return logs,
    };

    logs.into_iter()
        .filter(|l| {
            l.name.to_lowercase().contains(&needle)
                || l.dt_number.to_lowercase().contains(&needle)
                || l.zone.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Manual volume correction never goes below zero.
pub fn adjust_volume(current: i64, delta: i64) -> i64 {
    current.saturating_add(delta).max(0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductivityStats {
    pub exits: usize,
    pub volume: i64,
    pub average: f64,
    /// Zone → number of exits, most frequent first
    pub zones: Vec<(String, usize)>,
    /// Date → delivered volume, oldest first
    pub daily: Vec<(NaiveDate, i64)>,
}

impl ProductivityStats {
    pub fn from_logs(logs: &[ExitLog]) -> Self {
        let volume: i64 = logs.iter().map(|l| l.orders_count).sum();
        let average = volume as f64 / logs.len().max(1) as f64;

        let mut zone_counts: HashMap<&str, usize> = HashMap::new();
        let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for l in logs {
            *zone_counts.entry(l.zone.as_str()).or_default() += 1;
            *daily.entry(l.date).or_default() += l.orders_count;
        }

        let mut zones: Vec<(String, usize)> = zone_counts
            .into_iter()
            .map(|(z, n)| (z.to_string(), n))
            .collect();
        zones.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            exits: logs.len(),
            volume,
            average,
            zones,
            daily: daily.into_iter().collect(),
        }
    }

    pub fn average_str(&self) -> String {
        format!("{:.1}", self.average)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyStatus {
    InQueue,
    Left,
}

impl FrequencyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FrequencyStatus::InQueue => "EM FILA",
            FrequencyStatus::Left => "SAIU",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub name: String,
    pub status: FrequencyStatus,
    pub time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyBoard {
    pub period: Period,
    pub companies: Vec<(String, Vec<FrequencyEntry>)>,
}

/// Who of the tracked companies showed up today in one period.
///
/// A driver that already left counts once, as `SAIU`, even if queued again.
pub fn build_frequency(
    period: Period,
    queue: &[QueueEntry],
    today_logs: &[ExitLog],
    companies: &[String],
) -> FrequencyBoard {
    let tracked: Vec<String> = companies.iter().map(|c| c.trim().to_uppercase()).collect();
    let mut seen: HashMap<String, (String, FrequencyStatus, i64)> = HashMap::new();

    for l in today_logs.iter().filter(|l| l.period == period) {
        let company = l.company.trim().to_uppercase();
        if !tracked.contains(&company) {
            continue;
        }
        let slot = seen
            .entry(l.name.clone())
            .or_insert((company.clone(), FrequencyStatus::Left, l.exit_time));
        if l.exit_time > slot.2 {
            *slot = (company, FrequencyStatus::Left, l.exit_time);
        }
    }

    for q in queue {
        let company = q.driver.company.trim().to_uppercase();
        if tracked.contains(&company) && !seen.contains_key(&q.driver.name) {
            seen.insert(
                q.driver.name.clone(),
                (company, FrequencyStatus::InQueue, q.arrival_time),
            );
        }
    }

    let companies = tracked
        .iter()
        .map(|c| {
            let mut entries: Vec<FrequencyEntry> = seen
                .iter()
                .filter(|(_, (comp, _, _))| comp == c)
                .map(|(name, (_, status, time))| FrequencyEntry {
                    name: name.clone(),
                    status: *status,
                    time: *time,
                })
                .collect();
            entries.sort_by(|a, b| a.time.cmp(&b.time).then_with(|| a.name.cmp(&b.name)));
            (c.clone(), entries)
        })
        .collect();

    FrequencyBoard { period, companies }
}

pub struct ReportLogic;

impl ReportLogic {
    pub fn history(
        pool: &DbPool,
        scope: &Scope,
        start: NaiveDate,
        end: NaiveDate,
        filter: Option<&str>,
    ) -> AppResult<Vec<ExitLog>> {
        let logs = logs_between(&pool.conn, scope, start, end)?;
        Ok(filter_history(logs, filter))
    }

    pub fn daily(pool: &DbPool, scope: &Scope, today: NaiveDate) -> AppResult<Vec<ExitLog>> {
        logs_between(&pool.conn, scope, today, today)
    }

    /// Add `delta` to the volume of one log, floored at zero.
    pub fn adjust(pool: &DbPool, scope: &Scope, reference: &str, delta: i64) -> AppResult<ExitLog> {
        let mut log = find_log(&pool.conn, scope, reference)?;
        let new_val = adjust_volume(log.orders_count, delta);

        if set_orders_count(&pool.conn, &log.id, new_val)? == 0 {
            return Err(AppError::LogNotFound(reference.to_string()));
        }

        audit_quiet(
            &pool.conn,
            "volume_adjust",
            &log.name,
            &format!("{} -> {} (DT {})", log.orders_count, new_val, log.dt_number),
        );

        log.orders_count = new_val;
        Ok(log)
    }

    pub fn delete(pool: &DbPool, scope: &Scope, reference: &str) -> AppResult<ExitLog> {
        let log = find_log(&pool.conn, scope, reference)?;
        if delete_log(&pool.conn, &log.id)? == 0 {
            return Err(AppError::LogNotFound(reference.to_string()));
        }

        audit_quiet(
            &pool.conn,
            "log_del",
            &log.name,
            &format!("exit of {} (DT {}) deleted", log.date_str(), log.dt_number),
        );
        Ok(log)
    }

    pub fn productivity(
        pool: &DbPool,
        scope: &Scope,
        driver_ref: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<(Driver, Vec<ExitLog>, ProductivityStats)> {
        let driver = find_driver(&pool.conn, scope, driver_ref)?;
        let logs = logs_for_driver(&pool.conn, &driver.id, start, end)?;
        let stats = ProductivityStats::from_logs(&logs);
        Ok((driver, logs, stats))
    }

    pub fn frequency(
        pool: &DbPool,
        scope: &Scope,
        today: NaiveDate,
        companies: &[String],
    ) -> AppResult<Vec<FrequencyBoard>> {
        let today_logs = logs_between(&pool.conn, scope, today, today)?;

        Period::ALL
            .iter()
            .map(|p| {
                let queue = load_queue(&pool.conn, scope, *p)?;
                Ok(build_frequency(*p, &queue, &today_logs, companies))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Driver, NewDriver};

    fn log(name: &str, zone: &str, dt: &str, orders: i64, date: &str, at: i64) -> ExitLog {
        ExitLog {
            id: format!("id-{name}-{at}"),
            driver_id: format!("d-{name}"),
            name: name.into(),
            fleet_number: "1".into(),
            registration: "R".into(),
            company: "INNOVATIVE".into(),
            zone: zone.into(),
            dt_number: dt.into(),
            orders_count: orders,
            period: Period::Morning,
            exit_time: at,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            tenant_id: None,
        }
    }

    #[test]
    fn volume_adjustments_floor_at_zero() {
        let mut v = 5;
        v = adjust_volume(v, -1);
        v = adjust_volume(v, -1);
        assert_eq!(v, 3);
        v = adjust_volume(v, -10);
        assert_eq!(v, 0);
        assert_eq!(adjust_volume(0, 2), 2);
    }

    #[test]
    fn history_filter_matches_name_dt_or_zone() {
        let logs = vec![
            log("Ana", "SUL", "DT-1", 1, "2025-03-01", 1),
            log("Bruno", "NORTE", "X-77", 1, "2025-03-01", 2),
            log("Carla", "CENTRO SUL", "DT-9", 1, "2025-03-01", 3),
        ];
        assert_eq!(filter_history(logs.clone(), Some("sul")).len(), 2);
        assert_eq!(filter_history(logs.clone(), Some("x-7")).len(), 1);
        assert_eq!(filter_history(logs.clone(), Some("bru")).len(), 1);
        assert_eq!(filter_history(logs.clone(), Some("  ")).len(), 3);
        assert_eq!(filter_history(logs, None).len(), 3);
    }

    #[test]
    fn productivity_stats() {
        let logs = vec![
            log("Ana", "SUL", "1", 4, "2025-03-01", 1),
            log("Ana", "SUL", "2", 3, "2025-03-01", 2),
            log("Ana", "LESTE", "3", 1, "2025-03-02", 3),
        ];
        let s = ProductivityStats::from_logs(&logs);
        assert_eq!(s.exits, 3);
        assert_eq!(s.volume, 8);
        assert_eq!(s.average_str(), "2.7");
        assert_eq!(s.zones[0], ("SUL".to_string(), 2));
        assert_eq!(s.daily.len(), 2);
        assert_eq!(s.daily[0].1, 7);

        let empty = ProductivityStats::from_logs(&[]);
        assert_eq!(empty.average_str(), "0.0");
    }

    #[test]
    fn window_defaults_and_range_override() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let (s, e) = resolve_window(None, None, None, 30, today).unwrap();
        assert_eq!(s, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(e, today);

        let (s, e) = resolve_window(Some("2025-01-01"), None, Some("2024-02"), 30, today).unwrap();
        assert_eq!(s, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(e, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        assert!(resolve_window(Some("2025-04-01"), Some("2025-03-01"), None, 7, today).is_err());
    }

    #[test]
    fn frequency_prefers_exit_over_queue() {
        let queued = |name: &str, company: &str, rank: i64| QueueEntry {
            queue_id: format!("q-{name}"),
            driver: Driver {
                company: company.into(),
                ..Driver::new(
                    NewDriver {
                        name: name.into(),
                        ..Default::default()
                    },
                    None,
                )
            },
            arrival_time: rank,
            period: Period::Morning,
            tenant_id: None,
        };

        let queue = vec![
            queued("Ana", "innovative ", 50),
            queued("Davi", "NAVEGAM", 10),
            queued("Eva", "OUTRA", 5),
        ];
        let logs = vec![log("Ana", "SUL", "1", 1, "2025-03-01", 20)];
        let companies = vec!["INNOVATIVE".to_string(), "NAVEGAM".to_string()];

        let board = build_frequency(Period::Morning, &queue, &logs, &companies);
        let (name, innov) = &board.companies[0];
        assert_eq!(name, "INNOVATIVE");
        assert_eq!(innov.len(), 1);
        assert_eq!(innov[0].status, FrequencyStatus::Left);
        assert_eq!(innov[0].time, 20);

        let (_, nav) = &board.companies[1];
        assert_eq!(nav[0].name, "Davi");
        assert_eq!(nav[0].status.label(), "EM FILA");

        let afternoon = build_frequency(Period::Afternoon, &[], &logs, &companies);
        assert!(afternoon.companies.iter().all(|(_, e)| e.is_empty()));
    }
}
