use crate::db::conversion_error;
use crate::errors::{AppError, AppResult};
use crate::models::{ExitLog, Period, Scope};
use chrono::NaiveDate;
use rusqlite::{Connection, Row, ToSql, params};

const LOG_COLUMNS: &str = "id, driver_id, name, fleet_number, registration, company, zone, \
                           dt_number, orders_count, period, exit_time, date, tenant_id";

pub fn map_log(row: &Row) -> rusqlite::Result<ExitLog> {
    let period_str: String = row.get("period")?;
    let period = Period::from_db_str(&period_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidPeriod(period_str.clone())))?;

    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;

    Ok(ExitLog {
        id: row.get("id")?,
        driver_id: row.get("driver_id")?,
        name: row.get("name")?,
        fleet_number: row.get::<_, Option<String>>("fleet_number")?.unwrap_or_default(),
        registration: row.get::<_, Option<String>>("registration")?.unwrap_or_default(),
        company: row.get::<_, Option<String>>("company")?.unwrap_or_default(),
        zone: row.get("zone")?,
        dt_number: row.get::<_, Option<String>>("dt_number")?.unwrap_or_default(),
        orders_count: row.get("orders_count")?,
        period,
        exit_time: row.get("exit_time")?,
        date,
        tenant_id: row.get("tenant_id")?,
    })
}

pub fn insert_log(conn: &Connection, l: &ExitLog) -> AppResult<()> {
    conn.execute(
        "INSERT INTO exit_logs (id, driver_id, name, fleet_number, registration, company, zone,
                                dt_number, orders_count, period, exit_time, date, tenant_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            l.id,
            l.driver_id,
            l.name,
            l.fleet_number,
            l.registration,
            l.company,
            l.zone,
            l.dt_number,
            l.orders_count,
            l.period.to_db_str(),
            l.exit_time,
            l.date.format("%Y-%m-%d").to_string(),
            l.tenant_id,
        ],
    )?;
    Ok(())
}

fn query_logs(conn: &Connection, sql_tail: &str, args: &[&dyn ToSql]) -> AppResult<Vec<ExitLog>> {
    let mut stmt = conn.prepare(&format!("SELECT {LOG_COLUMNS} FROM exit_logs {sql_tail}"))?;
    let rows = stmt.query_map(args, map_log)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Most recent exits, newest first.
pub fn recent_logs(conn: &Connection, scope: &Scope, limit: usize) -> AppResult<Vec<ExitLog>> {
    let limit = limit as i64;
    query_logs(
        conn,
        "WHERE (?1 IS NULL OR tenant_id = ?1) ORDER BY exit_time DESC LIMIT ?2",
        params![scope.tenant_id(), limit],
    )
}

/// Exits with `start <= date <= end`, newest first.
pub fn logs_between(
    conn: &Connection,
    scope: &Scope,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<ExitLog>> {
    query_logs(
        conn,
        "WHERE (?1 IS NULL OR tenant_id = ?1) AND date BETWEEN ?2 AND ?3
         ORDER BY exit_time DESC",
        params![
            scope.tenant_id(),
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string()
        ],
    )
}

/// Exits of one driver inside the range, oldest first.
pub fn logs_for_driver(
    conn: &Connection,
    driver_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<ExitLog>> {
    query_logs(
        conn,
        "WHERE driver_id = ?1 AND date BETWEEN ?2 AND ?3 ORDER BY exit_time ASC",
        params![
            driver_id,
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string()
        ],
    )
}

/// Resolve a log by full id or unique id prefix.
pub fn find_log(conn: &Connection, scope: &Scope, reference: &str) -> AppResult<ExitLog> {
    let r = reference.trim();
    if r.is_empty() {
        return Err(AppError::LogNotFound(reference.to_string()));
    }

    let exact = query_logs(
        conn,
        "WHERE (?1 IS NULL OR tenant_id = ?1) AND id = ?2",
        params![scope.tenant_id(), r],
    )?;
    if let Some(l) = exact.into_iter().next() {
        return Ok(l);
    }

    let prefix = format!("{}%", r.replace(['%', '_'], ""));
    let mut matches = query_logs(
        conn,
        "WHERE (?1 IS NULL OR tenant_id = ?1) AND id LIKE ?2",
        params![scope.tenant_id(), prefix],
    )?;

    match matches.len() {
        0 => Err(AppError::LogNotFound(reference.to_string())),
        1 => Ok(matches.remove(0)),
        _ => Err(AppError::AmbiguousReference(reference.to_string())),
    }
}

pub fn set_orders_count(conn: &Connection, id: &str, orders_count: i64) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE exit_logs SET orders_count = ?2 WHERE id = ?1",
        params![id, orders_count],
    )?;
    Ok(n)
}

pub fn delete_log(conn: &Connection, id: &str) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM exit_logs WHERE id = ?1", [id])?;
    Ok(n)
}
