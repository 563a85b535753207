use crate::db::conversion_error;
use crate::db::drivers::map_driver;
use crate::errors::{AppError, AppResult};
use crate::models::{Period, QueueEntry, Scope};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_entry(row: &Row) -> rusqlite::Result<QueueEntry> {
    let period_str: String = row.get("period")?;
    let period = Period::from_db_str(&period_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidPeriod(period_str.clone())))?;

    Ok(QueueEntry {
        queue_id: row.get("queue_id")?,
        driver: map_driver(row)?,
        arrival_time: row.get("arrival_time")?,
        period,
        tenant_id: row.get("queue_tenant_id")?,
    })
}

/// Ordered queue of one period. Rows whose driver vanished are skipped.
pub fn load_queue(conn: &Connection, scope: &Scope, period: Period) -> AppResult<Vec<QueueEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT q.id AS queue_id, q.period, q.arrival_time, q.tenant_id AS queue_tenant_id,
                d.id, d.name, d.fleet_number, d.registration, d.company, d.tenant_id
         FROM queues q
         JOIN drivers d ON d.id = q.driver_id
         WHERE q.period = ?1 AND (?2 IS NULL OR q.tenant_id = ?2)
         ORDER BY q.arrival_time ASC, q.id ASC",
    )?;

    let rows = stmt.query_map(params![period.to_db_str(), scope.tenant_id()], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_entry(
    conn: &Connection,
    queue_id: &str,
    driver_id: &str,
    period: Period,
    arrival_time: i64,
    tenant_id: Option<&str>,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO queues (id, driver_id, period, arrival_time, tenant_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![queue_id, driver_id, period.to_db_str(), arrival_time, tenant_id],
    )?;
    Ok(())
}

pub fn is_queued(conn: &Connection, driver_id: &str, period: Period) -> AppResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM queues WHERE driver_id = ?1 AND period = ?2 LIMIT 1",
            params![driver_id, period.to_db_str()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Highest rank currently used in the period, if any.
pub fn max_rank(conn: &Connection, scope: &Scope, period: Period) -> AppResult<Option<i64>> {
    let max: Option<i64> = conn.query_row(
        "SELECT MAX(arrival_time) FROM queues
         WHERE period = ?1 AND (?2 IS NULL OR tenant_id = ?2)",
        params![period.to_db_str(), scope.tenant_id()],
        |row| row.get(0),
    )?;
    Ok(max)
}

pub fn update_rank(conn: &Connection, queue_id: &str, arrival_time: i64) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE queues SET arrival_time = ?2 WHERE id = ?1",
        params![queue_id, arrival_time],
    )?;
    Ok(n)
}

pub fn delete_entry(conn: &Connection, queue_id: &str) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM queues WHERE id = ?1", [queue_id])?;
    Ok(n)
}
