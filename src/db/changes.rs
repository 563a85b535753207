use crate::errors::AppResult;
use crate::models::Scope;
use rusqlite::{Connection, params};

/// One write announced by the triggers on the operational tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub seq: i64,
    pub table_name: String,
    pub op: String,
    pub tenant_id: Option<String>,
}

/// Sequence number of the newest change, 0 on an empty feed.
pub fn latest_seq(conn: &Connection) -> AppResult<i64> {
    let seq: Option<i64> = conn.query_row("SELECT MAX(seq) FROM change_feed", [], |r| r.get(0))?;
    Ok(seq.unwrap_or(0))
}

/// Changes in `(after, upto]` visible in `scope`, oldest first.
pub fn events_between(
    conn: &Connection,
    after: i64,
    upto: i64,
    scope: &Scope,
) -> AppResult<Vec<ChangeEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT seq, table_name, op, tenant_id FROM change_feed
         WHERE seq > ?1 AND seq <= ?2 AND (?3 IS NULL OR tenant_id = ?3)
         ORDER BY seq ASC",
    )?;

    let rows = stmt.query_map(params![after, upto, scope.tenant_id()], |row| {
        Ok(ChangeEvent {
            seq: row.get(0)?,
            table_name: row.get(1)?,
            op: row.get(2)?,
            tenant_id: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
