use crate::errors::AppResult;
use crate::models::OperatorAccess;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_operator(row: &Row) -> rusqlite::Result<OperatorAccess> {
    Ok(OperatorAccess {
        id: row.get("id")?,
        pin: row.get("pin")?,
        label: row.get("label")?,
        tenant_id: row.get("tenant_id")?,
    })
}

pub fn insert_operator(conn: &Connection, op: &OperatorAccess) -> AppResult<()> {
    conn.execute(
        "INSERT INTO operator_access (id, pin, label, tenant_id) VALUES (?1, ?2, ?3, ?4)",
        params![op.id, op.pin, op.label, op.tenant_id],
    )?;
    Ok(())
}

/// Exact, case-sensitive PIN match.
pub fn find_by_pin(conn: &Connection, pin: &str) -> AppResult<Option<OperatorAccess>> {
    let op = conn
        .query_row(
            "SELECT id, pin, label, tenant_id FROM operator_access WHERE pin = ?1 LIMIT 1",
            [pin],
            map_operator,
        )
        .optional()?;
    Ok(op)
}

pub fn list_operators(conn: &Connection) -> AppResult<Vec<OperatorAccess>> {
    let mut stmt = conn.prepare(
        "SELECT id, pin, label, tenant_id FROM operator_access ORDER BY label COLLATE NOCASE",
    )?;
    let rows = stmt.query_map([], map_operator)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
