use crate::errors::{AppError, AppResult};
use crate::models::{Driver, Scope};
use rusqlite::{Connection, Row, params};

const DRIVER_COLUMNS: &str = "id, name, fleet_number, registration, company, tenant_id";

pub fn map_driver(row: &Row) -> rusqlite::Result<Driver> {
    Ok(Driver {
        id: row.get("id")?,
        name: row.get("name")?,
        fleet_number: row.get::<_, Option<String>>("fleet_number")?.unwrap_or_default(),
        registration: row.get::<_, Option<String>>("registration")?.unwrap_or_default(),
        company: row.get::<_, Option<String>>("company")?.unwrap_or_default(),
        tenant_id: row.get("tenant_id")?,
    })
}

pub fn insert_driver(conn: &Connection, d: &Driver) -> AppResult<()> {
    conn.execute(
        "INSERT INTO drivers (id, name, fleet_number, registration, company, tenant_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![d.id, d.name, d.fleet_number, d.registration, d.company, d.tenant_id],
    )?;
    Ok(())
}

pub fn update_driver(conn: &Connection, d: &Driver) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE drivers
         SET name = ?2, fleet_number = ?3, registration = ?4, company = ?5
         WHERE id = ?1",
        params![d.id, d.name, d.fleet_number, d.registration, d.company],
    )?;
    Ok(n)
}

/// Drivers visible in `scope`, alphabetical.
pub fn load_drivers(conn: &Connection, scope: &Scope) -> AppResult<Vec<Driver>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DRIVER_COLUMNS} FROM drivers
         WHERE (?1 IS NULL OR tenant_id = ?1)
         ORDER BY name COLLATE NOCASE ASC"
    ))?;

    let rows = stmt.query_map([scope.tenant_id()], map_driver)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn query_drivers(
    conn: &Connection,
    scope: &Scope,
    condition: &str,
    value: &str,
) -> AppResult<Vec<Driver>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DRIVER_COLUMNS} FROM drivers
         WHERE (?1 IS NULL OR tenant_id = ?1) AND {condition}"
    ))?;
    let rows = stmt.query_map(params![scope.tenant_id(), value], map_driver)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn single(matches: Vec<Driver>, reference: &str) -> AppResult<Option<Driver>> {
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.into_iter().next()),
        _ => Err(AppError::AmbiguousReference(reference.to_string())),
    }
}

/// Resolve a CLI reference: full id, fleet number, then id prefix.
pub fn find_driver(conn: &Connection, scope: &Scope, reference: &str) -> AppResult<Driver> {
    let r = reference.trim();
    if r.is_empty() {
        return Err(AppError::DriverNotFound(reference.to_string()));
    }

    if let Some(d) = single(query_drivers(conn, scope, "id = ?2", r)?, r)? {
        return Ok(d);
    }

    if let Some(d) = single(
        query_drivers(conn, scope, "fleet_number = ?2 COLLATE NOCASE", r)?,
        r,
    )? {
        return Ok(d);
    }

    let prefix = format!("{}%", r.replace(['%', '_'], ""));
    if let Some(d) = single(query_drivers(conn, scope, "id LIKE ?2", &prefix)?, r)? {
        return Ok(d);
    }

    Err(AppError::DriverNotFound(reference.to_string()))
}

/// Remove a driver together with its queue rows and exit history.
///
/// Returns (queue rows, exit logs, drivers) deleted.
pub fn delete_driver_cascade(conn: &mut Connection, driver_id: &str) -> AppResult<(usize, usize, usize)> {
    let tx = conn.transaction()?;
    let q = tx.execute("DELETE FROM queues WHERE driver_id = ?1", [driver_id])?;
    let l = tx.execute("DELETE FROM exit_logs WHERE driver_id = ?1", [driver_id])?;
    let d = tx.execute("DELETE FROM drivers WHERE id = ?1", [driver_id])?;
    tx.commit()?;
    Ok((q, l, d))
}

pub fn delete_logs_of_driver(conn: &Connection, driver_id: &str) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM exit_logs WHERE driver_id = ?1", [driver_id])?;
    Ok(n)
}
