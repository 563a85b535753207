use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// Tables whose writes are announced on the change feed.
pub const WATCHED_TABLES: [&str; 3] = ["drivers", "queues", "exit_logs"];

/// Ensure that the `audit_log` table exists. Migrations record themselves there.
fn ensure_audit_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS audit_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM audit_log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO audit_log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    log::info!("migration applied: {version}");
    Ok(())
}

/// Operational tables: drivers, period queues, exit history, tenant PINs.
fn create_core_tables(conn: &Connection) -> AppResult<()> {
    let version = "20250301_0001_create_core_tables";
    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        BEGIN;

        CREATE TABLE IF NOT EXISTS drivers (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            fleet_number  TEXT NOT NULL DEFAULT '',
            registration  TEXT NOT NULL DEFAULT '',
            company       TEXT NOT NULL DEFAULT '',
            tenant_id     TEXT
        );

        CREATE TABLE IF NOT EXISTS queues (
            id            TEXT PRIMARY KEY,
            driver_id     TEXT NOT NULL,
            period        TEXT NOT NULL CHECK(period IN ('Manhã','Tarde')),
            arrival_time  INTEGER NOT NULL,
            tenant_id     TEXT,
            UNIQUE(driver_id, period)
        );

        CREATE TABLE IF NOT EXISTS exit_logs (
            id            TEXT PRIMARY KEY,
            driver_id     TEXT NOT NULL,
            name          TEXT NOT NULL,
            fleet_number  TEXT NOT NULL DEFAULT '',
            registration  TEXT NOT NULL DEFAULT '',
            company       TEXT NOT NULL DEFAULT '',
            zone          TEXT NOT NULL,
            dt_number     TEXT NOT NULL DEFAULT '',
            orders_count  INTEGER NOT NULL DEFAULT 1 CHECK(orders_count >= 0),
            period        TEXT NOT NULL CHECK(period IN ('Manhã','Tarde')),
            exit_time     INTEGER NOT NULL,
            date          TEXT NOT NULL,
            tenant_id     TEXT
        );

        CREATE TABLE IF NOT EXISTS operator_access (
            id            TEXT PRIMARY KEY,
            pin           TEXT NOT NULL UNIQUE,
            label         TEXT NOT NULL,
            tenant_id     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_drivers_name ON drivers(name);
        CREATE INDEX IF NOT EXISTS idx_queues_period_rank ON queues(period, arrival_time);
        CREATE INDEX IF NOT EXISTS idx_exit_logs_date ON exit_logs(date);
        CREATE INDEX IF NOT EXISTS idx_exit_logs_driver ON exit_logs(driver_id, exit_time);

        COMMIT;
        "#,
    )
    .map_err(|e| AppError::Migration(format!("{version}: {e}")))?;

    mark_applied(conn, version, "Created drivers, queues, exit_logs, operator_access")
}

/// Trigger SQL announcing one kind of write on one table.
fn trigger_sql(table: &str, op: &str) -> String {
    let row = if op == "DELETE" { "OLD" } else { "NEW" };
    format!(
        "CREATE TRIGGER IF NOT EXISTS trg_{table}_{lower}
         AFTER {op} ON {table}
         BEGIN
            INSERT INTO change_feed (table_name, op, tenant_id)
            VALUES ('{table}', '{op}', {row}.tenant_id);
         END;",
        lower = op.to_lowercase(),
    )
}

/// Change feed consumed by `watch`: one row per insert/update/delete.
fn create_change_feed(conn: &Connection) -> AppResult<()> {
    let version = "20250301_0002_create_change_feed";
    if is_applied(conn, version)? {
        return Ok(());
    }

    let mut sql = String::from(
        r#"
        BEGIN;
        CREATE TABLE IF NOT EXISTS change_feed (
            seq         INTEGER PRIMARY KEY AUTOINCREMENT,
            table_name  TEXT NOT NULL,
            op          TEXT NOT NULL,
            tenant_id   TEXT,
            at          TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        "#,
    );

    for table in WATCHED_TABLES {
        for op in ["INSERT", "UPDATE", "DELETE"] {
            sql.push_str(&trigger_sql(table, op));
            sql.push('\n');
        }
    }
    sql.push_str("COMMIT;");

    conn.execute_batch(&sql)
        .map_err(|e| AppError::Migration(format!("{version}: {e}")))?;

    mark_applied(conn, version, "Created change_feed and write triggers")
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_audit_table(conn)?;
    create_core_tables(conn)?;
    create_change_feed(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM audit_log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, 2);
    }

    #[test]
    fn writes_reach_the_change_feed() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        conn.execute(
            "INSERT INTO drivers (id, name, tenant_id) VALUES ('d1', 'ANA', 't1')",
            [],
        )
        .unwrap();
        conn.execute("DELETE FROM drivers WHERE id = 'd1'", []).unwrap();

        let ops: Vec<(String, Option<String>)> = conn
            .prepare("SELECT op, tenant_id FROM change_feed ORDER BY seq")
            .unwrap()
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(
            ops,
            vec![
                ("INSERT".to_string(), Some("t1".to_string())),
                ("DELETE".to_string(), Some("t1".to_string())),
            ]
        );
    }
}
