use crate::errors::AppResult;
use crate::models::Scope;
use rusqlite::Connection;

/// Rows removed by a purge, per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeCounts {
    pub queues: usize,
    pub exit_logs: usize,
    pub drivers: usize,
}

/// Delete every operational row visible in `scope`.
/// Tenant PINs and the audit trail are kept.
pub fn purge_operational(conn: &mut Connection, scope: &Scope) -> AppResult<PurgeCounts> {
    let tenant = scope.tenant_id();
    let tx = conn.transaction()?;

    let counts = PurgeCounts {
        queues: tx.execute("DELETE FROM queues WHERE (?1 IS NULL OR tenant_id = ?1)", [tenant])?,
        exit_logs: tx.execute(
            "DELETE FROM exit_logs WHERE (?1 IS NULL OR tenant_id = ?1)",
            [tenant],
        )?,
        drivers: tx.execute("DELETE FROM drivers WHERE (?1 IS NULL OR tenant_id = ?1)", [tenant])?,
    };

    tx.commit()?;
    Ok(counts)
}
