use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::audit::AuditLogic;
use crate::errors::AppResult;

use super::{open_pool, require_admin};

/// `log --print` shows the audit trail of every tenant, so it is admin-only.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        require_admin(cfg)?;
        let pool = open_pool(cfg)?;
        AuditLogic::print_log(&pool)?;
    }

    Ok(())
}
