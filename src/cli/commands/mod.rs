pub mod auth;
pub mod board;
pub mod config;
pub mod driver;
pub mod exit;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod purge;
pub mod queue;
pub mod report;
pub mod tenant;

use crate::cli::parser::WindowArgs;
use crate::config::Config;
use crate::core::auth::{AuthLogic, SessionStore};
use crate::core::reports::resolve_window;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Period, Scope, Session};
use crate::utils::date::today;
use chrono::NaiveDate;

/// Parse a `--period` value (manha / m / tarde / t ...).
pub(crate) fn period_arg(raw: &str) -> AppResult<Period> {
    Period::from_code(raw).ok_or_else(|| AppError::InvalidPeriod(raw.to_string()))
}

pub(crate) fn session_store(cfg: &Config) -> SessionStore {
    SessionStore::new(cfg.session_file())
}

/// Gate for every operational command: a session is required.
pub(crate) fn require_session(cfg: &Config) -> AppResult<(Session, Scope)> {
    let session = AuthLogic::require(&session_store(cfg))?;
    let scope = session.scope();
    ::log::debug!("session '{}' with scope {:?}", session.label(), scope);
    Ok((session, scope))
}

pub(crate) fn require_admin(cfg: &Config) -> AppResult<Session> {
    AuthLogic::require_admin(&session_store(cfg))
}

/// Open the configured database, creating the schema on first use.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    DbPool::open(&cfg.database)
}

pub(crate) fn window(w: &WindowArgs, default_days: i64) -> AppResult<(NaiveDate, NaiveDate)> {
    resolve_window(
        w.from.as_deref(),
        w.to.as_deref(),
        w.range.as_deref(),
        default_days,
        today(),
    )
}
