//! Session / tenant gate.

use crate::db::log::audit_quiet;
use crate::db::operators::{find_by_pin, insert_operator, list_operators};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{GuestSession, OperatorAccess, Session};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Persists the current session as JSON, the way the browser terminal kept
/// it in local storage.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file means nobody is logged in. An unreadable one is
    /// treated the same way, after a warning.
    pub fn load(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Session>(&content) {
            Ok(Session::Guest(g)) if !g.authenticated => None,
            Ok(s) => Some(s),
            Err(e) => {
                log::warn!("ignoring corrupt session file {}: {e}", self.path.display());
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    /// Returns true if a session was removed.
    pub fn clear(&self) -> AppResult<bool> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

pub struct AuthLogic;

impl AuthLogic {
    /// PIN login: exact match against `operator_access`.
    pub fn login_with_pin(pool: &DbPool, pin: &str, now_ms: i64) -> AppResult<Session> {
        if pin.is_empty() {
            return Err(AppError::InvalidPin);
        }

        let op = find_by_pin(&pool.conn, pin)?.ok_or(AppError::InvalidPin)?;

        audit_quiet(&pool.conn, "login", &op.label, "Guest session opened");

        Ok(Session::Guest(GuestSession {
            authenticated: true,
            label: op.label,
            tenant_id: op.tenant_id,
            login_time: now_ms,
        }))
    }

    /// Administrator login. Identity is delegated to whoever controls the
    /// database file, there is no secret to check locally.
    pub fn login_admin(pool: &DbPool, user: &str, now_ms: i64) -> Session {
        audit_quiet(&pool.conn, "login", user, "Administrator session opened");
        Session::Admin {
            user: user.to_string(),
            login_time: now_ms,
        }
    }

    pub fn require(store: &SessionStore) -> AppResult<Session> {
        store.load().ok_or(AppError::NotAuthenticated)
    }

    pub fn require_admin(store: &SessionStore) -> AppResult<Session> {
        let s = Self::require(store)?;
        if s.is_admin() {
            Ok(s)
        } else {
            Err(AppError::Forbidden)
        }
    }
}

pub struct TenantLogic;

impl TenantLogic {
    /// Create a tenant workspace reachable with `pin`.
    pub fn create(pool: &DbPool, label: &str, pin: &str) -> AppResult<OperatorAccess> {
        let label = label.trim();
        if label.is_empty() {
            return Err(AppError::Other("o nome do inquilino não pode ser vazio".into()));
        }
        if pin.is_empty() {
            return Err(AppError::InvalidPin);
        }
        if find_by_pin(&pool.conn, pin)?.is_some() {
            return Err(AppError::DuplicatePin);
        }

        let op = OperatorAccess {
            id: Uuid::new_v4().to_string(),
            pin: pin.to_string(),
            label: label.to_string(),
            tenant_id: Uuid::new_v4().to_string(),
        };
        insert_operator(&pool.conn, &op)?;

        audit_quiet(&pool.conn, "tenant_add", &op.label, &format!("tenant {}", op.tenant_id));
        Ok(op)
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<OperatorAccess>> {
        list_operators(&pool.conn)
    }
}
