//! Two-step confirmation for the destructive purge.
//!
//! The one-time code is generated and checked locally. It is friction against
//! accidental activation, not a security boundary.

use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::purge::{PurgeCounts, purge_operational};
use crate::errors::AppResult;
use crate::models::Scope;
use rand::Rng;

pub const CODE_MIN: u32 = 100_000;
pub const CODE_MAX: u32 = 999_999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeChallenge {
    pub code: String,
    pub issued_at: i64,
    /// Milliseconds since the Unix epoch
    pub expires_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    Confirmed,
    Expired,
    Mismatch,
}

impl PurgeChallenge {
    pub fn issue(now_ms: i64, ttl_secs: i64) -> Self {
        Self::issue_with(&mut rand::rng(), now_ms, ttl_secs)
    }

    pub fn issue_with<R: Rng + ?Sized>(rng: &mut R, now_ms: i64, ttl_secs: i64) -> Self {
        let code = rng.random_range(CODE_MIN..=CODE_MAX);
        Self {
            code: code.to_string(),
            issued_at: now_ms,
            expires_at: now_ms + ttl_secs * 1000,
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }

    /// Whole seconds left, rounded up, as shown on the countdown.
    pub fn remaining_secs(&self, now_ms: i64) -> i64 {
        let left = self.expires_at - now_ms;
        if left <= 0 { 0 } else { (left + 999) / 1000 }
    }

    /// Expiry is checked first: the right code after the deadline is still rejected.
    pub fn verify(&self, input: &str, now_ms: i64) -> PurgeOutcome {
        if self.is_expired(now_ms) {
            PurgeOutcome::Expired
        } else if input.trim() == self.code {
            PurgeOutcome::Confirmed
        } else {
            PurgeOutcome::Mismatch
        }
    }

    /// A fresh challenge after an expired or mismatched attempt.
    pub fn regenerate(&self, now_ms: i64) -> Self {
        let ttl_secs = (self.expires_at - self.issued_at) / 1000;
        Self::issue(now_ms, ttl_secs)
    }
}

pub struct PurgeLogic;

impl PurgeLogic {
    /// Delete every queue row, exit log and driver visible in `scope`.
    pub fn execute(pool: &mut DbPool, scope: &Scope) -> AppResult<PurgeCounts> {
        let counts = purge_operational(&mut pool.conn, scope)?;

        audit_quiet(
            &pool.conn,
            "purge",
            scope.tenant_id().unwrap_or("all tenants"),
            &format!(
                "Removed {} queue rows, {} exit logs, {} drivers",
                counts.queues, counts.exit_logs, counts.drivers
            ),
        );

        Ok(counts)
    }
}
