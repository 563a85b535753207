use super::{driver::Driver, period::Period};
use serde::Serialize;

/// A driver waiting in one of the period queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueEntry {
    pub queue_id: String,
    pub driver: Driver,
    /// Sort key only. After a manual reorder it is no longer a wall-clock time.
    pub arrival_time: i64,
    pub period: Period,
    pub tenant_id: Option<String>,
}
