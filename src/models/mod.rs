pub mod driver;
pub mod exit_log;
pub mod operator;
pub mod period;
pub mod queue_entry;
pub mod session;

pub use driver::{Driver, DriverUpdate, NewDriver};
pub use exit_log::{ExitDetails, ExitLog};
pub use operator::OperatorAccess;
pub use period::Period;
pub use queue_entry::QueueEntry;
pub use session::{GuestSession, Scope, Session};
