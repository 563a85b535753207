pub mod audit;
pub mod auth;
pub mod drivers;
pub mod exit;
pub mod purge;
pub mod queue;
pub mod reports;
pub mod sync;
