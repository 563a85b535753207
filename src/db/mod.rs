pub mod changes;
pub mod drivers;
pub mod exit_logs;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod operators;
pub mod pool;
pub mod purge;
pub mod queues;

use crate::errors::AppError;

/// Wrap a domain parse failure into a rusqlite conversion error so it can be
/// raised from inside a row mapper.
pub(crate) fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}
