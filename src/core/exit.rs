use crate::core::queue::index_of_position;
use crate::db::exit_logs::insert_log;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queues::{delete_entry, load_queue};
use crate::errors::{AppError, AppResult};
use crate::models::{ExitDetails, ExitLog, Period, Scope};
use chrono::{DateTime, Local};

/// Exit recording: the queued driver leaves with delivery metadata.
pub struct ExitLogic;

impl ExitLogic {
    /// Record the exit of the driver at `position` (1 = head of the queue).
    ///
    /// The log insert and the queue delete share one transaction: if either
    /// fails the queue row stays where it was.
    pub fn record(
        pool: &mut DbPool,
        scope: &Scope,
        period: Period,
        position: usize,
        details: ExitDetails,
        now: DateTime<Local>,
    ) -> AppResult<ExitLog> {
        if details.orders_count < 0 {
            return Err(AppError::Other(format!(
                "o número de volumes não pode ser negativo: {}",
                details.orders_count
            )));
        }

        let queue = load_queue(&pool.conn, scope, period)?;
        if queue.is_empty() {
            return Err(AppError::EmptyQueue(period.label().to_string()));
        }
        let idx = index_of_position(&queue, position)?;
        let entry = &queue[idx];

        let log = ExitLog::from_entry(entry, details, now);

        let tx = pool.conn.transaction()?;
        insert_log(&tx, &log)?;
        if delete_entry(&tx, &entry.queue_id)? != 1 {
            // somebody else already dispatched this driver
            return Err(AppError::QueueEntryNotFound(entry.queue_id.clone()));
        }
        tx.commit()?;

        audit_quiet(
            &pool.conn,
            "exit",
            &log.name,
            &format!(
                "{} exit to {} (DT {}, {} volumes)",
                period, log.zone, log.dt_number, log.orders_count
            ),
        );

        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::queue::QueueLogic;
    use crate::db::drivers::insert_driver;
    use crate::db::exit_logs::recent_logs;
    use crate::models::{Driver, NewDriver};
    use chrono::TimeZone;

    fn details(orders: i64) -> ExitDetails {
        ExitDetails {
            zone: "SUL".into(),
            dt_number: "DT-778".into(),
            orders_count: orders,
        }
    }

    fn setup() -> (DbPool, Vec<Driver>) {
        let pool = DbPool::in_memory().unwrap();
        let drivers: Vec<Driver> = ["Ana", "Bruno"]
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let d = Driver::new(
                    NewDriver {
                        name: n.to_string(),
                        fleet_number: format!("F-{i}"),
                        registration: format!("REG{i}"),
                        company: "INNOVATIVE".into(),
                    },
                    None,
                );
                insert_driver(&pool.conn, &d).unwrap();
                QueueLogic::add(&pool, &Scope::All, &d, Period::Morning, i as i64).unwrap();
                d
            })
            .collect();
        (pool, drivers)
    }

    #[test]
    fn head_exit_moves_one_row_from_queue_to_log() {
        let (mut pool, drivers) = setup();
        let now = Local.with_ymd_and_hms(2025, 3, 10, 8, 45, 0).unwrap();

        let log = ExitLogic::record(&mut pool, &Scope::All, Period::Morning, 1, details(5), now)
            .unwrap();

        let queue = QueueLogic::load(&pool, &Scope::All, Period::Morning).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].driver.name, "Bruno");

        let logs = recent_logs(&pool.conn, &Scope::All, 10).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0], log);

        let ana = &drivers[0];
        assert_eq!(log.driver_id, ana.id);
        assert_eq!(log.name, ana.name);
        assert_eq!(log.fleet_number, ana.fleet_number);
        assert_eq!(log.registration, ana.registration);
        assert_eq!(log.company, ana.company);
        assert_eq!(log.orders_count, 5);
        assert_eq!(log.date.to_string(), "2025-03-10");
        assert_eq!(log.hour_str(), "08:45");
    }

    #[test]
    fn empty_queue_is_reported() {
        let mut pool = DbPool::in_memory().unwrap();
        let err = ExitLogic::record(
            &mut pool,
            &Scope::All,
            Period::Afternoon,
            1,
            details(1),
            Local::now(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::EmptyQueue(_)));
    }

    #[test]
    fn failed_exit_leaves_queue_untouched() {
        let (mut pool, _) = setup();
        let err = ExitLogic::record(
            &mut pool,
            &Scope::All,
            Period::Morning,
            1,
            details(-3),
            Local::now(),
        );
        assert!(err.is_err());
        assert_eq!(
            QueueLogic::load(&pool, &Scope::All, Period::Morning).unwrap().len(),
            2
        );
        assert!(recent_logs(&pool.conn, &Scope::All, 10).unwrap().is_empty());
    }
}
