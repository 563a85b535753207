//! Board snapshot and change polling.
//!
//! Every terminal re-reads the full board whenever the change feed reports a
//! write it has not seen yet. No incremental merge is attempted.

use crate::db::changes::{ChangeEvent, events_between, latest_seq};
use crate::db::drivers::load_drivers;
use crate::db::exit_logs::recent_logs;
use crate::db::pool::DbPool;
use crate::db::queues::load_queue;
use crate::errors::AppResult;
use crate::models::{Driver, ExitLog, Period, QueueEntry, Scope};

/// Everything the dispatch terminal shows at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub morning: Vec<QueueEntry>,
    pub afternoon: Vec<QueueEntry>,
    pub drivers: Vec<Driver>,
    pub recent: Vec<ExitLog>,
}

impl Board {
    pub fn load(pool: &DbPool, scope: &Scope, recent_limit: usize) -> AppResult<Self> {
        Ok(Self {
            morning: load_queue(&pool.conn, scope, Period::Morning)?,
            afternoon: load_queue(&pool.conn, scope, Period::Afternoon)?,
            drivers: load_drivers(&pool.conn, scope)?,
            recent: recent_logs(&pool.conn, scope, recent_limit)?,
        })
    }

    pub fn queue(&self, period: Period) -> &[QueueEntry] {
        match period {
            Period::Morning => &self.morning,
            Period::Afternoon => &self.afternoon,
        }
    }
}

/// Cursor over the `change_feed` table for one terminal.
pub struct ChangeFeed {
    scope: Scope,
    last_seq: i64,
}

impl ChangeFeed {
    /// Start listening from the current end of the feed.
    pub fn subscribe(pool: &DbPool, scope: Scope) -> AppResult<Self> {
        let last_seq = latest_seq(&pool.conn)?;
        log::debug!("subscribed to change feed at seq {last_seq}");
        Ok(Self { scope, last_seq })
    }

    pub fn last_seq(&self) -> i64 {
        self.last_seq
    }

    /// New events visible to this terminal since the previous poll.
    ///
    /// The cursor advances past events of other tenants too, so they are
    /// never re-read.
    pub fn poll(&mut self, pool: &DbPool) -> AppResult<Vec<ChangeEvent>> {
        let upto = latest_seq(&pool.conn)?;
        self.advance(pool, upto)
    }

    /// Read events up to the bound taken before the query. Writes committed
    /// after `upto` stay ahead of the cursor for the next poll.
    fn advance(&mut self, pool: &DbPool, upto: i64) -> AppResult<Vec<ChangeEvent>> {
        if upto <= self.last_seq {
            return Ok(Vec::new());
        }
        let events = events_between(&pool.conn, self.last_seq, upto, &self.scope)?;
        self.last_seq = upto;

        if !events.is_empty() {
            log::debug!("{} change(s) received, cursor at {}", events.len(), self.last_seq);
        }
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::drivers::DriverLogic;
    use crate::core::queue::QueueLogic;
    use crate::models::NewDriver;

    fn driver(pool: &DbPool, scope: &Scope, name: &str) -> Driver {
        DriverLogic::register(
            pool,
            scope,
            NewDriver {
                name: name.into(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn board_splits_queues_by_period() {
        let pool = DbPool::in_memory().unwrap();
        let a = driver(&pool, &Scope::All, "Ana");
        let b = driver(&pool, &Scope::All, "Bia");
        QueueLogic::add(&pool, &Scope::All, &a, Period::Morning, 1).unwrap();
        QueueLogic::add(&pool, &Scope::All, &b, Period::Afternoon, 2).unwrap();

        let board = Board::load(&pool, &Scope::All, 10).unwrap();
        assert_eq!(board.queue(Period::Morning).len(), 1);
        assert_eq!(board.queue(Period::Afternoon)[0].driver.name, "Bia");
        assert_eq!(board.drivers.len(), 2);
        assert!(board.recent.is_empty());
    }

    #[test]
    fn feed_reports_only_new_writes_of_own_tenant() {
        let pool = DbPool::in_memory().unwrap();
        let mine = Scope::Tenant("t1".into());
        let other = Scope::Tenant("t2".into());

        driver(&pool, &mine, "Antes");
        let mut feed = ChangeFeed::subscribe(&pool, mine.clone()).unwrap();
        assert!(feed.poll(&pool).unwrap().is_empty());

        driver(&pool, &other, "Outro");
        assert!(feed.poll(&pool).unwrap().is_empty());

        let d = driver(&pool, &mine, "Depois");
        QueueLogic::add(&pool, &mine, &d, Period::Morning, 5).unwrap();

        let events = feed.poll(&pool).unwrap();
        let tables: Vec<&str> = events.iter().map(|e| e.table_name.as_str()).collect();
        assert_eq!(tables, vec!["drivers", "queues"]);
        assert!(feed.poll(&pool).unwrap().is_empty());
    }

    #[test]
    fn write_after_the_bound_is_kept_for_the_next_poll() {
        let pool = DbPool::in_memory().unwrap();
        let mut feed = ChangeFeed::subscribe(&pool, Scope::All).unwrap();
        let start = feed.last_seq();

        driver(&pool, &Scope::All, "Ana");
        let upto = latest_seq(&pool.conn).unwrap();
        // committed between reading the bound and reading the events
        driver(&pool, &Scope::All, "Bia");

        let first = feed.advance(&pool, upto).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(feed.last_seq(), upto);
        assert!(upto > start);

        let second = feed.poll(&pool).unwrap();
        assert_eq!(second.len(), 1);
        assert!(second[0].seq > upto);
        assert!(feed.poll(&pool).unwrap().is_empty());
    }
}
