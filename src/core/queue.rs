//! Queue ordering.
//!
//! Order inside a period is derived from `arrival_time`. Every manual
//! reorder rewrites the rank of each element to `base + index`, so the stored
//! sequence is always strictly increasing in the requested order.

use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queues::{delete_entry, insert_entry, is_queued, load_queue, max_rank, update_rank};
use crate::errors::{AppError, AppResult};
use crate::models::{Driver, Period, QueueEntry, Scope};
use uuid::Uuid;

/// Drag-and-drop: take the element at `from` and drop it at `to`.
/// Elements in between shift by one. Indices are 0-based.
pub fn splice_move<T: Clone>(list: &[T], from: usize, to: usize) -> AppResult<Vec<T>> {
    if from >= list.len() {
        return Err(AppError::InvalidPosition((from + 1).to_string()));
    }
    if to >= list.len() {
        return Err(AppError::InvalidPosition((to + 1).to_string()));
    }

    let mut out = list.to_vec();
    let item = out.remove(from);
    out.insert(to, item);
    Ok(out)
}

/// Put the element at `index` first, keeping everybody else in order.
pub fn move_to_top<T: Clone>(list: &[T], index: usize) -> AppResult<Vec<T>> {
    splice_move(list, index, 0)
}

/// Swap the element at `index` with its predecessor. No-op at the head.
pub fn move_up<T: Clone>(list: &[T], index: usize) -> AppResult<Vec<T>> {
    if index >= list.len() {
        return Err(AppError::InvalidPosition((index + 1).to_string()));
    }

    let mut out = list.to_vec();
    if index > 0 {
        out.swap(index, index - 1);
    }
    Ok(out)
}

/// Ranks for a new order: `base + i`.
pub fn assign_ranks(order: &[QueueEntry], base: i64) -> Vec<(String, i64)> {
    order
        .iter()
        .enumerate()
        .map(|(i, e)| (e.queue_id.clone(), base + i as i64))
        .collect()
}

/// Rank for a newly queued driver. Always after the current tail, even when
/// a reorder pushed ranks past the clock or two adds share a millisecond.
pub fn next_rank(current_max: Option<i64>, now_ms: i64) -> i64 {
    match current_max {
        Some(max) if max >= now_ms => max + 1,
        _ => now_ms,
    }
}

/// Convert a 1-based CLI position into an index of `list`.
pub fn index_of_position<T>(list: &[T], position: usize) -> AppResult<usize> {
    if position == 0 || position > list.len() {
        return Err(AppError::InvalidPosition(position.to_string()));
    }
    Ok(position - 1)
}

pub struct QueueLogic;

impl QueueLogic {
    pub fn load(pool: &DbPool, scope: &Scope, period: Period) -> AppResult<Vec<QueueEntry>> {
        load_queue(&pool.conn, scope, period)
    }

    /// Append a driver to the tail of the period queue.
    ///
    /// The row belongs to the driver's tenant, whoever queues it.
    pub fn add(
        pool: &DbPool,
        scope: &Scope,
        driver: &Driver,
        period: Period,
        now_ms: i64,
    ) -> AppResult<QueueEntry> {
        if is_queued(&pool.conn, &driver.id, period)? {
            return Err(AppError::AlreadyQueued(
                driver.name.clone(),
                period.label().to_string(),
            ));
        }

        let rank = next_rank(max_rank(&pool.conn, scope, period)?, now_ms);
        let queue_id = Uuid::new_v4().to_string();

        insert_entry(
            &pool.conn,
            &queue_id,
            &driver.id,
            period,
            rank,
            driver.tenant_id.as_deref(),
        )?;

        audit_quiet(
            &pool.conn,
            "queue_add",
            &driver.name,
            &format!("Queued for {} with rank {}", period, rank),
        );

        Ok(QueueEntry {
            queue_id,
            driver: driver.clone(),
            arrival_time: rank,
            period,
            tenant_id: driver.tenant_id.clone(),
        })
    }

    /// Persist `new_order` by rewriting every rank, then re-fetch.
    ///
    /// There is no version check: a concurrent reorder from another terminal
    /// is simply overwritten (last write wins).
    pub fn apply_order(
        pool: &mut DbPool,
        scope: &Scope,
        period: Period,
        new_order: &[QueueEntry],
        base: i64,
    ) -> AppResult<Vec<QueueEntry>> {
        let ranks = assign_ranks(new_order, base);

        let tx = pool.conn.transaction()?;
        for (queue_id, rank) in &ranks {
            update_rank(&tx, queue_id, *rank)?;
        }
        tx.commit()?;

        log::debug!("reordered {} entries of {}", ranks.len(), period);
        load_queue(&pool.conn, scope, period)
    }

    /// Drag the entry at position `from` (1-based) to position `to`.
    pub fn move_entry(
        pool: &mut DbPool,
        scope: &Scope,
        period: Period,
        from: usize,
        to: usize,
        now_ms: i64,
    ) -> AppResult<Vec<QueueEntry>> {
        let current = load_queue(&pool.conn, scope, period)?;
        let from_idx = index_of_position(&current, from)?;
        let to_idx = index_of_position(&current, to)?;
        let new_order = splice_move(&current, from_idx, to_idx)?;

        audit_quiet(
            &pool.conn,
            "queue_move",
            &current[from_idx].driver.name,
            &format!("{}: position {} -> {}", period, from, to),
        );

        Self::apply_order(pool, scope, period, &new_order, now_ms)
    }

    pub fn promote_to_top(
        pool: &mut DbPool,
        scope: &Scope,
        period: Period,
        position: usize,
        now_ms: i64,
    ) -> AppResult<Vec<QueueEntry>> {
        let current = load_queue(&pool.conn, scope, period)?;
        let idx = index_of_position(&current, position)?;
        let new_order = move_to_top(&current, idx)?;

        audit_quiet(
            &pool.conn,
            "queue_top",
            &current[idx].driver.name,
            &format!("{}: moved to the head from position {}", period, position),
        );

        Self::apply_order(pool, scope, period, &new_order, now_ms)
    }

    pub fn promote_one(
        pool: &mut DbPool,
        scope: &Scope,
        period: Period,
        position: usize,
        now_ms: i64,
    ) -> AppResult<Vec<QueueEntry>> {
        let current = load_queue(&pool.conn, scope, period)?;
        let idx = index_of_position(&current, position)?;
        if idx == 0 {
            return Ok(current);
        }
        let new_order = move_up(&current, idx)?;

        audit_quiet(
            &pool.conn,
            "queue_up",
            &current[idx].driver.name,
            &format!("{}: position {} -> {}", period, position, position - 1),
        );

        Self::apply_order(pool, scope, period, &new_order, now_ms)
    }

    /// Remove the entry at a 1-based position.
    pub fn remove_at(
        pool: &DbPool,
        scope: &Scope,
        period: Period,
        position: usize,
    ) -> AppResult<QueueEntry> {
        let current = load_queue(&pool.conn, scope, period)?;
        let idx = index_of_position(&current, position)?;
        let target = current[idx].clone();

        if delete_entry(&pool.conn, &target.queue_id)? == 0 {
            return Err(AppError::QueueEntryNotFound(target.queue_id));
        }

        audit_quiet(
            &pool.conn,
            "queue_remove",
            &target.driver.name,
            &format!("Removed from {} (position {})", period, position),
        );

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::drivers::insert_driver;
    use crate::models::NewDriver;

    fn names(list: &[QueueEntry]) -> Vec<String> {
        list.iter().map(|e| e.driver.name.clone()).collect()
    }

    fn strictly_increasing(list: &[QueueEntry]) -> bool {
        list.windows(2).all(|w| w[0].arrival_time < w[1].arrival_time)
    }

    fn seed(pool: &DbPool, who: &[&str]) -> Vec<Driver> {
        who.iter()
            .map(|n| {
                let d = Driver::new(
                    NewDriver {
                        name: n.to_string(),
                        fleet_number: format!("F-{n}"),
                        ..Default::default()
                    },
                    None,
                );
                insert_driver(&pool.conn, &d).unwrap();
                d
            })
            .collect()
    }

    #[test]
    fn splice_shifts_intervening_elements() {
        let v = vec!['a', 'b', 'c', 'd'];
        assert_eq!(splice_move(&v, 3, 1).unwrap(), vec!['a', 'd', 'b', 'c']);
        assert_eq!(splice_move(&v, 0, 2).unwrap(), vec!['b', 'c', 'a', 'd']);
        assert!(splice_move(&v, 4, 0).is_err());
    }

    #[test]
    fn top_and_up_keep_relative_order_of_others() {
        let v = vec![1, 2, 3, 4];
        assert_eq!(move_to_top(&v, 2).unwrap(), vec![3, 1, 2, 4]);
        assert_eq!(move_up(&v, 2).unwrap(), vec![1, 3, 2, 4]);
        assert_eq!(move_up(&v, 0).unwrap(), v);
    }

    #[test]
    fn next_rank_never_lands_before_the_tail() {
        assert_eq!(next_rank(None, 1_000), 1_000);
        assert_eq!(next_rank(Some(900), 1_000), 1_000);
        assert_eq!(next_rank(Some(1_000), 1_000), 1_001);
        assert_eq!(next_rank(Some(5_000), 1_000), 5_001);
    }

    #[test]
    fn positions_are_one_based() {
        let v = vec![10, 20];
        assert_eq!(index_of_position(&v, 1).unwrap(), 0);
        assert!(index_of_position(&v, 0).is_err());
        assert!(index_of_position(&v, 3).is_err());
    }

    #[test]
    fn add_then_drag_second_to_head() {
        let mut pool = DbPool::in_memory().unwrap();
        let d = seed(&pool, &["A", "B"]);

        let empty = QueueLogic::load(&pool, &Scope::All, Period::Morning).unwrap();
        assert!(empty.is_empty());

        // both adds in the same millisecond still keep insertion order
        QueueLogic::add(&pool, &Scope::All, &d[0], Period::Morning, 1_000).unwrap();
        QueueLogic::add(&pool, &Scope::All, &d[1], Period::Morning, 1_000).unwrap();

        let q = QueueLogic::load(&pool, &Scope::All, Period::Morning).unwrap();
        assert_eq!(names(&q), vec!["A", "B"]);

        let q = QueueLogic::move_entry(&mut pool, &Scope::All, Period::Morning, 2, 1, 2_000)
            .unwrap();
        assert_eq!(names(&q), vec!["B", "A"]);
        assert!(q[0].arrival_time < q[1].arrival_time);
    }

    #[test]
    fn reorders_keep_ranks_strictly_increasing() {
        let mut pool = DbPool::in_memory().unwrap();
        let d = seed(&pool, &["A", "B", "C", "D", "E"]);
        for (i, drv) in d.iter().enumerate() {
            QueueLogic::add(&pool, &Scope::All, drv, Period::Afternoon, 100 + i as i64).unwrap();
        }

        let q = QueueLogic::promote_to_top(&mut pool, &Scope::All, Period::Afternoon, 4, 50)
            .unwrap();
        assert_eq!(names(&q), vec!["D", "A", "B", "C", "E"]);
        assert!(strictly_increasing(&q));

        let q = QueueLogic::promote_one(&mut pool, &Scope::All, Period::Afternoon, 5, 60)
            .unwrap();
        assert_eq!(names(&q), vec!["D", "A", "B", "E", "C"]);
        assert!(strictly_increasing(&q));

        // a later add still goes last, even with ranks rewritten below the clock
        let late = seed(&pool, &["F"]);
        QueueLogic::add(&pool, &Scope::All, &late[0], Period::Afternoon, 10).unwrap();
        let q = QueueLogic::load(&pool, &Scope::All, Period::Afternoon).unwrap();
        assert_eq!(q.last().unwrap().driver.name, "F");
        assert!(strictly_increasing(&q));
    }

    #[test]
    fn admin_queues_land_in_the_driver_tenant() {
        let mut pool = DbPool::in_memory().unwrap();
        let tenant = Scope::Tenant("t1".into());
        let ana = Driver::new(
            NewDriver {
                name: "Ana".into(),
                ..Default::default()
            },
            Some("t1".into()),
        );
        insert_driver(&pool.conn, &ana).unwrap();

        let entry = QueueLogic::add(&pool, &Scope::All, &ana, Period::Morning, 1_000).unwrap();
        assert_eq!(entry.tenant_id.as_deref(), Some("t1"));

        let seen = QueueLogic::load(&pool, &tenant, Period::Morning).unwrap();
        assert_eq!(names(&seen), vec!["Ana"]);
        assert!(QueueLogic::load(&pool, &Scope::Tenant("t2".into()), Period::Morning)
            .unwrap()
            .is_empty());

        let log = crate::core::exit::ExitLogic::record(
            &mut pool,
            &tenant,
            Period::Morning,
            1,
            crate::models::ExitDetails {
                zone: "SUL".into(),
                dt_number: "DT-1".into(),
                orders_count: 2,
            },
            chrono::Local::now(),
        )
        .unwrap();
        assert_eq!(log.tenant_id.as_deref(), Some("t1"));
    }

    #[test]
    fn one_entry_per_driver_and_period() {
        let pool = DbPool::in_memory().unwrap();
        let d = seed(&pool, &["A"]);

        QueueLogic::add(&pool, &Scope::All, &d[0], Period::Morning, 1).unwrap();
        assert!(matches!(
            QueueLogic::add(&pool, &Scope::All, &d[0], Period::Morning, 2),
            Err(AppError::AlreadyQueued(_, _))
        ));
        // the other period is a separate queue
        QueueLogic::add(&pool, &Scope::All, &d[0], Period::Afternoon, 3).unwrap();
    }

    #[test]
    fn remove_by_position() {
        let pool = DbPool::in_memory().unwrap();
        let d = seed(&pool, &["A", "B", "C"]);
        for (i, drv) in d.iter().enumerate() {
            QueueLogic::add(&pool, &Scope::All, drv, Period::Morning, i as i64).unwrap();
        }

        let removed = QueueLogic::remove_at(&pool, &Scope::All, Period::Morning, 2).unwrap();
        assert_eq!(removed.driver.name, "B");
        let q = QueueLogic::load(&pool, &Scope::All, Period::Morning).unwrap();
        assert_eq!(names(&q), vec!["A", "C"]);
        assert!(QueueLogic::remove_at(&pool, &Scope::All, Period::Morning, 3).is_err());
    }
}
