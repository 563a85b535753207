use crate::db::drivers::{
    delete_driver_cascade, delete_logs_of_driver, find_driver, insert_driver, load_drivers,
    update_driver,
};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{Driver, DriverUpdate, NewDriver, Scope};

pub struct DriverLogic;

impl DriverLogic {
    pub fn register(pool: &DbPool, scope: &Scope, input: NewDriver) -> AppResult<Driver> {
        if input.name.trim().is_empty() {
            return Err(AppError::Other("o nome do motorista não pode ser vazio".into()));
        }

        let driver = Driver::new(input, scope.tenant_id().map(String::from));
        insert_driver(&pool.conn, &driver)?;

        audit_quiet(
            &pool.conn,
            "driver_add",
            &driver.name,
            &format!("fleet {} / {}", driver.fleet_number, driver.company),
        );
        Ok(driver)
    }

    pub fn find(pool: &DbPool, scope: &Scope, reference: &str) -> AppResult<Driver> {
        find_driver(&pool.conn, scope, reference)
    }

    /// Alphabetical list, optionally filtered by a case-insensitive name substring.
    pub fn list(pool: &DbPool, scope: &Scope, search: Option<&str>) -> AppResult<Vec<Driver>> {
        let all = load_drivers(&pool.conn, scope)?;
        Ok(match search.map(|s| s.trim().to_lowercase()) {
            Some(needle) if !needle.is_empty() => all
                .into_iter()
                .filter(|d| d.name.to_lowercase().contains(&needle))
                .collect(),
            _ => all,
        })
    }

    pub fn update(
        pool: &DbPool,
        scope: &Scope,
        reference: &str,
        changes: &DriverUpdate,
    ) -> AppResult<Driver> {
        let mut driver = find_driver(&pool.conn, scope, reference)?;
        if changes.is_empty() {
            return Ok(driver);
        }

        changes.apply(&mut driver);
        if driver.name.is_empty() {
            return Err(AppError::Other("o nome do motorista não pode ser vazio".into()));
        }
        update_driver(&pool.conn, &driver)?;

        audit_quiet(&pool.conn, "driver_edit", &driver.name, "Driver updated");
        Ok(driver)
    }

    /// Delete the driver, its queue rows and its whole exit history.
    pub fn delete(pool: &mut DbPool, scope: &Scope, reference: &str) -> AppResult<Driver> {
        let driver = find_driver(&pool.conn, scope, reference)?;
        let (q, l, _) = delete_driver_cascade(&mut pool.conn, &driver.id)?;

        audit_quiet(
            &pool.conn,
            "driver_del",
            &driver.name,
            &format!("Deleted with {q} queue rows and {l} exit logs"),
        );
        Ok(driver)
    }

    /// Drop the exit history of one driver, keeping the driver.
    pub fn clear_logs(pool: &DbPool, scope: &Scope, reference: &str) -> AppResult<(Driver, usize)> {
        let driver = find_driver(&pool.conn, scope, reference)?;
        let n = delete_logs_of_driver(&pool.conn, &driver.id)?;

        audit_quiet(&pool.conn, "driver_clear_logs", &driver.name, &format!("{n} exit logs removed"));
        Ok((driver, n))
    }
}
