use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::exit::ExitLogic;
use crate::errors::AppResult;
use crate::models::ExitDetails;
use crate::ui::messages::success;
use chrono::Local;

use super::{open_pool, period_arg, require_session};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Exit {
        period,
        zone,
        dt,
        orders,
        pos,
    } = cmd
    {
        let (_, scope) = require_session(cfg)?;
        let period = period_arg(period)?;
        let zone = cfg.normalize_zone(zone)?;

        let mut pool = open_pool(cfg)?;
        let log = ExitLogic::record(
            &mut pool,
            &scope,
            period,
            *pos,
            ExitDetails {
                zone,
                dt_number: dt.clone(),
                orders_count: *orders,
            },
            Local::now(),
        )?;

        success(format!(
            "🚚 {} saiu às {} → {} (DT {}, {} volumes)",
            log.name,
            log.hour_str(),
            log.zone,
            log.dt_number,
            log.orders_count
        ));
    }
    Ok(())
}
