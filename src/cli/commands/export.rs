use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportTarget};

use super::{open_pool, require_session, window};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        window: w,
        filter,
        driver,
        force,
    } = cmd
    {
        let (_, scope) = require_session(cfg)?;
        let pool = open_pool(cfg)?;

        let (target, default_days) = match driver {
            Some(d) => (
                ExportTarget::Productivity { driver: d },
                cfg.productivity_default_days,
            ),
            None => (
                ExportTarget::History {
                    filter: filter.as_deref(),
                },
                cfg.history_default_days,
            ),
        };
        let (start, end) = window(w, default_days)?;

        ExportLogic::export(
            &pool,
            &scope,
            target,
            *format,
            file.as_deref(),
            start,
            end,
            *force,
        )?;
    }
    Ok(())
}
