use crate::cli::parser::{Commands, ReportCmd};
use crate::config::Config;
use crate::core::reports::ReportLogic;
use crate::errors::AppResult;
use crate::ui::board::{render_daily, render_frequency, render_productivity};
use crate::utils::colors::Palette;
use crate::utils::date::today;

use super::{open_pool, require_session, window};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { action } = cmd {
        let (_, scope) = require_session(cfg)?;
        let pool = open_pool(cfg)?;
        let palette = Palette::new(cfg.dark_mode);

        match action {
            ReportCmd::Daily => {
                let day = today();
                let logs = ReportLogic::daily(&pool, &scope, day)?;
                print!("{}", render_daily(&logs, day, &palette));
            }

            ReportCmd::Productivity {
                reference,
                window: w,
            } => {
                let (start, end) = window(w, cfg.productivity_default_days)?;
                let (driver, _, stats) =
                    ReportLogic::productivity(&pool, &scope, reference, start, end)?;
                print!("{}", render_productivity(&driver, &stats, start, end));
            }

            ReportCmd::Frequency => {
                let boards =
                    ReportLogic::frequency(&pool, &scope, today(), &cfg.tracked_companies)?;
                print!("{}", render_frequency(&boards, &palette));
            }
        }
    }
    Ok(())
}
