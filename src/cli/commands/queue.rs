use crate::cli::parser::{Commands, QueueCmd};
use crate::config::Config;
use crate::core::drivers::DriverLogic;
use crate::core::queue::QueueLogic;
use crate::errors::AppResult;
use crate::models::{Period, QueueEntry};
use crate::ui::board::render_queue;
use crate::ui::messages::success;
use crate::utils::colors::Palette;
use crate::utils::date::now_ms;

use super::{open_pool, period_arg, require_session};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Queue { action } = cmd {
        let (_, scope) = require_session(cfg)?;
        let mut pool = open_pool(cfg)?;
        let palette = Palette::new(cfg.dark_mode);

        let show = |period: Period, entries: &[QueueEntry]| {
            print!("{}", render_queue(period, entries, &palette));
        };

        match action {
            QueueCmd::Add { reference, period } => {
                let period = period_arg(period)?;
                let driver = DriverLogic::find(&pool, &scope, reference)?;
                QueueLogic::add(&pool, &scope, &driver, period, now_ms())?;
                success(format!("'{}' entrou na fila {}.", driver.name, period));
                show(period, &QueueLogic::load(&pool, &scope, period)?);
            }

            QueueCmd::Remove { period, pos } => {
                let period = period_arg(period)?;
                let removed = QueueLogic::remove_at(&pool, &scope, period, *pos)?;
                success(format!("'{}' removido da fila {}.", removed.driver.name, period));
                show(period, &QueueLogic::load(&pool, &scope, period)?);
            }

            QueueCmd::Move { period, from, to } => {
                let period = period_arg(period)?;
                let q = QueueLogic::move_entry(&mut pool, &scope, period, *from, *to, now_ms())?;
                show(period, &q);
            }

            QueueCmd::Top { period, pos } => {
                let period = period_arg(period)?;
                let q = QueueLogic::promote_to_top(&mut pool, &scope, period, *pos, now_ms())?;
                show(period, &q);
            }

            QueueCmd::Up { period, pos } => {
                let period = period_arg(period)?;
                let q = QueueLogic::promote_one(&mut pool, &scope, period, *pos, now_ms())?;
                show(period, &q);
            }

            QueueCmd::Show { period } => {
                let periods = match period {
                    Some(p) => vec![period_arg(p)?],
                    None => Period::ALL.to_vec(),
                };
                for p in periods {
                    show(p, &QueueLogic::load(&pool, &scope, p)?);
                }
            }
        }
    }
    Ok(())
}
