use crate::cli::parser::{Commands, HistoryCmd};
use crate::config::Config;
use crate::core::reports::ReportLogic;
use crate::errors::AppResult;
use crate::ui::board::render_history;
use crate::ui::messages::{ask_confirmation, info, success};
use std::io;

use super::{open_pool, require_session, window};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History {
        action,
        window: w,
        filter,
    } = cmd
    {
        let (_, scope) = require_session(cfg)?;
        let pool = open_pool(cfg)?;

        match action {
            None => {
                let (start, end) = window(w, cfg.history_default_days)?;
                let logs = ReportLogic::history(&pool, &scope, start, end, filter.as_deref())?;
                print!("{}", render_history(&logs, start, end));
            }

            Some(HistoryCmd::Adjust { log_id, delta }) => {
                let log = ReportLogic::adjust(&pool, &scope, log_id, *delta)?;
                success(format!(
                    "Volume de {} ({} {}) agora é {}",
                    log.name,
                    log.date_str(),
                    log.hour_str(),
                    log.orders_count
                ));
            }

            Some(HistoryCmd::Del { log_id, yes }) => {
                let prompt = format!("Excluir a saída {log_id}? Esta ação é irreversível.");
                if !*yes && !ask_confirmation(&mut io::stdin().lock(), &prompt)? {
                    info("Operação cancelada.");
                    return Ok(());
                }
                let log = ReportLogic::delete(&pool, &scope, log_id)?;
                success(format!("Saída de {} em {} excluída.", log.name, log.date_str()));
            }
        }
    }
    Ok(())
}
