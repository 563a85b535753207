use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sync::{Board, ChangeFeed};
use crate::errors::AppResult;
use crate::ui::board::render_board;
use crate::utils::colors::Palette;
use std::thread;
use std::time::Duration;

use super::{open_pool, require_session};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// `board` prints one snapshot; `watch` redraws it whenever the change feed
/// reports a write visible to this session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (session, scope) = require_session(cfg)?;
    let pool = open_pool(cfg)?;
    let palette = Palette::new(cfg.dark_mode);

    let draw = |clear: bool| -> AppResult<()> {
        let board = Board::load(&pool, &scope, cfg.recent_exits_limit)?;
        if clear {
            print!("{CLEAR_SCREEN}");
        }
        print!("{}", render_board(&board, &palette, session.label()));
        Ok(())
    };

    match cmd {
        Commands::Board => draw(false)?,

        Commands::Watch { interval, ticks } => {
            let every = Duration::from_millis(interval.unwrap_or(cfg.watch_interval_ms).max(100));
            let mut feed = ChangeFeed::subscribe(&pool, scope.clone())?;
            draw(true)?;

            let mut polls = 0u64;
            loop {
                if ticks.is_some_and(|max| polls >= max) {
                    break;
                }
                thread::sleep(every);
                polls += 1;

                if !feed.poll(&pool)?.is_empty() {
                    ::log::debug!("redrawing board at seq {}", feed.last_seq());
                    draw(true)?;
                }
            }
        }

        _ => {}
    }
    Ok(())
}
