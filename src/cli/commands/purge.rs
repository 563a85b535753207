use crate::config::Config;
use crate::core::purge::{PurgeChallenge, PurgeLogic, PurgeOutcome};
use crate::errors::AppResult;
use crate::models::Scope;
use crate::ui::messages::{ask_confirmation, ask_line, error, header, info, success, warning};
use crate::utils::date::now_ms;
use std::io::{self, BufRead};

use super::{open_pool, require_session};

/// Interactive purge: show a one-time code and require it back before the
/// deadline. A wrong or late answer offers a fresh code.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let (session, scope) = require_session(cfg)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let first = PurgeChallenge::issue(now_ms(), cfg.purge_code_ttl_secs);

    run(
        cfg,
        &scope,
        session.label(),
        &mut input,
        first,
        now_ms,
        |prev, now| prev.regenerate(now),
    )
}

fn run<R, C, N>(
    cfg: &Config,
    scope: &Scope,
    operator: &str,
    input: &mut R,
    first: PurgeChallenge,
    clock: C,
    mut next: N,
) -> AppResult<()>
where
    R: BufRead,
    C: Fn() -> i64,
    N: FnMut(&PurgeChallenge, i64) -> PurgeChallenge,
{
    header("LIMPEZA GERAL");
    warning(match scope {
        Scope::All => {
            "Isto apaga TODAS as filas, saídas e motoristas de TODOS os inquilinos.".to_string()
        }
        Scope::Tenant(_) => {
            format!("Isto apaga todas as filas, saídas e motoristas de '{operator}'.")
        }
    });

    let mut challenge = first;

    loop {
        println!(
            "🔐 Código de confirmação: {}  (expira em {}s)",
            challenge.code,
            challenge.remaining_secs(clock())
        );

        let Some(answer) = ask_line(input, "Digite o código para confirmar: ")? else {
            info("Limpeza cancelada.");
            return Ok(());
        };

        match challenge.verify(&answer, clock()) {
            PurgeOutcome::Confirmed => {
                let mut pool = open_pool(cfg)?;
                let counts = PurgeLogic::execute(&mut pool, scope)?;
                success(format!(
                    "Limpeza concluída: {} filas, {} saídas, {} motoristas removidos.",
                    counts.queues, counts.exit_logs, counts.drivers
                ));
                return Ok(());
            }
            PurgeOutcome::Expired => error("O código expirou."),
            PurgeOutcome::Mismatch => error("Código incorreto."),
        }

        if !ask_confirmation(input, "Gerar um novo código?")? {
            info("Limpeza cancelada, nada foi apagado.");
            return Ok(());
        }
        challenge = next(&challenge, clock());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::drivers::DriverLogic;
    use crate::db::drivers::load_drivers;
    use crate::db::pool::DbPool;
    use crate::models::NewDriver;
    use std::cell::Cell;
    use std::env;
    use std::fs;
    use std::io::Cursor;

    const NOW: i64 = 1_000_000;

    fn challenge(code: &str, issued_at: i64) -> PurgeChallenge {
        PurgeChallenge {
            code: code.to_string(),
            issued_at,
            expires_at: issued_at + 30_000,
        }
    }

    fn seeded_cfg(name: &str) -> Config {
        let path = env::temp_dir().join(format!("{name}_purge_run.sqlite"));
        fs::remove_file(&path).ok();

        let mut cfg = Config::default();
        cfg.database = path.to_string_lossy().to_string();

        let pool = DbPool::open(&cfg.database).unwrap();
        for n in ["Ana", "Bia"] {
            DriverLogic::register(
                &pool,
                &Scope::All,
                NewDriver {
                    name: n.into(),
                    ..Default::default()
                },
            )
            .unwrap();
        }
        cfg
    }

    fn drivers_left(cfg: &Config) -> usize {
        let pool = DbPool::open(&cfg.database).unwrap();
        load_drivers(&pool.conn, &Scope::All).unwrap().len()
    }

    #[test]
    fn right_code_purges() {
        let cfg = seeded_cfg("right_code");
        let mut input = Cursor::new("482193\n");

        run(
            &cfg,
            &Scope::All,
            "admin",
            &mut input,
            challenge("482193", NOW),
            || NOW + 5_000,
            |_, _| panic!("no second code expected"),
        )
        .unwrap();

        assert_eq!(drivers_left(&cfg), 0);
    }

    #[test]
    fn wrong_code_then_new_code_purges() {
        let cfg = seeded_cfg("regenerate");
        let mut input = Cursor::new("000000\ns\n777777\n");
        let issued = Cell::new(0);

        run(
            &cfg,
            &Scope::All,
            "admin",
            &mut input,
            challenge("482193", NOW),
            || NOW,
            |_, now| {
                issued.set(issued.get() + 1);
                challenge("777777", now)
            },
        )
        .unwrap();

        assert_eq!(issued.get(), 1);
        assert_eq!(drivers_left(&cfg), 0);
    }

    #[test]
    fn late_answer_then_decline_keeps_data() {
        let cfg = seeded_cfg("expired");
        let mut input = Cursor::new("482193\nn\n");

        run(
            &cfg,
            &Scope::All,
            "admin",
            &mut input,
            challenge("482193", NOW - 60_000),
            || NOW,
            |_, _| panic!("declined, no new code"),
        )
        .unwrap();

        assert_eq!(drivers_left(&cfg), 2);
    }
}
