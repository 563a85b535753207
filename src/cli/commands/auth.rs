use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::db::log::audit_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::Session;
use crate::ui::messages::{info, success};
use crate::utils::date::{ms_to_local, now_ms};

use super::{open_pool, session_store};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let store = session_store(cfg);

    match cmd {
        Commands::Login { pin, admin, user } => {
            let pool = open_pool(cfg)?;
            let session = match (pin, admin) {
                (Some(p), false) => AuthLogic::login_with_pin(&pool, p, now_ms())?,
                (None, true) => AuthLogic::login_admin(&pool, user, now_ms()),
                _ => {
                    return Err(AppError::Other(
                        "use `login --pin <PIN>` ou `login --admin`".into(),
                    ));
                }
            };
            store.save(&session)?;
            success(format!("Sessão iniciada como {}", describe(&session)));
        }

        Commands::Logout => {
            let previous = store.load();
            if store.clear()? {
                if let Some(s) = previous {
                    let pool = open_pool(cfg)?;
                    audit_quiet(&pool.conn, "logout", s.label(), "Session closed");
                }
                success("Sessão encerrada.");
            } else {
                info("Nenhuma sessão ativa.");
            }
        }

        Commands::Whoami => match store.load() {
            Some(s) => {
                let since = ms_to_local(s.login_time())
                    .map(|t| t.format("%d/%m/%Y %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("👤 {}", describe(&s));
                println!("🕒 desde {since}");
            }
            None => return Err(AppError::NotAuthenticated),
        },

        _ => {}
    }

    Ok(())
}

fn describe(s: &Session) -> String {
    match s {
        Session::Admin { user, .. } => format!("{user} (administrador, todos os inquilinos)"),
        Session::Guest(g) => format!("{} (inquilino {})", g.label, g.tenant_id),
    }
}
