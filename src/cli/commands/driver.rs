use crate::cli::parser::{Commands, DriverCmd};
use crate::config::Config;
use crate::core::drivers::DriverLogic;
use crate::errors::AppResult;
use crate::models::{DriverUpdate, NewDriver};
use crate::ui::board::render_drivers;
use crate::ui::messages::{ask_confirmation, info, success};
use std::io;

use super::{open_pool, require_session};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Driver { action } = cmd {
        let (_, scope) = require_session(cfg)?;
        let mut pool = open_pool(cfg)?;

        match action {
            DriverCmd::Add {
                name,
                fleet,
                registration,
                company,
            } => {
                let d = DriverLogic::register(
                    &pool,
                    &scope,
                    NewDriver {
                        name: name.clone(),
                        fleet_number: fleet.clone(),
                        registration: registration.clone(),
                        company: company.clone(),
                    },
                )?;
                success(format!("Motorista '{}' cadastrado (id {})", d.name, d.short_id()));
            }

            DriverCmd::Edit {
                reference,
                name,
                fleet,
                registration,
                company,
            } => {
                let changes = DriverUpdate {
                    name: name.clone(),
                    fleet_number: fleet.clone(),
                    registration: registration.clone(),
                    company: company.clone(),
                };
                if changes.is_empty() {
                    info("Nada a alterar.");
                    return Ok(());
                }
                let d = DriverLogic::update(&pool, &scope, reference, &changes)?;
                success(format!("Motorista '{}' atualizado.", d.name));
            }

            DriverCmd::Del { reference, yes } => {
                let d = DriverLogic::find(&pool, &scope, reference)?;
                let prompt = format!(
                    "Excluir o motorista '{}' com suas entradas na fila e TODO o seu histórico de saídas? Esta ação é irreversível.",
                    d.name
                );
                if !*yes && !ask_confirmation(&mut io::stdin().lock(), &prompt)? {
                    info("Operação cancelada.");
                    return Ok(());
                }
                let d = DriverLogic::delete(&mut pool, &scope, &d.id)?;
                success(format!("Motorista '{}' excluído.", d.name));
            }

            DriverCmd::List { search } => {
                let drivers = DriverLogic::list(&pool, &scope, search.as_deref())?;
                print!("{}", render_drivers(&drivers));
            }

            DriverCmd::ClearLogs { reference, yes } => {
                let d = DriverLogic::find(&pool, &scope, reference)?;
                let prompt = format!("Apagar todo o histórico de saídas de '{}'?", d.name);
                if !*yes && !ask_confirmation(&mut io::stdin().lock(), &prompt)? {
                    info("Operação cancelada.");
                    return Ok(());
                }
                let (d, n) = DriverLogic::clear_logs(&pool, &scope, &d.id)?;
                success(format!("{n} saídas de '{}' removidas.", d.name));
            }
        }
    }
    Ok(())
}
