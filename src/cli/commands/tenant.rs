use crate::cli::parser::{Commands, TenantCmd};
use crate::config::Config;
use crate::core::auth::TenantLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::table::Table;

use super::{open_pool, require_admin};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Tenant { action } = cmd {
        require_admin(cfg)?;
        let pool = open_pool(cfg)?;

        match action {
            TenantCmd::Add { label, pin } => {
                let op = TenantLogic::create(&pool, label, pin)?;
                success(format!("Inquilino '{}' criado ({})", op.label, op.tenant_id));
            }
            TenantCmd::List => {
                let ops = TenantLogic::list(&pool)?;
                if ops.is_empty() {
                    println!("Nenhum inquilino cadastrado. Crie um com `rdispatch tenant add`.");
                    return Ok(());
                }
                let mut t = Table::new(vec!["Nome", "Inquilino", "PIN"]);
                for op in ops {
                    let masked = "*".repeat(op.pin.chars().count());
                    t.add_row(vec![op.label, op.tenant_id, masked]);
                }
                print!("{}", t.render());
            }
        }
    }
    Ok(())
}
