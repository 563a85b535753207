use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;

    println!("⚙️  Inicializando o rdispatch…");
    if !cli.test {
        println!("📄 Configuração : {}", Config::config_file().display());
    }
    println!("🗄️  Banco        : {}", &db_path);

    let pool = DbPool::open(&db_path)?;

    audit_quiet(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {}", &db_path),
    );

    println!("✅ Banco de dados inicializado em {}", &db_path);
    println!("🎉 Inicialização do rdispatch concluída!");
    Ok(())
}
