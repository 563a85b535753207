//! rdispatch main entrypoint.

use rdispatch::run;
use rdispatch::ui::messages::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        error(format!("Erro: {e}"));
        std::process::exit(1);
    }
}
