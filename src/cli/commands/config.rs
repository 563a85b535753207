use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::check::fill_missing;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Configuração atual:\n");
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "Nenhum arquivo de configuração em {}, usando os padrões. Execute `rdispatch init`.",
                    path.display()
                ));
            } else {
                let missing = fill_missing(&path)?;
                if missing.is_empty() {
                    success("O arquivo de configuração está completo.");
                } else {
                    info(format!("Chaves ausentes adicionadas com os padrões: {}", missing.join(", ")));
                }
            }
        }

        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

            match Command::new(&editor_to_use).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!("Configuração editada com '{editor_to_use}'"));
                }
                _ => {
                    warning(format!(
                        "Editor '{editor_to_use}' indisponível, usando '{default_editor}'"
                    ));
                    match Command::new(&default_editor).arg(&path).status() {
                        Ok(s) if s.success() => {
                            success(format!("Configuração editada com '{default_editor}'"));
                        }
                        _ => error(format!(
                            "Falha ao editar a configuração com '{default_editor}'"
                        )),
                    }
                }
            }
        }
    }

    Ok(())
}
