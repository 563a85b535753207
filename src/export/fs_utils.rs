// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, Write};
use std::path::Path;

/// Check whether an export may create or overwrite `path`.
///
/// - missing file: ok
/// - existing file with `force`: ok
/// - existing file without `force`: ask on stdin
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("O arquivo '{}' já existe.", path.display()));

    print!("Sobrescrever? [s/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if matches!(ans.as_str(), "s" | "sim" | "y" | "yes") {
        info("O arquivo existente será sobrescrito.");
        Ok(())
    } else {
        Err(AppError::Export(
            "exportação cancelada: o arquivo existente não foi sobrescrito".into(),
        ))
    }
}

/// Output paths must be absolute, so a watch loop or a script never writes
/// relative to an unexpected working directory.
pub(crate) fn require_absolute(path: &Path) -> AppResult<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(AppError::Export(format!(
            "o caminho do arquivo de saída deve ser absoluto: {}",
            path.display()
        )))
    }
}
