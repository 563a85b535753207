// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::{ExitLogExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Pretty-printed JSON array, keys in Portuguese.
pub(crate) fn export_json(rows: &[ExitLogExport], path: &Path) -> AppResult<()> {
    info(format!("Exportando para JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(rows)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV with the header row produced by serde.
pub(crate) fn export_csv(rows: &[ExitLogExport], path: &Path) -> AppResult<()> {
    info(format!("Exportando para CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("falha ao abrir o CSV: {e}")))?;

    if rows.is_empty() {
        wtr.write_record(crate::export::model::get_headers())
            .map_err(|e| AppError::Export(format!("falha ao gravar o CSV: {e}")))?;
    }

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("falha ao gravar o CSV: {e}")))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
