// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, rows_to_table};
use crate::export::pdf::PdfManager;
use crate::export::{ExitLogExport, notify_export_success};
use crate::ui::messages::info;
use std::path::Path;

pub(crate) fn export_pdf(
    rows: &[ExitLogExport],
    path: &Path,
    title: &str,
    subtitle: Option<&str>,
) -> AppResult<()> {
    info(format!("Exportando para PDF: {}", path.display()));

    let headers = get_headers();
    let data_vec = rows_to_table(rows);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, subtitle, &headers, &data_vec);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("falha ao gerar o PDF: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
