// src/export/mod.rs

mod docx;
mod excel_date;
mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
mod pdf;
mod pdf_export;
pub(crate) mod range;
mod xlsx;

pub use logic::{ExportLogic, ExportTarget};
pub use model::ExitLogExport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for every format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("Exportação {label} concluída: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Docx,
    Json,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Docx => "docx",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }
}
