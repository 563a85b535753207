// src/export/logic.rs

use crate::core::reports::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::docx::export_docx;
use crate::export::fs_utils::{ensure_writable, require_absolute};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ExitLogExport;
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::models::Scope;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::env;
use std::path::{Path, PathBuf};

/// What to export.
#[derive(Debug, Clone, Copy)]
pub enum ExportTarget<'a> {
    /// Every exit in the window, optionally filtered on name / DT / zone.
    History { filter: Option<&'a str> },
    /// The exits of one driver in the window.
    Productivity { driver: &'a str },
}

struct Document {
    base_name: String,
    title: String,
    subtitle: Option<String>,
    rows: Vec<ExitLogExport>,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export exit logs and return the written path.
    ///
    /// - `format`: inferred from the file extension when omitted
    /// - `file`: absolute file path, an existing directory, or `None` for the
    ///   current directory; directories get the default file name
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &DbPool,
        scope: &Scope,
        target: ExportTarget<'_>,
        format: Option<ExportFormat>,
        file: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
        force: bool,
    ) -> AppResult<PathBuf> {
        let doc = load_document(pool, scope, target, start, end)?;
        let (path, format) = resolve_output(file, format, &doc.base_name)?;

        require_absolute(&path)?;
        ensure_writable(&path, force)?;

        if doc.rows.is_empty() {
            warning("Nenhuma saída no período selecionado, gravando uma tabela vazia.");
        }

        log::debug!("exporting {} rows as {}", doc.rows.len(), format.as_str());

        match format {
            ExportFormat::Csv => export_csv(&doc.rows, &path)?,
            ExportFormat::Json => export_json(&doc.rows, &path)?,
            ExportFormat::Xlsx => export_xlsx(&doc.rows, &path, &doc.base_name)?,
            ExportFormat::Docx => export_docx(&doc.rows, &path, &doc.heading())?,
            ExportFormat::Pdf => export_pdf(&doc.rows, &path, &doc.title, doc.subtitle.as_deref())?,
        }

        Ok(path)
    }
}

impl Document {
    fn heading(&self) -> String {
        match &self.subtitle {
            Some(sub) => format!("{} · {}", self.title, sub),
            None => self.title.clone(),
        }
    }
}

fn load_document(
    pool: &DbPool,
    scope: &Scope,
    target: ExportTarget<'_>,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Document> {
    match target {
        ExportTarget::History { filter } => {
            let logs = ReportLogic::history(pool, scope, start, end, filter)?;
            Ok(Document {
                base_name: history_file_name(start, end),
                title: "HISTÓRICO DE SAÍDAS".to_string(),
                subtitle: Some(period_label(start, end)),
                rows: logs.iter().map(ExitLogExport::from).collect(),
            })
        }
        ExportTarget::Productivity { driver } => {
            let (driver, logs, stats) = ReportLogic::productivity(pool, scope, driver, start, end)?;
            Ok(Document {
                base_name: productivity_file_name(&driver.name, start, end),
                title: "MÉTRICAS DE PRODUTIVIDADE".to_string(),
                subtitle: Some(format!(
                    "Entregador: {} | {} | Saídas: {} | Volume: {} | Média: {}",
                    driver.name,
                    period_label(start, end),
                    stats.exits,
                    stats.volume,
                    stats.average_str()
                )),
                rows: logs.iter().map(ExitLogExport::from).collect(),
            })
        }
    }
}

fn period_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} a {}", start.format("%d/%m/%Y"), end.format("%d/%m/%Y"))
}

pub(crate) fn history_file_name(start: NaiveDate, end: NaiveDate) -> String {
    format!("Historico_{start}_a_{end}")
}

pub(crate) fn productivity_file_name(driver: &str, start: NaiveDate, end: NaiveDate) -> String {
    let safe: String = driver
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("Produtividade_{safe}_{start}_a_{end}")
}

fn format_from_extension(path: &Path) -> Option<ExportFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xlsx" => Some(ExportFormat::Xlsx),
        "csv" => Some(ExportFormat::Csv),
        "docx" => Some(ExportFormat::Docx),
        "json" => Some(ExportFormat::Json),
        "pdf" => Some(ExportFormat::Pdf),
        _ => None,
    }
}

/// Pick the output path and format from what the user gave.
fn resolve_output(
    file: Option<&str>,
    format: Option<ExportFormat>,
    base_name: &str,
) -> AppResult<(PathBuf, ExportFormat)> {
    let dir = match file {
        None => Some(env::current_dir()?),
        Some(f) if Path::new(f).is_dir() => Some(PathBuf::from(f)),
        Some(_) => None,
    };

    if let Some(dir) = dir {
        let format = format.unwrap_or(ExportFormat::Xlsx);
        return Ok((dir.join(format!("{base_name}.{}", format.as_str())), format));
    }

    let path = PathBuf::from(file.unwrap_or_default());
    let format = match format {
        Some(f) => f,
        None => format_from_extension(&path).ok_or_else(|| {
            AppError::InvalidExportFormat(
                path.extension()
                    .map(|e| e.to_string_lossy().to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
            )
        })?,
    };
    Ok((path, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn default_file_names() {
        assert_eq!(
            history_file_name(d("2025-03-01"), d("2025-03-31")),
            "Historico_2025-03-01_a_2025-03-31"
        );
        assert_eq!(
            productivity_file_name("José da Silva", d("2025-03-01"), d("2025-03-07")),
            "Produtividade_José_da_Silva_2025-03-01_a_2025-03-07"
        );
    }

    #[test]
    fn format_follows_extension_unless_given() {
        let (p, f) = resolve_output(Some("/tmp/out/report.CSV"), None, "x").unwrap();
        assert_eq!(p, PathBuf::from("/tmp/out/report.CSV"));
        assert_eq!(f, ExportFormat::Csv);

        let (_, f) = resolve_output(Some("/tmp/out/report.csv"), Some(ExportFormat::Pdf), "x").unwrap();
        assert_eq!(f, ExportFormat::Pdf);

        assert!(matches!(
            resolve_output(Some("/tmp/out/report.txt"), None, "x"),
            Err(AppError::InvalidExportFormat(_))
        ));
    }

    #[test]
    fn directories_receive_the_default_name() {
        let dir = env::temp_dir();
        let (p, f) = resolve_output(dir.to_str(), Some(ExportFormat::Docx), "Historico_a").unwrap();
        assert_eq!(p, dir.join("Historico_a.docx"));
        assert_eq!(f, ExportFormat::Docx);
    }
}
