// src/export/docx.rs

use crate::errors::AppResult;
use crate::export::model::{export_to_row, get_headers};
use crate::export::{ExitLogExport, notify_export_success};
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::FileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const HEADER_FILL: &str = "2F75B5";
const BAND_FILL: &str = "EAF3FB";

/// Word document with a title paragraph and one bordered table.
pub(crate) fn export_docx(rows: &[ExitLogExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exportando para DOCX: {}", path.display()));

    let document = build_document(title, rows);

    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, body) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("word/document.xml", document.as_str()),
    ] {
        zip.start_file(name, options.clone())?;
        zip.write_all(body.as_bytes())?;
    }
    zip.finish()?;

    notify_export_success("DOCX", path);
    Ok(())
}

pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn cell(text: &str, fill: Option<&str>, bold: bool, white: bool) -> String {
    let shading = fill
        .map(|f| format!(r#"<w:shd w:val="clear" w:color="auto" w:fill="{f}"/>"#))
        .unwrap_or_default();
    let mut run_props = String::new();
    if bold {
        run_props.push_str("<w:b/>");
    }
    if white {
        run_props.push_str(r#"<w:color w:val="FFFFFF"/>"#);
    }

    format!(
        r#"<w:tc><w:tcPr>{shading}</w:tcPr><w:p><w:r><w:rPr>{run_props}</w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p></w:tc>"#,
        xml_escape(text)
    )
}

fn build_document(title: &str, rows: &[ExitLogExport]) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        r#"<w:p><w:r><w:rPr><w:b/><w:sz w:val="28"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        xml_escape(title)
    ));

    body.push_str(
        r#"<w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/><w:tblBorders>"#,
    );
    for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        body.push_str(&format!(
            r#"<w:{side} w:val="single" w:sz="4" w:space="0" w:color="A6A6A6"/>"#
        ));
    }
    body.push_str("</w:tblBorders></w:tblPr>");

    body.push_str("<w:tr>");
    for h in get_headers() {
        body.push_str(&cell(h, Some(HEADER_FILL), true, true));
    }
    body.push_str("</w:tr>");

    for (i, r) in rows.iter().enumerate() {
        let fill = if i % 2 == 0 { Some(BAND_FILL) } else { None };
        body.push_str("<w:tr>");
        for value in export_to_row(r) {
            body.push_str(&cell(&value, fill, false, false));
        }
        body.push_str("</w:tr>");
    }
    body.push_str("</w:tbl>");

    body.push_str(&format!(
        r#"<w:p><w:r><w:t xml:space="preserve">Total de saídas: {}</w:t></w:r></w:p>"#,
        rows.len()
    ));

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr><w:pgSz w:w="16838" w:h="11906" w:orient="landscape"/></w:sectPr></w:body></w:document>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(xml_escape(r#"A&B <"x"> 'y'"#), "A&amp;B &lt;&quot;x&quot;&gt; &apos;y&apos;");
        assert_eq!(xml_escape("Matrícula"), "Matrícula");
    }

    #[test]
    fn document_holds_one_row_per_exit() {
        let row = ExitLogExport {
            date: "07/03/2025".into(),
            time: "08:10".into(),
            name: "Zé & Filhos".into(),
            fleet_number: "4".into(),
            registration: "AAA0000".into(),
            zone: "SUL".into(),
            dt_number: "DT<1>".into(),
            orders_count: 3,
        };
        let xml = build_document("Histórico", &[row.clone(), row]);

        assert_eq!(xml.matches("<w:tr>").count(), 3);
        assert!(xml.contains("Zé &amp; Filhos"));
        assert!(xml.contains("DT&lt;1&gt;"));
        assert!(xml.contains("Total de saídas: 2"));
    }
}
