use crate::db::log::{AuditRow, load_audit};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

const TARGET_MAX: usize = 40;

/// ANSI colour for an audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "exit" => Colour::Green,
        "purge" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        "login" | "logout" => Colour::Cyan,
        other if other.ends_with("_del") || other == "queue_remove" => Colour::Red,
        other if other.ends_with("_add") => Colour::Green,
        other if other.starts_with("queue_") || other.ends_with("_edit") => Colour::Yellow,
        other if other.starts_with("volume_") => Colour::Yellow,
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        if out.width() + 3 >= max {
            break;
        }
        out.push(ch);
    }
    out.push_str("...");
    out
}

fn format_row(row: &AuditRow, id_w: usize, date_w: usize, op_w: usize, tgt_w: usize) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(&row.date)
        .map(|dt| dt.format("%FT%T%:z").to_string())
        .unwrap_or_else(|_| row.date.clone());

    let target = truncate(&row.target, TARGET_MAX);
    let op_pad = " ".repeat(op_w.saturating_sub(row.operation.width()));
    let tgt_pad = " ".repeat(tgt_w.saturating_sub(target.width()));

    format!(
        "{:>id_w$}: {:<date_w$} | {}{} {}{} => {}",
        row.id,
        date,
        color_for_operation(&row.operation).paint(row.operation.as_str()),
        op_pad,
        target,
        tgt_pad,
        row.message,
    )
}

pub struct AuditLogic;

impl AuditLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let rows = load_audit(&pool.conn)?;

        println!("📜 Log interno:\n");
        if rows.is_empty() {
            println!("(vazio)");
            return Ok(());
        }

        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.date.len()).max().unwrap_or(10).min(25);
        let op_w = rows.iter().map(|r| r.operation.width()).max().unwrap_or(4);
        let tgt_w = rows
            .iter()
            .map(|r| truncate(&r.target, TARGET_MAX).width())
            .max()
            .unwrap_or(0);

        for row in &rows {
            println!("{}", format_row(row, id_w, date_w, op_w, tgt_w));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_targets_are_cut() {
        let s = "x".repeat(80);
        let t = truncate(&s, TARGET_MAX);
        assert_eq!(t.width(), TARGET_MAX);
        assert!(t.ends_with("..."));
        assert_eq!(truncate("Ana", TARGET_MAX), "Ana");
    }

    #[test]
    fn migrations_show_up_in_the_log() {
        let pool = DbPool::in_memory().unwrap();
        let rows = load_audit(&pool.conn).unwrap();
        assert!(rows.iter().any(|r| r.operation == "migration_applied"));

        let line = format_row(&rows[0], 2, 25, 20, 10);
        assert!(line.contains("migration_applied"));
    }
}
