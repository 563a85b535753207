//! Text rendering of the dispatch screens.
//!
//! Every function returns the rendered text, the CLI prints it.

use crate::core::reports::{FrequencyBoard, FrequencyStatus, ProductivityStats};
use crate::core::sync::Board;
use crate::models::{Driver, ExitLog, Period, QueueEntry};
use crate::utils::colors::Palette;
use crate::utils::date::{format_br, hour_of_ms};
use crate::utils::table::Table;
use chrono::NaiveDate;

/// Empty cells show as "-". Cells stay free of ANSI codes so columns align.
fn or_dash(s: &str) -> String {
    if s.trim().is_empty() { "-".to_string() } else { s.to_string() }
}

fn period_title(period: Period) -> String {
    match period {
        Period::Morning => "☀️  MANHÃ".to_string(),
        Period::Afternoon => "🌙 TARDE".to_string(),
    }
}

fn period_color(p: &Palette, period: Period) -> &'static str {
    match period {
        Period::Morning => p.morning,
        Period::Afternoon => p.afternoon,
    }
}

pub fn render_queue(period: Period, entries: &[QueueEntry], palette: &Palette) -> String {
    let mut out = palette.bold(
        period_color(palette, period),
        &format!("{} ({})", period_title(period), entries.len()),
    );
    out.push('\n');

    if entries.is_empty() {
        out.push_str(&palette.paint(palette.muted, "  fila vazia"));
        out.push('\n');
        return out;
    }

    let mut t = Table::new(vec!["Pos", "Nome", "Frota", "Matrícula", "Empresa", "Chegada", "ID"]);
    for (i, e) in entries.iter().enumerate() {
        t.add_row(vec![
            (i + 1).to_string(),
            e.driver.name.clone(),
            e.driver.fleet_number.clone(),
            e.driver.registration.clone(),
            e.driver.company.clone(),
            hour_of_ms(e.arrival_time),
            e.driver.short_id().to_string(),
        ]);
    }
    out.push_str(&t.render());
    out
}

pub fn render_recent(logs: &[ExitLog], palette: &Palette) -> String {
    let mut out = palette.bold(palette.title, &format!("🚚 ÚLTIMAS SAÍDAS ({})", logs.len()));
    out.push('\n');

    if logs.is_empty() {
        out.push_str(&palette.paint(palette.muted, "  nenhuma saída registrada"));
        out.push('\n');
        return out;
    }

    let mut t = Table::new(vec!["Hora", "Nome", "Turno", "Zona", "DT", "Volume"]);
    for l in logs {
        t.add_row(vec![
            l.hour_str(),
            l.name.clone(),
            l.period.label().to_string(),
            l.zone.clone(),
            or_dash(&l.dt_number),
            l.orders_count.to_string(),
        ]);
    }
    out.push_str(&t.render());
    out
}

/// Both queues, then the most recent exits.
pub fn render_board(board: &Board, palette: &Palette, operator: &str) -> String {
    let mut out = palette.bold(
        palette.title,
        &format!(
            "==== PAINEL DE DESPACHO · {} · {} motoristas ====",
            operator,
            board.drivers.len()
        ),
    );
    out.push_str("\n\n");

    for period in Period::ALL {
        out.push_str(&render_queue(period, board.queue(period), palette));
        out.push('\n');
    }
    out.push_str(&render_recent(&board.recent, palette));
    out
}

pub fn render_drivers(drivers: &[Driver]) -> String {
    if drivers.is_empty() {
        return "Nenhum motorista cadastrado.\n".to_string();
    }

    let mut t = Table::new(vec!["ID", "Nome", "Frota", "Matrícula", "Empresa"]);
    for d in drivers {
        t.add_row(vec![
            d.short_id().to_string(),
            d.name.clone(),
            or_dash(&d.fleet_number),
            or_dash(&d.registration),
            or_dash(&d.company),
        ]);
    }
    t.render()
}

pub fn render_history(logs: &[ExitLog], start: NaiveDate, end: NaiveDate) -> String {
    let mut out = format!("📚 Histórico {} a {}\n\n", format_br(start), format_br(end));

    if logs.is_empty() {
        out.push_str("Nenhuma saída no período.\n");
        return out;
    }

    let mut t = Table::new(vec![
        "ID", "Data", "Hora", "Nome", "Frota", "Matrícula", "Zona", "DT", "Volume",
    ]);
    for l in logs {
        t.add_row(vec![
            l.short_id().to_string(),
            format_br(l.date),
            l.hour_str(),
            l.name.clone(),
            l.fleet_number.clone(),
            l.registration.clone(),
            l.zone.clone(),
            or_dash(&l.dt_number),
            l.orders_count.to_string(),
        ]);
    }
    out.push_str(&t.render());

    let volume: i64 = logs.iter().map(|l| l.orders_count).sum();
    out.push_str(&format!("\nSaídas: {} · Volume: {}\n", logs.len(), volume));
    out
}

/// Today's exits split by period, with totals.
pub fn render_daily(logs: &[ExitLog], today: NaiveDate, palette: &Palette) -> String {
    let mut out = palette.bold(palette.title, &format!("📅 Relatório do dia {}", format_br(today)));
    out.push_str("\n\n");

    for period in Period::ALL {
        let of_period: Vec<&ExitLog> = logs.iter().filter(|l| l.period == period).collect();
        let volume: i64 = of_period.iter().map(|l| l.orders_count).sum();
        out.push_str(&palette.bold(
            period_color(palette, period),
            &format!("{} · {} saídas · {} volumes", period_title(period), of_period.len(), volume),
        ));
        out.push('\n');

        let mut t = Table::new(vec!["Hora", "Nome", "Zona", "DT", "Volume"]);
        for l in of_period.iter().rev() {
            t.add_row(vec![
                l.hour_str(),
                l.name.clone(),
                l.zone.clone(),
                or_dash(&l.dt_number),
                l.orders_count.to_string(),
            ]);
        }
        if !t.is_empty() {
            out.push_str(&t.render());
        }
        out.push('\n');
    }

    let total: i64 = logs.iter().map(|l| l.orders_count).sum();
    out.push_str(&format!("Total: {} saídas · {} volumes\n", logs.len(), total));
    out
}

pub fn render_productivity(
    driver: &Driver,
    stats: &ProductivityStats,
    start: NaiveDate,
    end: NaiveDate,
) -> String {
    let mut out = format!(
        "📈 Produtividade de {} ({} a {})\n\n",
        driver.name,
        format_br(start),
        format_br(end)
    );

    out.push_str(&format!("Saídas:           {}\n", stats.exits));
    out.push_str(&format!("Volume total:     {}\n", stats.volume));
    out.push_str(&format!("Média por saída:  {}\n", stats.average_str()));

    if !stats.zones.is_empty() {
        out.push_str("\nFrequência por zona\n");
        let mut t = Table::new(vec!["Zona", "Saídas"]);
        for (zone, n) in &stats.zones {
            t.add_row(vec![zone.clone(), n.to_string()]);
        }
        out.push_str(&t.render());
    }

    if !stats.daily.is_empty() {
        out.push_str("\nVolume por dia\n");
        let max = stats.daily.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
        for (day, vol) in &stats.daily {
            let bar = "█".repeat(((*vol * 30) / max).max(0) as usize);
            out.push_str(&format!("{}  {:>5}  {}\n", format_br(*day), vol, bar));
        }
    }

    out
}

pub fn render_frequency(boards: &[FrequencyBoard], palette: &Palette) -> String {
    let mut out = String::new();

    for b in boards {
        out.push_str(&palette.bold(period_color(palette, b.period), &period_title(b.period)));
        out.push('\n');

        for (company, entries) in &b.companies {
            out.push_str(&format!("  {} ({})\n", company, entries.len()));
            for e in entries {
                let status = match e.status {
                    FrequencyStatus::Left => palette.paint(palette.ok, e.status.label()),
                    FrequencyStatus::InQueue => palette.paint(palette.morning, e.status.label()),
                };
                out.push_str(&format!("    {}  {}  {}\n", hour_of_ms(e.time), status, e.name));
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewDriver;

    fn entry(name: &str) -> QueueEntry {
        QueueEntry {
            queue_id: format!("q-{name}"),
            driver: Driver::new(
                NewDriver {
                    name: name.into(),
                    fleet_number: "7".into(),
                    ..Default::default()
                },
                None,
            ),
            arrival_time: 0,
            period: Period::Morning,
            tenant_id: None,
        }
    }

    #[test]
    fn queue_lists_positions_in_order() {
        let p = Palette::new(true);
        let out = render_queue(Period::Morning, &[entry("Ana"), entry("Bruno")], &p);
        let ana = out.find("Ana").unwrap();
        let bruno = out.find("Bruno").unwrap();
        assert!(ana < bruno);
        assert!(out.contains("(2)"));

        let empty = render_queue(Period::Afternoon, &[], &p);
        assert!(empty.contains("fila vazia"));
    }

    #[test]
    fn productivity_shows_one_decimal_average() {
        let d = Driver::new(NewDriver { name: "Ana".into(), ..Default::default() }, None);
        let stats = ProductivityStats::from_logs(&[]);
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let out = render_productivity(&d, &stats, day, day);
        assert!(out.contains("Média por saída:  0.0"));
    }
}
