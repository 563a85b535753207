// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate};

/// Parse a `--range` expression into inclusive date bounds.
///
/// Accepted forms:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - the same forms joined by `:` (both sides in the same form)
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(invalid(r, "início e fim devem ter o mesmo formato"));
            }
            (bounds(s)?.0, bounds(e)?.1)
        }
        None => bounds(r)?,
    };

    if start > end {
        return Err(invalid(r, "o início é posterior ao fim"));
    }
    Ok((start, end))
}

/// First and last day covered by a single YYYY, YYYY-MM or YYYY-MM-DD token.
fn bounds(token: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match token.len() {
        4 => {
            let y: i32 = token.parse().map_err(|_| invalid(token, "ano inválido"))?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(|| invalid(token, "ano inválido"))?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(|| invalid(token, "ano inválido"))?;
            Ok((d1, d2))
        }
        7 => {
            let d1 = NaiveDate::parse_from_str(&format!("{token}-01"), "%Y-%m-%d")
                .map_err(|_| invalid(token, "mês inválido"))?;
            Ok((d1, month_last_day(d1)))
        }
        10 => {
            let d = NaiveDate::parse_from_str(token, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidDate(token.to_string()))?;
            Ok((d, d))
        }
        _ => Err(invalid(token, "formato de intervalo não suportado")),
    }
}

fn month_last_day(first: NaiveDate) -> NaiveDate {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .map(|next| next - Duration::days(1))
        .unwrap_or(first)
}

fn invalid(input: &str, why: &str) -> AppError {
    AppError::InvalidRange(format!("'{input}': {why}"))
}
