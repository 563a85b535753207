use crate::errors::AppResult;
use std::fmt;
use std::io::{self, BufRead, Write};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{FG_BLUE}{BOLD}{ICON_INFO} {RESET}{msg}");
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{FG_GREEN}{BOLD}{ICON_OK} {RESET}{msg}");
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{FG_YELLOW}{BOLD}{ICON_WARN} {RESET}{msg}");
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{FG_RED}{BOLD}{ICON_ERR} {RESET}{msg}");
}

/// Section header
pub fn header<T: fmt::Display>(msg: T) {
    println!("{FG_BLUE}{BOLD}====================== {msg}\n{RESET}");
}

/// Print `label` and read one trimmed line. `None` on end of input.
pub fn ask_line<R: BufRead>(input: &mut R, label: &str) -> AppResult<Option<String>> {
    print!("{label}");
    io::stdout().flush().ok();

    let mut s = String::new();
    if input.read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s.trim().to_string()))
}

/// Yes/no question, anything but y/yes/s/sim means no.
pub fn ask_confirmation<R: BufRead>(input: &mut R, prompt: &str) -> AppResult<bool> {
    warning(prompt);
    let answer = ask_line(input, "Confirmar [s/N]: ")?.unwrap_or_default();
    Ok(matches!(
        answer.to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    ))
}
