/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[97m";
pub const BLACK: &str = "\x1b[30m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// Terminal palette following the `dark_mode` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub morning: &'static str,
    pub afternoon: &'static str,
    pub ok: &'static str,
    pub alert: &'static str,
}

impl Palette {
    pub fn new(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                title: CYAN,
                text: WHITE,
                muted: GREY,
                morning: YELLOW,
                afternoon: MAGENTA,
                ok: GREEN,
                alert: RED,
            }
        } else {
            Self {
                title: BLUE,
                text: BLACK,
                muted: GREY,
                morning: BLUE,
                afternoon: MAGENTA,
                ok: GREEN,
                alert: RED,
            }
        }
    }

    pub fn paint(&self, color: &str, s: &str) -> String {
        format!("{color}{s}{RESET}")
    }

    pub fn bold(&self, color: &str, s: &str) -> String {
        format!("{color}{BOLD}{s}{RESET}")
    }
}
