//! Formatting utilities used for CLI and export outputs.

use super::colors::colorize_optional;
use regex::Regex;
use std::sync::LazyLock;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Optional text column: blank or missing values show as a grey dash.
pub fn or_dash(value: Option<&str>) -> String {
    colorize_optional(value.unwrap_or(""))
}

static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI escape pattern")
});

pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}
