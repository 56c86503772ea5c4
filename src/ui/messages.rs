//! One-line user messages: coloured icon, then the text.
//! Errors go to stderr, everything else to stdout.

use std::fmt::Display;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Level::Info => ("\x1b[34m", "ℹ️"),
            Level::Success => ("\x1b[32m", "✅"),
            Level::Warning => ("\x1b[33m", "⚠️"),
            Level::Error => ("\x1b[31m", "❌"),
        }
    }
}

fn emit(level: Level, msg: impl Display) {
    let (color, icon) = level.style();
    let line = format!("{color}{BOLD}{icon} {RESET}{msg}");
    match level {
        Level::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

pub fn info<T: Display>(msg: T) {
    emit(Level::Info, msg);
}

pub fn success<T: Display>(msg: T) {
    emit(Level::Success, msg);
}

pub fn warning<T: Display>(msg: T) {
    emit(Level::Warning, msg);
}

pub fn error<T: Display>(msg: T) {
    emit(Level::Error, msg);
}

/// Page title line.
pub fn header<T: Display>(title: T) {
    println!("\x1b[34m{BOLD}── {title} ──{RESET}\n");
}
