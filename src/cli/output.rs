use std::fmt;

use colored::Colorize;

/// Formats an error for stderr, with a red label when colour is enabled.
pub fn error_line(message: impl fmt::Display) -> String {
    format!("{} {}", "Error:".red().bold(), message)
}

pub fn print_error(message: impl fmt::Display) {
    eprintln!("{}", error_line(message));
}
