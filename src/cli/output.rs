//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use itertools::Itertools;

use crate::domain::{Action, Frame};

/// Separator between node values in paths and output sequences.
pub const ARROW: &str = " → ";

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✗".red(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Join values with arrows: `5 → 3 → 4`.
pub fn arrow_join(values: &[i64]) -> String {
    values.iter().join(ARROW)
}

/// Print one replay tick: counter, action, node and the path leading to it.
pub fn frame(frame: &Frame<'_>) {
    let width = frame.total.to_string().len();
    let action = format!("{:<9}", frame.step.action.to_string());
    let action = match frame.step.action {
        Action::Visit => action.yellow(),
        Action::Process => action.green().bold(),
        Action::Backtrack => action.dimmed(),
    };
    println!(
        "[{:>width$}/{}] {} {:>6}   {}",
        frame.index + 1,
        frame.total,
        action,
        frame.highlighted(),
        arrow_join(&frame.step.path).dimmed(),
        width = width,
    );
}
