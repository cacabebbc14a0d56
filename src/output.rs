//! Terminal output utilities

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✔").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(msg).red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), style(msg).yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").cyan().bold(), style(msg).cyan());
}

/// Create a spinner.
///
/// The spinner owns the terminal line until it is finished or dropped, so it must be
/// finished before a child process inherits stdio.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Stop a spinner and leave a success line in its place.
pub fn spinner_succeed(pb: ProgressBar, msg: &str) {
    pb.finish_and_clear();
    success(msg);
}
