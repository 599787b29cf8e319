//! Pure formatting functions for console output.
//!
//! Functions here are print-only and carry no state; styling goes through
//! the `console` crate so redirected output degrades gracefully.

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning on stderr with yellow icon.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Print an aligned key/value line for status listings.
pub fn display_key_value(key: &str, value: &str) {
    println!("  {} {}", style(format!("{:<14}", key)).dim(), value);
}
