//! Terminal output utilities and formatting
//!
//! Consistent formatting for user-facing CLI output: colored status
//! messages, headers, and key-value lines.

use colored::Colorize;

/// Terminal display utilities for formatted CLI output
pub struct Display;

impl Display {
	/// Displays a formatted section header with underline
	pub fn header(text: &str) {
		println!("\n{}", text.bold().cyan());
		println!("{}", "─".repeat(text.len()).cyan());
	}

	/// Displays a success message with green checkmark
	pub fn success(message: &str) {
		println!("{} {}", "✓".green().bold(), message);
	}

	/// Displays an error message with red X symbol to stderr
	pub fn error(message: &str) {
		eprintln!("{} {}", "✗".red().bold(), message.red());
	}

	/// Displays an informational message with blue info symbol
	pub fn info(message: &str) {
		println!("{} {}", "ℹ".blue().bold(), message);
	}

	/// Displays a key-value pair with formatted labels
	pub fn kv(key: &str, value: &str) {
		println!("  {} {}", format!("{}:", key).bold(), value);
	}

	/// Displays a formatted section title with arrow prefix
	pub fn section(title: &str) {
		println!("\n{}", format!("▸ {}", title).bold());
	}
}
