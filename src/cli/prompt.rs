//! Interactive console prompts for the demonstration call
//!
//! The raw line is taken as-is for the name; the number line is coerced
//! to an integer and a failed parse aborts the run before any transaction
//! is built.

use crate::types::error::{Error, Result};
use std::io::{self, BufRead, Write};

/// Prompt for a free-form line of text
///
/// # Errors
/// Returns Error if stdin or stdout fails
pub fn text(label: &str) -> Result<String> {
	print!("{}: ", label);
	io::stdout().flush()?;

	let mut line = String::new();
	io::stdin().lock().read_line(&mut line)?;
	Ok(line.trim().to_string())
}

/// Prompt for an integer
///
/// # Errors
/// Returns Error if the line does not parse as an unsigned integer
pub fn number(label: &str) -> Result<u64> {
	let line = text(label)?;
	parse_number(&line)
}

/// Coerce a raw console line into the numeric call argument
pub fn parse_number(line: &str) -> Result<u64> {
	let trimmed = line.trim();
	trimmed
		.parse::<u64>()
		.map_err(|_| Error::InvalidNumber(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_number_valid() {
		assert_eq!(parse_number("5550123").unwrap(), 5550123);
		assert_eq!(parse_number("  42 ").unwrap(), 42);
		assert_eq!(parse_number("0").unwrap(), 0);
	}

	#[test]
	fn test_parse_number_rejects_non_numeric() {
		assert!(matches!(
			parse_number("five"),
			Err(Error::InvalidNumber(_))
		));
		assert!(matches!(parse_number(""), Err(Error::InvalidNumber(_))));
		assert!(matches!(
			parse_number("-1"),
			Err(Error::InvalidNumber(_))
		));
	}
}
