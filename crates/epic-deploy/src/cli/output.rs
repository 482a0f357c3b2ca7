//! Terminal output utilities and formatting
//!
//! Colored status messages for the console. Both go to stderr; stdout carries
//! only the progress lines of a run.

use colored::Colorize;

/// Terminal display utilities for formatted CLI output
///
/// Provides static methods for consistent status messages. Color coding and
/// Unicode symbols set them apart from the plain progress lines.
pub struct Display;

impl Display {
	/// Displays an error message with red X symbol to stderr
	///
	/// # Arguments
	/// * `message` - Error message to display
	pub fn error(message: &str) {
		eprintln!("{} {}", "✗".red().bold(), message.red());
	}

	/// Displays a warning message with yellow warning symbol to stderr
	///
	/// # Arguments
	/// * `message` - Warning message to display
	pub fn warning(message: &str) {
		eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
	}
}
