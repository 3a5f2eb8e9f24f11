//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Set up color output based on user preference
///
/// `auto` leaves detection to the terminal check built into the color
/// layer.
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => {}
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    format!("{} {error:#}", "Error:".red().bold())
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {warning}", "Warning:".yellow().bold())
}

/// Format a success message for display
pub fn format_success(message: &str) -> String {
    format!("{} {message}", "Success:".green().bold())
}

/// Write output to a file or stdout
pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("failed to create output file: {}", path.display()))?;
            file.write_all(content.as_bytes())
                .with_context(|| format!("failed to write output file: {}", path.display()))?;
            if !content.ends_with('\n') {
                file.write_all(b"\n")
                    .with_context(|| format!("failed to write output file: {}", path.display()))?;
            }
        }
        None => {
            println!("{content}");
        }
    }
    Ok(())
}
