use owo_colors::OwoColorize;
use quarry_core::{ExtractionResult, Outcome};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Quarry".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Extract markup, text, headings, links and quotes from web pages\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print the size and item count of an extracted payload
pub fn print_payload_details(payload: &ExtractionResult) {
    eprintln!("  {} {}", "Mode:".dimmed(), payload.mode().as_str().bright_white());
    eprintln!("  {} {}", "Items:".dimmed(), payload.item_count().to_string().bright_white());
}

/// Print the envelope of a URL extraction
pub fn print_outcome_details(outcome: &Outcome) {
    let status = if outcome.is_success() {
        outcome.status.to_string().bright_green().to_string()
    } else {
        outcome.status.to_string().bright_red().to_string()
    };

    eprintln!("  {} {}", "Status:".dimmed(), status);
    eprintln!("  {} {}", "HTTP:".dimmed(), outcome.http_status.to_string().bright_white());

    if let Some(payload) = &outcome.payload {
        print_payload_details(payload);
    }
}

/// Format document size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }
}
