//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use chrono::{DateTime, Local};
use console::style;

use crate::core::notify::{Notification, NotificationKind};
use crate::core::validation::ValidationErrors;

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Show an RFC 3339 timestamp cell in local time, minutes precision
///
/// Anything that doesn't parse is returned unchanged.
pub fn format_timestamp(cell: &str) -> String {
    match DateTime::parse_from_rfc3339(cell) {
        Ok(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => cell.to_string(),
    }
}

/// One notification as a styled console line
pub fn format_notification(n: &Notification) -> String {
    let mark = match n.kind {
        NotificationKind::Success => style("✓").green(),
        NotificationKind::Error => style("✗").red(),
        NotificationKind::Warning => style("!").yellow(),
        NotificationKind::Info => style("i").cyan(),
    };
    format!("{} {}", mark, n.message)
}

/// Inline form errors, one field per line
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {} {}: {}", style("✗").red(), style(field).cyan(), message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a shell line into words, honoring double quotes
///
/// `set name "Dolce Gabbana"` gives `["set", "name", "Dolce Gabbana"]`.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut started = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            c if c.is_whitespace() && !quoted => {
                if started {
                    words.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("Алматы центр", 6), "Алм...");
    }

    #[test]
    fn test_format_timestamp_passthrough() {
        assert_eq!(format_timestamp(""), "");
        assert_eq!(format_timestamp("Guchi"), "Guchi");
        assert_eq!(format_timestamp("2024-01-15T10:00:00Z").len(), 16);
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("  list  "), vec!["list"]);
        assert_eq!(
            split_words("set name \"Dolce Gabbana\""),
            vec!["set", "name", "Dolce Gabbana"]
        );
        assert_eq!(split_words("set description \"\""), vec!["set", "description", ""]);
        assert!(split_words("   ").is_empty());
    }
}
