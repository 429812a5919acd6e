//! Helper functions and utilities
//!
//! Small text helpers shared by the admin panels and the CLI output.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Case-insensitive substring test
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Collapse runs of whitespace and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render a backend timestamp as `dd/mm/yyyy`.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and plain dates; anything else is
/// returned unchanged.
pub fn format_date_br(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%d/%m/%Y").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return parsed.format("%d/%m/%Y").to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

/// Horizontal bar proportional to `count / max`
pub fn proportion_bar(count: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = ((count as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Escola Municipal Tuntum", "municipal"));
        assert!(contains_ignore_case("JOÃO", "joão"));
        assert!(!contains_ignore_case("Maria", "ana"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Hello", 10), "Hello");
        assert_eq!(truncate_text("Avaliação excelente", 10), "Avaliaç...");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Maria   da  Silva "), "Maria da Silva");
    }

    #[test]
    fn test_format_date_br() {
        assert_eq!(format_date_br("2026-02-25T13:45:00Z"), "25/02/2026");
        assert_eq!(format_date_br("2026-02-25 13:45:00"), "25/02/2026");
        assert_eq!(format_date_br("2026-02-26"), "26/02/2026");
        assert_eq!(format_date_br("ontem"), "ontem");
    }

    #[test]
    fn test_proportion_bar() {
        assert_eq!(proportion_bar(5, 10, 10).chars().count(), 5);
        assert_eq!(proportion_bar(10, 10, 4).chars().count(), 4);
        assert_eq!(proportion_bar(3, 0, 10), "");
    }
}
