//! Shared CLI presentation utilities.
//!
//! Format-only helpers; domain transforms belong in the core.

use favkit_core::{HydrationState, Record};

/// Truncates a string to at most `max_len` characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use favkit_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), |v| v.to_string())
}

/// Short status label for a hydration state.
pub fn status_label(state: &HydrationState) -> &'static str {
    match state {
        HydrationState::Pending => "loading",
        HydrationState::Ready { .. } => "ready",
        HydrationState::Failed { .. } => "failed",
    }
}

/// Print every field of a record, one per line.
pub fn display_record(record: &Record) {
    println!("Title:     {}", record.title);
    println!(
        "Score:     {}",
        format_optional(record.score.map(|s| format!("{s:.2}")), "--")
    );
    if !record.authors.is_empty() {
        println!("Authors:   {}", record.authors.join(", "));
    }
    if let Some(from) = &record.published_from {
        let to = record.published_to.as_deref().unwrap_or("?");
        println!("Published: {from} - {to}");
    }
    if let Some(image) = &record.image_url {
        println!("Image:     {image}");
    }
    if let Some(synopsis) = &record.synopsis {
        println!();
        println!("{synopsis}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_aware() {
        assert_eq!(truncate_string("ドラゴンボール超", 6), "ドラゴ...");
        assert_eq!(truncate_string("One Piece", 9), "One Piece");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(8.5), "--"), "8.5");
        assert_eq!(format_optional(None::<f64>, "--"), "--");
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(&HydrationState::Pending), "loading");
        assert_eq!(
            status_label(&HydrationState::Failed {
                reason: "status 500".to_string()
            }),
            "failed"
        );
    }
}
