// Helpers shared by the tool projections

use chrono::{DateTime, SecondsFormat};
use play_publisher::types::Timestamp;
use serde::Serialize;

/// Character budget for listing full descriptions.
pub const FULL_DESCRIPTION_BUDGET: usize = 200;

/// Character budget for release notes.
pub const RELEASE_NOTES_BUDGET: usize = 100;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Cut `text` to `budget` characters and mark the cut.
///
/// Text shorter than the budget is returned unchanged. Text at or over the
/// budget keeps its first `budget` characters followed by [`ELLIPSIS`].
/// Budgets count Unicode scalar values, so multi-byte text is never split.
pub fn truncate(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        None if text.chars().count() < budget => text.to_string(),
        None => format!("{}{}", text, ELLIPSIS),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}

/// Render seconds + nanos since the Unix epoch as an RFC 3339 UTC instant
/// with millisecond precision, e.g. `2023-11-14T22:13:20.000Z`.
pub fn format_timestamp(seconds: i64, nanos: i32) -> Option<String> {
    let nanos = u32::try_from(nanos).ok()?;
    DateTime::from_timestamp(seconds, nanos).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Convert an API timestamp, treating an unset (zero) value as absent.
pub fn timestamp_to_iso(ts: Option<&Timestamp>) -> Option<String> {
    let ts = ts?;
    if ts.seconds == 0 && ts.nanos == 0 {
        return None;
    }
    format_timestamp(ts.seconds, ts.nanos)
}

/// Pretty-printed JSON used as the text payload of every successful tool call.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_under_budget_passes_through() {
        let text = "a".repeat(199);
        assert_eq!(truncate(&text, FULL_DESCRIPTION_BUDGET), text);
        assert_eq!(truncate("", FULL_DESCRIPTION_BUDGET), "");
    }

    #[test]
    fn test_truncate_at_budget_is_marked() {
        let text = "b".repeat(200);
        let out = truncate(&text, FULL_DESCRIPTION_BUDGET);
        assert_eq!(out, format!("{}...", text));
    }

    #[test]
    fn test_truncate_over_budget_cuts_exactly() {
        let text = "c".repeat(250);
        let out = truncate(&text, FULL_DESCRIPTION_BUDGET);
        assert_eq!(out.chars().count(), 203);
        assert!(out.starts_with(&"c".repeat(200)));
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_truncate_release_notes_budget() {
        let text = "n".repeat(150);
        assert_eq!(truncate(&text, RELEASE_NOTES_BUDGET), format!("{}...", "n".repeat(100)));
        assert_eq!(truncate("Bug fixes", RELEASE_NOTES_BUDGET), "Bug fixes");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(120);
        let out = truncate(&text, RELEASE_NOTES_BUDGET);
        assert_eq!(out, format!("{}...", "é".repeat(100)));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(1_700_000_000, 0).as_deref(),
            Some("2023-11-14T22:13:20.000Z")
        );
        assert_eq!(
            format_timestamp(1_700_000_000, 250_000_000).as_deref(),
            Some("2023-11-14T22:13:20.250Z")
        );
        assert_eq!(format_timestamp(0, -1), None);
    }

    #[test]
    fn test_timestamp_to_iso_skips_unset() {
        assert_eq!(timestamp_to_iso(None), None);
        assert_eq!(timestamp_to_iso(Some(&Timestamp::default())), None);
        assert_eq!(
            timestamp_to_iso(Some(&Timestamp {
                seconds: 1_700_000_000,
                nanos: 0
            }))
            .as_deref(),
            Some("2023-11-14T22:13:20.000Z")
        );
    }
}
