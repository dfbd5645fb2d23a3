mod aggregate;
mod store;

use chrono::{DateTime, Datelike, FixedOffset};
use serde::Serialize;

pub use aggregate::{
    Aggregates, CategoryMonthDuration, MonthDuration, SubcategoryDuration,
    duration_by_category_month, duration_by_month, duration_by_subcategory,
};
pub use store::EventStore;

/// Separator between subcategory and name in an event label.
pub const LABEL_DELIMITER: char = ':';

/// A normalized calendar occurrence. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    duration: f64,
    category: String,
    subcategory: String,
    name: String,
    #[serde(skip)]
    empty_label: bool,
}

impl Event {
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        category: impl Into<String>,
        label: &str,
    ) -> Self {
        let (subcategory, name) = split_label(label);
        Self {
            start,
            end,
            duration: duration_hours(start, end),
            category: category.into(),
            subcategory: subcategory.to_string(),
            name: name.to_string(),
            empty_label: label.trim().is_empty(),
        }
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    /// Length in hours; negative when `end` precedes `start`.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `YYYYMM` of the start timestamp in its own offset.
    pub fn year_month(&self) -> String {
        year_month(self.start)
    }

    /// True when the source label was blank, not when both halves of a
    /// split label happen to be empty.
    pub fn has_empty_label(&self) -> bool {
        self.empty_label
    }
}

/// Splits `label` on the first [`LABEL_DELIMITER`] into (subcategory, name).
/// Without a delimiter both halves are the whole label.
pub fn split_label(label: &str) -> (&str, &str) {
    match label.split_once(LABEL_DELIMITER) {
        Some((subcategory, name)) => (subcategory, name),
        None => (label, label),
    }
}

pub fn year_month(ts: DateTime<FixedOffset>) -> String {
    format!("{:04}{:02}", ts.year(), ts.month())
}

fn duration_hours(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> f64 {
    (end - start).num_seconds() as f64 / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).expect("timestamp")
    }

    #[test]
    fn splits_label_on_first_delimiter() {
        assert_eq!(split_label("Meeting:Standup"), ("Meeting", "Standup"));
        assert_eq!(split_label("Focus"), ("Focus", "Focus"));
        assert_eq!(split_label("A:B:C"), ("A", "B:C"));
        assert_eq!(split_label(""), ("", ""));
        assert_eq!(split_label(":tail"), ("", "tail"));
    }

    #[test]
    fn event_derives_duration_and_label_parts() {
        let event = Event::new(
            ts("2024-01-15T09:00:00+00:00"),
            ts("2024-01-15T10:30:00+00:00"),
            "work",
            "Meeting:Standup",
        );
        assert_eq!(event.duration(), 1.5);
        assert_eq!(event.category(), "work");
        assert_eq!(event.subcategory(), "Meeting");
        assert_eq!(event.name(), "Standup");
        assert!(!event.has_empty_label());
    }

    #[test]
    fn negative_duration_is_kept() {
        let event = Event::new(
            ts("2024-01-15T10:00:00+00:00"),
            ts("2024-01-15T09:00:00+00:00"),
            "work",
            "Oops",
        );
        assert_eq!(event.duration(), -1.0);
    }

    #[test]
    fn duration_accounts_for_offsets() {
        let event = Event::new(
            ts("2024-01-15T09:00:00+09:00"),
            ts("2024-01-15T01:00:00+00:00"),
            "work",
            "Sync",
        );
        assert_eq!(event.duration(), 1.0);
    }

    #[test]
    fn year_month_uses_start_offset() {
        let event = Event::new(
            ts("2024-03-31T23:00:00+09:00"),
            ts("2024-04-01T02:00:00+09:00"),
            "work",
            "Late",
        );
        assert_eq!(event.year_month(), "202403");
        assert_eq!(year_month(ts("2024-11-02T00:00:00+00:00")), "202411");
    }

    #[test]
    fn empty_label_flags_event() {
        let event = Event::new(
            ts("2024-01-15T09:00:00+00:00"),
            ts("2024-01-15T10:00:00+00:00"),
            "work",
            "",
        );
        assert!(event.has_empty_label());
        assert_eq!(event.subcategory(), "");
        assert_eq!(event.name(), "");
    }

    #[test]
    fn delimiter_only_label_is_not_empty() {
        let start = ts("2024-01-15T09:00:00+00:00");
        let end = ts("2024-01-15T10:00:00+00:00");
        let colon = Event::new(start, end, "work", ":");
        assert_eq!(colon.subcategory(), "");
        assert_eq!(colon.name(), "");
        assert!(!colon.has_empty_label());
        assert!(Event::new(start, end, "work", "  \t").has_empty_label());
    }
}
