//! Behavior module - what the subject actually did

use crate::{Category, RecordId, SourcePosition};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded action taken from one day's log block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Behavior {
    /// Unique identifier
    pub id: RecordId,

    /// Entry text with list markers removed
    pub text: String,

    /// Primary taxonomy category
    pub category: Category,

    /// Confidence of the category assignment [0.0, 1.0]
    pub category_confidence: f64,

    /// Day key of the containing block
    pub day: NaiveDate,

    /// Session heading the entry was logged under, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,

    /// Explicit `#tag` tokens found in the entry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Where the entry was found
    pub source: SourcePosition,
}

impl Behavior {
    /// Create a new behavior record
    pub fn new(
        text: impl Into<String>,
        category: Category,
        category_confidence: f64,
        day: NaiveDate,
        source: SourcePosition,
    ) -> Self {
        let text = text.into();
        let id = RecordId::derive("behavior", &source, &text);
        Self {
            id,
            text,
            category,
            category_confidence,
            day,
            session: None,
            tags: Vec::new(),
            source,
        }
    }

    /// Attach the session heading
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Attach explicit tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Timestamp of the behavior: the day key at 00:00 UTC
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.day.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_midnight_utc() {
        let day = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
        let behavior = Behavior::new(
            "asked the user before publishing",
            Category::new("confirmation"),
            0.5,
            day,
            SourcePosition::new("2026-02-14.md", 9),
        );
        assert_eq!(behavior.timestamp().to_rfc3339(), "2026-02-14T00:00:00+00:00");
    }

    #[test]
    fn test_builders() {
        let day = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
        let behavior = Behavior::new("x", Category::new("a"), 1.0, day, SourcePosition::new("d", 1))
            .with_session("Session 3: tooling")
            .with_tags(vec!["delegation".to_string()]);
        assert_eq!(behavior.session.as_deref(), Some("Session 3: tooling"));
        assert_eq!(behavior.tags, vec!["delegation"]);
    }
}
