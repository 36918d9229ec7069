//! Record identity and source tracking shared by claims and behaviors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an extracted record, based on UUIDv5
///
/// The id is derived from where the record came from and what it says, so
/// extracting the same input twice yields the same ids:
/// - No counters or clocks involved
/// - 128-bit uniqueness within a corpus
/// - RFC 9562 string format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecordId(u128);

impl RecordId {
    /// Derive the id of a record from its kind, position and text
    ///
    /// # Examples
    ///
    /// ```
    /// use mirror_domain::{RecordId, SourcePosition};
    ///
    /// let at = SourcePosition::new("will.md", 3);
    /// let a = RecordId::derive("claim", &at, "I decide on my own.");
    /// let b = RecordId::derive("claim", &at, "I decide on my own.");
    /// assert_eq!(a, b);
    ///
    /// // The same sentence twice on one line
    /// let c = RecordId::derive("claim", &at.clone().with_ordinal(1), "I decide on my own.");
    /// assert_ne!(a, c);
    /// ```
    pub fn derive(kind: &str, at: &SourcePosition, text: &str) -> Self {
        let name = format!(
            "{kind}\u{1f}{}\u{1f}{}\u{1f}{}\u{1f}{text}",
            at.document, at.line, at.ordinal
        );
        Self(uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, name.as_bytes()).as_u128())
    }

    /// Create a RecordId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from its UUID string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid record id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for RecordId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_string(&s)
    }
}

/// Where in its input a record was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Document name or log block label (e.g. `will.md`, `2026-02-14.md`)
    pub document: String,

    /// 1-based line number within the document or block
    pub line: usize,

    /// 0-based index of the record among those sharing the line
    #[serde(default, skip_serializing_if = "is_first")]
    pub ordinal: usize,

    /// Header path enclosing the line, outermost first (`Values > Autonomy`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl SourcePosition {
    /// Create a source position without section information
    pub fn new(document: impl Into<String>, line: usize) -> Self {
        Self {
            document: document.into(),
            line,
            ordinal: 0,
            section: None,
        }
    }

    /// Set the index among records sharing the line
    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Attach the enclosing section path
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

fn is_first(ordinal: &usize) -> bool {
    *ordinal == 0
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.document, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(document: &str, line: usize) -> SourcePosition {
        SourcePosition::new(document, line)
    }

    #[test]
    fn test_derive_is_stable() {
        let a = RecordId::derive("behavior", &at("2026-02-14.md", 12), "delegated the crawl");
        let b = RecordId::derive("behavior", &at("2026-02-14.md", 12), "delegated the crawl");
        assert_eq!(a, b);
    }

    #[test]
    fn test_derive_depends_on_every_part() {
        let base = RecordId::derive("claim", &at("will.md", 1), "text");
        assert_ne!(base, RecordId::derive("behavior", &at("will.md", 1), "text"));
        assert_ne!(base, RecordId::derive("claim", &at("other.md", 1), "text"));
        assert_ne!(base, RecordId::derive("claim", &at("will.md", 2), "text"));
        assert_ne!(base, RecordId::derive("claim", &at("will.md", 1).with_ordinal(1), "text"));
        assert_ne!(base, RecordId::derive("claim", &at("will.md", 1), "other"));
    }

    #[test]
    fn test_section_does_not_change_id() {
        let base = RecordId::derive("claim", &at("will.md", 1), "text");
        let sectioned = at("will.md", 1).with_section("Values");
        assert_eq!(base, RecordId::derive("claim", &sectioned, "text"));
    }

    #[test]
    fn test_first_ordinal_not_serialized() {
        let json = serde_json::to_string(&at("will.md", 4)).unwrap();
        assert!(!json.contains("ordinal"));

        let json = serde_json::to_string(&at("will.md", 4).with_ordinal(2)).unwrap();
        assert!(json.contains("\"ordinal\":2"));
        let parsed: SourcePosition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.ordinal, 2);
    }

    #[test]
    fn test_display_and_parse() {
        let id = RecordId::derive("claim", &at("will.md", 1), "text");
        let id_str = id.to_string();
        assert_eq!(id_str.len(), 36);
        assert_eq!(RecordId::from_string(&id_str).unwrap(), id);
    }

    #[test]
    fn test_invalid_string() {
        assert!(RecordId::from_string("not-a-valid-uuid").is_err());
        assert!(RecordId::from_string("").is_err());
    }

    #[test]
    fn test_string_conversions() {
        let id = RecordId::from_value(42);
        let s = String::from(id);
        assert_eq!(RecordId::try_from(s).unwrap(), id);
        assert!(RecordId::try_from("garbage".to_string()).is_err());
    }

    #[test]
    fn test_source_position_display() {
        let pos = SourcePosition::new("will.md", 7).with_section("Values > Autonomy");
        assert_eq!(pos.to_string(), "will.md:7");
        assert_eq!(pos.section.as_deref(), Some("Values > Autonomy"));
    }
}
