//! Category module - the shared vocabulary claims and behaviors map onto

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the catch-all category for records no rule matched
pub const UNCLASSIFIED: &str = "unclassified";

/// One taxonomy dimension (e.g. `delegation`, `autonomy`, `connection`)
///
/// Categories are plain names so the taxonomy can be extended through
/// configuration. Names are normalized to lowercase snake case; ordering is
/// lexical, which keeps every aggregation keyed by category deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Create a category from a name
    ///
    /// # Examples
    ///
    /// ```
    /// use mirror_domain::Category;
    ///
    /// assert_eq!(Category::new(" Risk Taking ").as_str(), "risk_taking");
    /// ```
    pub fn new(name: impl AsRef<str>) -> Self {
        let normalized = name
            .as_ref()
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        Self(normalized)
    }

    /// The catch-all category for records no rule matched
    pub fn unclassified() -> Self {
        Self(UNCLASSIFIED.to_string())
    }

    /// Whether this is the catch-all category
    pub fn is_unclassified(&self) -> bool {
        self.0 == UNCLASSIFIED
    }

    /// Get the category name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.0
    }
}

/// Outcome of classifying one piece of text
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch {
    /// Best matching category, or `unclassified`
    pub category: Category,

    /// Match confidence in [0.0, 1.0]
    pub confidence: f64,
}

impl CategoryMatch {
    /// Create a match result
    pub fn new(category: Category, confidence: f64) -> Self {
        Self {
            category,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// A zero-confidence `unclassified` result
    pub fn none() -> Self {
        Self::new(Category::unclassified(), 0.0)
    }

    /// Whether the match clears the given minimum confidence
    pub fn clears(&self, min_confidence: f64) -> bool {
        !self.category.is_unclassified() && self.confidence >= min_confidence
    }
}
