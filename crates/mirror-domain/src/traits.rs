//! Trait definitions for the seams between layers
//!
//! These traits define the boundaries between domain data and the
//! extraction/analysis machinery. Implementations live in other crates.

use crate::{Behavior, Category, CategoryMatch, Claim, RecordId, SourcePosition};
use chrono::{DateTime, Utc};

/// Trait for mapping free text onto a taxonomy category
///
/// Implemented by the extraction layer (`mirror-extractor::Taxonomy`). The
/// rules behind an implementation are data, so a classifier can be swapped or
/// tested independently of the pipeline.
pub trait CategoryClassifier {
    /// Classify a piece of text, returning the best category and a confidence
    fn classify(&self, text: &str) -> CategoryMatch;

    /// Look up a category by exact name (used for explicit tags)
    fn category_named(&self, name: &str) -> Option<Category>;
}

/// A piece of evidence that can be weighted and aggregated
///
/// Implemented by both [`Claim`] and [`Behavior`] so the weighting and gap
/// model treat the two streams identically.
pub trait Evidence {
    /// Record identifier
    fn id(&self) -> RecordId;

    /// Record text
    fn text(&self) -> &str;

    /// Primary category
    fn category(&self) -> &Category;

    /// Point in time the record refers to
    fn timestamp(&self) -> DateTime<Utc>;

    /// Where the record came from
    fn source(&self) -> &SourcePosition;

    /// Multiplier applied on top of the decay weight
    fn strength(&self) -> f64 {
        1.0
    }
}

impl Evidence for Claim {
    fn id(&self) -> RecordId {
        self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn category(&self) -> &Category {
        &self.category
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn source(&self) -> &SourcePosition {
        &self.source
    }

    fn strength(&self) -> f64 {
        self.strength
    }
}

impl Evidence for Behavior {
    fn id(&self) -> RecordId {
        self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn category(&self) -> &Category {
        &self.category
    }

    fn timestamp(&self) -> DateTime<Utc> {
        Behavior::timestamp(self)
    }

    fn source(&self) -> &SourcePosition {
        &self.source
    }
}
