//! Claim module - what the subject says about itself

use crate::{Category, RecordId, SourcePosition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Strength assigned to a claim with no assertiveness cues
pub const DEFAULT_STRENGTH: f64 = 1.0;

/// A single self-descriptive assertion taken from the self-model document
///
/// Claims are immutable once extracted and are rebuilt on every run; there is
/// no per-claim history, so claims without an inline date all share the
/// document's latest revision time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: RecordId,

    /// Statement text with list markers removed
    pub text: String,

    /// Primary taxonomy category
    pub category: Category,

    /// Confidence of the category assignment [0.0, 1.0]
    pub category_confidence: f64,

    /// Where the statement was found
    pub source: SourcePosition,

    /// Inline date if present, otherwise the document revision time
    pub timestamp: DateTime<Utc>,

    /// How assertively the claim is made [0.0, 1.0]
    pub strength: f64,
}

impl Claim {
    /// Create a new claim with the default strength
    pub fn new(
        text: impl Into<String>,
        category: Category,
        category_confidence: f64,
        source: SourcePosition,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let text = text.into();
        let id = RecordId::derive("claim", &source, &text);
        Self {
            id,
            text,
            category,
            category_confidence,
            source,
            timestamp,
            strength: DEFAULT_STRENGTH,
        }
    }

    /// Override the claim strength (clamped to [0.0, 1.0])
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength.clamp(0.0, 1.0);
        self
    }
}
