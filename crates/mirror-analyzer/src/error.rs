//! Error types for Analyzer operations

use mirror_extractor::ExtractionError;
use serde::Serialize;
use thiserror::Error;

/// Invalid analysis configuration; always raised before any extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A half-life of zero days
    #[error("{field} must be a positive number of days")]
    NonPositiveHalfLife {
        /// Offending option
        field: &'static str,
    },

    /// A threshold outside [0.0, 1.0] (or not a number)
    #[error("{field} must be within [0.0, 1.0], got {value}")]
    ThresholdOutOfRange {
        /// Offending option
        field: &'static str,
        /// Value found
        value: f64,
    },

    /// A low threshold that is not below its high counterpart
    #[error("{low} ({low_value}) must be below {high} ({high_value})")]
    InvertedThresholds {
        /// Option expected to be the lower one
        low: &'static str,
        /// Its value
        low_value: f64,
        /// Option expected to be the higher one
        high: &'static str,
        /// Its value
        high_value: f64,
    },

    /// Negative or non-finite evidence minimum
    #[error("min_evidence_count must be a finite, non-negative number, got {0}")]
    InvalidEvidenceMinimum(f64),

    /// Extraction options rejected
    #[error("Invalid extraction configuration: {0}")]
    Extraction(String),

    /// Configuration text could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Fatal errors that abort an analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Configuration rejected
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Self-model document could not be used
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Non-fatal condition: one side of the comparison has no usable evidence
///
/// The run still completes; every finding is classified as insufficient
/// evidence and carries zero severity.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCorpusWarning {
    /// No classified claims
    #[error("insufficient self-model evidence")]
    NoClaims,

    /// No classified behaviors
    #[error("insufficient behavioral evidence")]
    NoBehaviors,
}
