//! Error types for the Extractor

use serde::Serialize;
use thiserror::Error;

/// Fatal errors while reading the self-model document
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Document contains nothing but whitespace
    #[error("Self-model document '{document}' is empty")]
    EmptyDocument {
        /// Document name
        document: String,
    },

    /// Document could not be read from disk
    #[error("Self-model document '{path}' is unreadable: {source}")]
    Unreadable {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Document bytes are not UTF-8
    #[error("Self-model document '{document}' is not valid UTF-8")]
    InvalidEncoding {
        /// Document name
        document: String,
    },
}

/// A log block that had to be skipped
///
/// Never fatal: the block is dropped, the error is kept for the run
/// diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Malformed log block '{block}': {reason}")]
pub struct MalformedLogError {
    /// Label of the offending block (usually the file name)
    pub block: String,

    /// Why the block was rejected
    pub reason: MalformedReason,
}

impl MalformedLogError {
    /// Create a new malformed block error
    pub fn new(block: impl Into<String>, reason: MalformedReason) -> Self {
        Self {
            block: block.into(),
            reason,
        }
    }
}

/// Reasons a log block is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MalformedReason {
    /// Block carries no day key at all
    #[error("no day key")]
    MissingDayKey,

    /// Day key is not a `YYYY-MM-DD` date
    #[error("day key '{key}' is not a YYYY-MM-DD date")]
    InvalidDayKey {
        /// The key as found
        key: String,
    },

    /// Block bytes are not UTF-8
    #[error("content is not valid UTF-8")]
    InvalidEncoding,

    /// Block could not be read at all
    #[error("unreadable: {message}")]
    Unreadable {
        /// Underlying error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = MalformedLogError::new(
            "notes.md",
            MalformedReason::InvalidDayKey {
                key: "notes".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Malformed log block 'notes.md': day key 'notes' is not a YYYY-MM-DD date"
        );
    }

    #[test]
    fn test_empty_document_display() {
        let err = ExtractionError::EmptyDocument {
            document: "will.md".to_string(),
        };
        assert!(err.to_string().contains("will.md"));
    }
}
