//! Input and output types for extraction

use crate::error::{ExtractionError, MalformedLogError};
use chrono::{DateTime, Utc};
use mirror_domain::{Behavior, Claim};
use serde::Serialize;
use std::path::Path;

/// The self-model document as handed over by its storage
#[derive(Debug, Clone)]
pub struct SelfModelDocument {
    /// Document name used in source positions (e.g. `will.md`)
    pub name: String,

    /// Full document text
    pub text: String,

    /// Latest known revision time (file modification time by default)
    pub revised_at: DateTime<Utc>,
}

impl SelfModelDocument {
    /// Create a document from text
    pub fn new(name: impl Into<String>, text: impl Into<String>, revised_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            revised_at,
        }
    }

    /// Read a document from disk, using the file modification time as the
    /// revision time
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let unreadable = |source| ExtractionError::Unreadable {
            path: path.display().to_string(),
            source,
        };
        let bytes = std::fs::read(path).map_err(unreadable)?;
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(unreadable)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let text = String::from_utf8(bytes)
            .map_err(|_| ExtractionError::InvalidEncoding { document: name.clone() })?;

        Ok(Self::new(name, text, DateTime::<Utc>::from(modified)))
    }
}

/// Raw content of a log block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    /// Bytes as read; decoded during extraction
    Bytes(Vec<u8>),
    /// The block could not be read at all
    Unreadable(String),
}

/// One day-keyed block of the log corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBlock {
    /// Label used in diagnostics and source positions (usually a file name)
    pub label: String,

    /// Day key (`YYYY-MM-DD`); blocks without one are rejected
    pub day_key: Option<String>,

    /// Block content
    pub content: BlockContent,
}

impl LogBlock {
    /// Create a block from raw bytes
    pub fn new(label: impl Into<String>, day_key: Option<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.into(),
            day_key,
            content: BlockContent::Bytes(bytes.into()),
        }
    }

    /// Create a block from text, labelled by its day key
    pub fn from_text(day_key: impl Into<String>, text: &str) -> Self {
        let day_key = day_key.into();
        Self::new(day_key.clone(), Some(day_key), text.as_bytes())
    }

    /// Create a placeholder for a block that failed to load
    pub fn unreadable(label: impl Into<String>, day_key: Option<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            day_key,
            content: BlockContent::Unreadable(message.into()),
        }
    }

    /// Load a block from a file; the file stem is the day key
    pub fn from_file(path: &Path) -> Self {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let day_key = path.file_stem().map(|s| s.to_string_lossy().into_owned());

        match std::fs::read(path) {
            Ok(bytes) => Self::new(label, day_key, bytes),
            Err(e) => Self::unreadable(label, day_key, e.to_string()),
        }
    }
}

/// Claims extracted from the self-model plus bookkeeping
#[derive(Debug, Clone)]
pub struct ClaimExtraction {
    /// Extracted claims in document order
    pub claims: Vec<Claim>,

    /// Counters for run diagnostics
    pub stats: ClaimExtractionStats,
}

/// Counters describing what the claim extractor kept and dropped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClaimExtractionStats {
    /// Candidate statements considered
    pub candidates: usize,

    /// Candidates or lines dropped as boilerplate
    pub skipped_lines: usize,

    /// Lines dropped because their section is excluded
    pub excluded_lines: usize,

    /// Headers with no content under them
    pub empty_sections: usize,

    /// Claims that matched no category
    pub unclassified: usize,

    /// Claims categorized only through their section header
    pub section_hinted: usize,

    /// Claims carrying their own inline date
    pub dated_inline: usize,
}

/// Behaviors extracted from the log corpus plus bookkeeping
#[derive(Debug, Clone)]
pub struct BehaviorExtraction {
    /// Extracted behaviors in chronological order
    pub behaviors: Vec<Behavior>,

    /// Blocks that were skipped
    pub malformed: Vec<MalformedLogError>,

    /// Counters for run diagnostics
    pub stats: BehaviorExtractionStats,
}

/// Counters describing what the behavior extractor kept and dropped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BehaviorExtractionStats {
    /// Blocks handed in
    pub blocks_total: usize,

    /// Blocks parsed successfully
    pub blocks_parsed: usize,

    /// Parsed blocks that held no entries
    pub empty_blocks: usize,

    /// Entries dropped as boilerplate
    pub skipped_entries: usize,

    /// Behaviors that matched no category
    pub unclassified: usize,

    /// Behaviors categorized through an explicit tag
    pub tagged: usize,
}
