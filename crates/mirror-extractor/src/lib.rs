//! Mirror Extractor
//!
//! Turns the two raw corpora into comparable evidence streams.
//!
//! # Overview
//!
//! The self-model document is read into [`Claim`](mirror_domain::Claim)s and
//! the day-keyed log corpus into [`Behavior`](mirror_domain::Behavior)s. Both
//! extractors classify through the same [`Taxonomy`], so a category means the
//! same thing on either side of the comparison.
//!
//! # Architecture
//!
//! ```text
//! will.md   → ClaimExtractor    ─┐
//!                                ├→ Taxonomy → mirror-analyzer
//! logs/*.md → BehaviorExtractor ─┘
//! ```
//!
//! # Key Features
//!
//! - **Structure-aware scanning**: headers, bullets, prose sentences, fences
//! - **Boilerplate filtering**: placeholders, rules and excluded sections are
//!   counted, never turned into evidence
//! - **Recoverable log errors**: malformed blocks are reported, not fatal
//! - **Data-driven taxonomy**: keyword rules loadable from TOML
//!
//! # Example Usage
//!
//! ```
//! use mirror_extractor::{BehaviorExtractor, ClaimExtractor, ExtractorConfig, LogBlock, SelfModelDocument};
//! use chrono::Utc;
//!
//! let config = ExtractorConfig::default();
//!
//! let document = SelfModelDocument::new("will.md", "- I delegate long crawls", Utc::now());
//! let claims = ClaimExtractor::new(config.taxonomy(), config.clone()).extract(&document).unwrap();
//! assert_eq!(claims.claims.len(), 1);
//!
//! let logs = vec![LogBlock::from_text("2026-02-14", "## Morning\n- Delegated the crawl")];
//! let behaviors = BehaviorExtractor::new(config.taxonomy(), config).extract(&logs);
//! assert_eq!(behaviors.behaviors.len(), 1);
//! ```

#![warn(missing_docs)]

mod behaviors;
mod claims;
mod config;
mod error;
mod markdown;
mod taxonomy;
mod types;


pub use behaviors::{split_day_sections, BehaviorExtractor};
pub use claims::ClaimExtractor;
pub use config::ExtractorConfig;
pub use error::{ExtractionError, MalformedLogError, MalformedReason};
pub use taxonomy::{default_rules, CategoryRule, Taxonomy};
pub use types::{
    BehaviorExtraction, BehaviorExtractionStats, BlockContent, ClaimExtraction,
    ClaimExtractionStats, LogBlock, SelfModelDocument,
};
