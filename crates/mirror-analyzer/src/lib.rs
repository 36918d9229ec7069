//! Mirror Analyzer
//!
//! Compares the emphasis of a self-model against recorded behavior and
//! reports where they diverge.
//!
//! # Overview
//!
//! A run is a single stateless pass:
//! - **Extraction**: claims from the self-model, behaviors from the log corpus
//! - **Temporal weighting**: exponential decay by age, with separate
//!   half-lives for the slow-moving claims and the growing behavior log
//! - **Emphasis gap model**: per-category shares on each side and their
//!   difference, scaled down where evidence is sparse
//! - **Classification**: contradiction, blind spot, calibration mismatch,
//!   aligned or insufficient evidence
//! - **Report**: findings by severity with excerpts, diagnostics and activity
//!
//! # Architecture
//!
//! ```text
//! will.md ─→ ClaimExtractor ──┐
//!                             ├→ TemporalWeighting → GapModel → GapClassifier → Report
//! logs/   ─→ BehaviorExtractor┘
//! ```
//!
//! Gaps are share differences (`behavior_share - claim_share`), never ratios of
//! counts: a behavior log that keeps growing at a constant mix yields a stable
//! severity.
//!
//! # Usage
//!
//! ```
//! use mirror_analyzer::{AnalysisInput, Analyzer, AnalyzerConfig};
//! use mirror_extractor::{ExtractorConfig, LogBlock, SelfModelDocument};
//! use chrono::Utc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::new(AnalyzerConfig::default(), ExtractorConfig::default())?;
//! let input = AnalysisInput::new(
//!     SelfModelDocument::new("will.md", "- I delegate long crawls", Utc::now()),
//!     vec![LogBlock::from_text("2026-02-14", "- Asked user for confirmation")],
//! );
//!
//! let report = analyzer.run(&input)?;
//! for finding in report.actionable() {
//!     println!("{}: {} ({:.1})", finding.category, finding.classification, finding.severity);
//! }
//! println!("\n{}", report.diagnostics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use mirror_analyzer::AnalyzerConfig;
//!
//! // Default: 21-day half-life, 3.0 evidence minimum
//! let config = AnalyzerConfig::default();
//!
//! // Strict: more evidence and larger gaps before reporting
//! let config = AnalyzerConfig::strict();
//!
//! // Lenient: smaller gaps and sparser evidence surface earlier
//! let config = AnalyzerConfig::lenient();
//! ```
//!
//! # Configuration
//!
//! The Analyzer can be configured via TOML:
//!
//! ```toml
//! half_life_days = 21
//! claim_half_life_days = 90
//! behavior_half_life_days = 14
//! min_evidence_count = 3.0
//! contradiction_claim_threshold = 0.15
//! contradiction_behavior_threshold = 0.02
//! blindspot_behavior_threshold = 0.15
//! blindspot_claim_threshold = 0.02
//! calibration_gap_threshold = 0.10
//! aligned_gap_threshold = 0.05
//! max_excerpts_per_finding = 3
//! now = "2026-02-20T00:00:00Z"
//! ```

#![warn(missing_docs)]

mod analyzer;
mod classifier;
mod config;
mod diagnostics;
mod emphasis;
mod error;
mod report;
pub mod weighting;

pub use analyzer::{AnalysisInput, Analyzer};
pub use classifier::{Classification, GapClassifier, Verdict};
pub use config::AnalyzerConfig;
pub use diagnostics::RunDiagnostics;
pub use emphasis::{CategoryGap, CategoryWeight, EmphasisProfile, GapModel};
pub use error::{AnalysisError, ConfigurationError, EmptyCorpusWarning};
pub use report::{assemble, Activity, Excerpt, Finding, Report, ReportParts};
pub use weighting::{decay_weight, TemporalWeighting};
