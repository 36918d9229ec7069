//! Run diagnostics: how much input was used, skipped and why

use crate::error::EmptyCorpusWarning;
use mirror_extractor::{BehaviorExtractionStats, ClaimExtractionStats, MalformedLogError};
use serde::Serialize;

/// Diagnostics collected during one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunDiagnostics {
    /// Claims extracted (classified or not)
    pub claims_extracted: usize,

    /// Claims that matched no category
    pub claims_unclassified: usize,

    /// Claims categorized through their section header only
    pub claims_section_hinted: usize,

    /// Claims carrying an inline date
    pub claims_dated_inline: usize,

    /// Self-model lines dropped as boilerplate
    pub claim_lines_skipped: usize,

    /// Self-model lines dropped with their excluded section
    pub claim_lines_excluded: usize,

    /// Self-model headers without a body
    pub empty_sections: usize,

    /// Behaviors extracted (classified or not)
    pub behaviors_extracted: usize,

    /// Behaviors that matched no category
    pub behaviors_unclassified: usize,

    /// Behaviors categorized by an explicit tag
    pub behaviors_tagged: usize,

    /// Log entries dropped as boilerplate
    pub entries_skipped: usize,

    /// Log blocks handed in
    pub blocks_total: usize,

    /// Log blocks parsed
    pub blocks_parsed: usize,

    /// Parsed log blocks without entries
    pub blocks_empty: usize,

    /// Skipped log blocks and why
    pub malformed: Vec<MalformedLogError>,

    /// Sides lacking evidence
    pub warnings: Vec<EmptyCorpusWarning>,

    /// Total weighted claim mass
    pub claim_total_mass: f64,

    /// Total weighted behavior mass
    pub behavior_total_mass: f64,

    /// Half-life applied to claims
    pub claim_half_life_days: u32,

    /// Half-life applied to behaviors
    pub behavior_half_life_days: u32,
}

impl RunDiagnostics {
    /// Create empty diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of claim extraction
    pub fn record_claims(&mut self, extracted: usize, stats: &ClaimExtractionStats) {
        self.claims_extracted += extracted;
        self.claims_unclassified += stats.unclassified;
        self.claims_section_hinted += stats.section_hinted;
        self.claims_dated_inline += stats.dated_inline;
        self.claim_lines_skipped += stats.skipped_lines;
        self.claim_lines_excluded += stats.excluded_lines;
        self.empty_sections += stats.empty_sections;
    }

    /// Record the outcome of behavior extraction
    pub fn record_behaviors(
        &mut self,
        extracted: usize,
        stats: &BehaviorExtractionStats,
        malformed: &[MalformedLogError],
    ) {
        self.behaviors_extracted += extracted;
        self.behaviors_unclassified += stats.unclassified;
        self.behaviors_tagged += stats.tagged;
        self.entries_skipped += stats.skipped_entries;
        self.blocks_total += stats.blocks_total;
        self.blocks_parsed += stats.blocks_parsed;
        self.blocks_empty += stats.empty_blocks;
        self.malformed.extend_from_slice(malformed);
    }

    /// Record an empty-corpus warning (once per kind)
    pub fn record_warning(&mut self, warning: EmptyCorpusWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    /// Number of log blocks skipped
    pub fn blocks_malformed(&self) -> usize {
        self.malformed.len()
    }

    /// Whether either side lacked evidence
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Generate a plain-text summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Run Diagnostics".to_string(),
            "===============".to_string(),
            format!(
                "Claims: {} extracted, {} unclassified, {} section-hinted",
                self.claims_extracted, self.claims_unclassified, self.claims_section_hinted
            ),
            format!(
                "Self-model lines: {} skipped, {} excluded, {} empty sections",
                self.claim_lines_skipped, self.claim_lines_excluded, self.empty_sections
            ),
            format!(
                "Behaviors: {} extracted, {} unclassified, {} tagged, {} entries skipped",
                self.behaviors_extracted,
                self.behaviors_unclassified,
                self.behaviors_tagged,
                self.entries_skipped
            ),
            format!(
                "Log blocks: {} total, {} parsed, {} empty, {} malformed",
                self.blocks_total,
                self.blocks_parsed,
                self.blocks_empty,
                self.blocks_malformed()
            ),
            format!(
                "Weighted mass: claims {:.3} (half-life {}d), behaviors {:.3} (half-life {}d)",
                self.claim_total_mass,
                self.claim_half_life_days,
                self.behavior_total_mass,
                self.behavior_half_life_days
            ),
        ];

        if !self.malformed.is_empty() {
            lines.push(String::new());
            lines.push("Malformed blocks:".to_string());
            for error in &self.malformed {
                lines.push(format!("  {}: {}", error.block, error.reason));
            }
        }

        if !self.warnings.is_empty() {
            lines.push(String::new());
            lines.push("Warnings:".to_string());
            for warning in &self.warnings {
                lines.push(format!("  {}", warning));
            }
        }

        lines.join("\n")
    }
}
