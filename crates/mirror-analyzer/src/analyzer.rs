//! Core Analyzer: one stateless pass from the two corpora to a report

use crate::diagnostics::RunDiagnostics;
use crate::emphasis::{EmphasisProfile, GapModel};
use crate::error::{AnalysisError, ConfigurationError, EmptyCorpusWarning};
use crate::report::{assemble, Report, ReportParts};
use crate::weighting::TemporalWeighting;
use crate::AnalyzerConfig;
use chrono::Utc;
use mirror_extractor::{
    BehaviorExtractor, ClaimExtractor, ExtractorConfig, LogBlock, SelfModelDocument, Taxonomy,
};
use tracing::{info, warn};

/// The two corpora of one run
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    /// Self-model document
    pub document: SelfModelDocument,

    /// Day-keyed log blocks
    pub logs: Vec<LogBlock>,
}

impl AnalysisInput {
    /// Bundle a document and its logs
    pub fn new(document: SelfModelDocument, logs: Vec<LogBlock>) -> Self {
        Self { document, logs }
    }
}

/// Compares a self-model against recorded behavior
///
/// Every run recomputes everything from its input; nothing is carried over
/// between runs.
///
/// # Examples
///
/// ```
/// use mirror_analyzer::{AnalysisInput, Analyzer, AnalyzerConfig, Classification};
/// use mirror_extractor::{ExtractorConfig, LogBlock, SelfModelDocument};
/// use chrono::{TimeZone, Utc};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let now = Utc.with_ymd_and_hms(2026, 2, 20, 0, 0, 0).unwrap();
/// let config = AnalyzerConfig { now: Some(now), ..AnalyzerConfig::default() };
/// let analyzer = Analyzer::new(config, ExtractorConfig::default())?;
///
/// let input = AnalysisInput::new(
///     SelfModelDocument::new("will.md", "- I frequently delegate work\n- I am honest", now),
///     vec![LogBlock::from_text("2026-02-19", "- Stayed honest about the bug\n- Admitted the mistake candidly")],
/// );
///
/// let report = analyzer.run(&input)?;
/// let delegation = report.finding("delegation").unwrap();
/// assert_eq!(delegation.classification, Classification::Contradiction);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    extractor_config: ExtractorConfig,
    taxonomy: Taxonomy,
}

impl Analyzer {
    /// Create an analyzer, rejecting invalid configuration up front
    pub fn new(config: AnalyzerConfig, extractor_config: ExtractorConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        extractor_config
            .validate()
            .map_err(ConfigurationError::Extraction)?;
        let taxonomy = extractor_config.taxonomy();
        Ok(Self {
            config,
            extractor_config,
            taxonomy,
        })
    }

    /// Create an analyzer with default configuration
    pub fn default_config() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            extractor_config: ExtractorConfig::default(),
            taxonomy: Taxonomy::default(),
        }
    }

    /// Analysis configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Taxonomy shared by both extractors
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Run one analysis
    ///
    /// Fails only if the self-model document is unusable. Malformed log
    /// blocks and empty corpora are reported in the diagnostics.
    pub fn run(&self, input: &AnalysisInput) -> Result<Report, AnalysisError> {
        let now = self.config.now.unwrap_or_else(Utc::now);
        let mut diagnostics = RunDiagnostics::new();

        let claim_extraction = ClaimExtractor::new(self.taxonomy.clone(), self.extractor_config.clone())
            .extract(&input.document)?;
        diagnostics.record_claims(claim_extraction.claims.len(), &claim_extraction.stats);

        let behavior_extraction =
            BehaviorExtractor::new(self.taxonomy.clone(), self.extractor_config.clone()).extract(&input.logs);
        diagnostics.record_behaviors(
            behavior_extraction.behaviors.len(),
            &behavior_extraction.stats,
            &behavior_extraction.malformed,
        );

        let weighting = TemporalWeighting::from_config(&self.config, now);
        let weighted_claims = weighting.weigh_claims(&claim_extraction.claims);
        let weighted_behaviors = weighting.weigh_behaviors(&behavior_extraction.behaviors);

        let claim_profile = EmphasisProfile::from_weighted(&weighted_claims);
        let behavior_profile = EmphasisProfile::from_weighted(&weighted_behaviors);

        if claim_profile.is_empty() {
            warn!("{}", EmptyCorpusWarning::NoClaims);
            diagnostics.record_warning(EmptyCorpusWarning::NoClaims);
        }
        if behavior_profile.is_empty() {
            warn!("{}", EmptyCorpusWarning::NoBehaviors);
            diagnostics.record_warning(EmptyCorpusWarning::NoBehaviors);
        }
        diagnostics.claim_total_mass = claim_profile.total_mass();
        diagnostics.behavior_total_mass = behavior_profile.total_mass();
        diagnostics.claim_half_life_days = self.config.claim_half_life();
        diagnostics.behavior_half_life_days = self.config.behavior_half_life();

        let gaps = GapModel::new(self.config.min_evidence_count).compare(&claim_profile, &behavior_profile);

        let report = assemble(ReportParts {
            now,
            config: &self.config,
            extraction: &self.extractor_config,
            gaps,
            either_side_empty: claim_profile.is_empty() || behavior_profile.is_empty(),
            claims: &weighted_claims,
            behaviors: &weighted_behaviors,
            behavior_records: &behavior_extraction.behaviors,
            diagnostics,
        });

        info!(
            "Analysis complete: {} categories, {} actionable findings",
            report.findings.len(),
            report.actionable().count()
        );

        Ok(report)
    }
}
