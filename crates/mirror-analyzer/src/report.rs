//! Report assembly

use crate::classifier::{Classification, GapClassifier};
use crate::config::AnalyzerConfig;
use crate::diagnostics::RunDiagnostics;
use crate::emphasis::CategoryGap;
use crate::weighting::Weighted;
use chrono::{DateTime, NaiveDate, Utc};
use mirror_domain::{Behavior, Category, Claim, Evidence, RecordId, SourcePosition};
use mirror_extractor::ExtractorConfig;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A representative record supporting a finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Excerpt {
    /// Record id
    pub id: RecordId,

    /// Record text
    pub text: String,

    /// Where the record came from
    pub source: SourcePosition,

    /// Timestamp used for decay
    pub timestamp: DateTime<Utc>,

    /// Weight the record added to its category
    pub contribution: f64,
}

/// One category's comparison, classified
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Category compared
    pub category: Category,

    /// Assigned classification
    pub classification: Classification,

    /// Aligned within tolerance
    pub within_tolerance: bool,

    /// Severity in [0, 100]
    pub severity: f64,

    /// Category share of claim mass
    pub claim_share: f64,

    /// Category share of behavior mass
    pub behavior_share: f64,

    /// `behavior_share - claim_share`
    pub raw_gap: f64,

    /// Weighted claim mass in the category
    pub claim_mass: f64,

    /// Weighted behavior mass in the category
    pub behavior_mass: f64,

    /// Claims in the category
    pub claim_count: usize,

    /// Behaviors in the category
    pub behavior_count: usize,

    /// Evidence scale applied to the severity
    pub confidence_factor: f64,

    /// Strongest claims in the category
    pub claim_excerpts: Vec<Excerpt>,

    /// Strongest behaviors in the category
    pub behavior_excerpts: Vec<Excerpt>,
}

/// Behavior counts over time (classified behaviors only)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Activity {
    /// Per day, per category counts
    pub daily: BTreeMap<NaiveDate, BTreeMap<Category, usize>>,

    /// Per category counts over the whole corpus
    pub totals: BTreeMap<Category, usize>,
}

impl Activity {
    /// Tally behaviors by day and category
    pub fn from_behaviors(behaviors: &[Behavior]) -> Self {
        let mut activity = Self::default();
        for behavior in behaviors.iter().filter(|b| !b.category.is_unclassified()) {
            *activity
                .daily
                .entry(behavior.day)
                .or_default()
                .entry(behavior.category.clone())
                .or_insert(0) += 1;
            *activity.totals.entry(behavior.category.clone()).or_insert(0) += 1;
        }
        activity
    }

    /// Number of days with classified activity
    pub fn active_days(&self) -> usize {
        self.daily.len()
    }
}

/// Complete output of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Reference time used for decay
    pub now: DateTime<Utc>,

    /// Configuration the run used
    pub config: AnalyzerConfig,

    /// Extraction settings the run used
    pub extraction: ExtractorConfig,

    /// Findings, most severe first
    pub findings: Vec<Finding>,

    /// Input accounting
    pub diagnostics: RunDiagnostics,

    /// Behavior counts over time
    pub activity: Activity,
}

impl Report {
    /// Findings that call for attention
    pub fn actionable(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.classification.is_actionable())
    }

    /// Finding for a category, if present
    pub fn finding(&self, category: &str) -> Option<&Finding> {
        let category = Category::new(category);
        self.findings.iter().find(|f| f.category == category)
    }

    /// Pretty-printed JSON; identical inputs give identical output
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Everything the assembler needs from one run
pub struct ReportParts<'a> {
    /// Reference time
    pub now: DateTime<Utc>,
    /// Configuration used
    pub config: &'a AnalyzerConfig,
    /// Extraction settings used
    pub extraction: &'a ExtractorConfig,
    /// Gap rows from the emphasis model
    pub gaps: Vec<CategoryGap>,
    /// Whether either side had no classified evidence
    pub either_side_empty: bool,
    /// Weighted claims
    pub claims: &'a [Weighted<'a, Claim>],
    /// Weighted behaviors
    pub behaviors: &'a [Weighted<'a, Behavior>],
    /// All extracted behaviors
    pub behavior_records: &'a [Behavior],
    /// Diagnostics collected so far
    pub diagnostics: RunDiagnostics,
}

/// Classify gaps, attach excerpts and order the findings
pub fn assemble(parts: ReportParts<'_>) -> Report {
    let classifier = GapClassifier::from_config(parts.config);
    let max_excerpts = parts.config.max_excerpts_per_finding;

    let mut findings: Vec<Finding> = parts
        .gaps
        .into_iter()
        .map(|gap| {
            let verdict = classifier.classify(&gap, parts.either_side_empty);
            Finding {
                claim_excerpts: excerpts(parts.claims, &gap.category, max_excerpts),
                behavior_excerpts: excerpts(parts.behaviors, &gap.category, max_excerpts),
                category: gap.category,
                classification: verdict.classification,
                within_tolerance: verdict.within_tolerance,
                severity: gap.severity,
                claim_share: gap.claim_share,
                behavior_share: gap.behavior_share,
                raw_gap: gap.raw_gap,
                claim_mass: gap.claim_mass,
                behavior_mass: gap.behavior_mass,
                claim_count: gap.claim_count,
                behavior_count: gap.behavior_count,
                confidence_factor: gap.confidence_factor,
            }
        })
        .collect();

    findings.sort_by(|a, b| {
        b.severity
            .total_cmp(&a.severity)
            .then_with(|| a.category.cmp(&b.category))
    });

    Report {
        now: parts.now,
        config: parts.config.clone(),
        extraction: parts.extraction.clone(),
        findings,
        diagnostics: parts.diagnostics,
        activity: Activity::from_behaviors(parts.behavior_records),
    }
}

/// Highest contributions first, extraction order on ties
fn excerpts<E: Evidence>(records: &[Weighted<'_, E>], category: &Category, limit: usize) -> Vec<Excerpt> {
    let mut matching: Vec<&Weighted<'_, E>> = records
        .iter()
        .filter(|w| w.record.category() == category)
        .collect();
    matching.sort_by(|a, b| match b.contribution.total_cmp(&a.contribution) {
        Ordering::Equal => a.order.cmp(&b.order),
        other => other,
    });

    matching
        .into_iter()
        .take(limit)
        .map(|w| Excerpt {
            id: w.record.id(),
            text: w.record.text().to_string(),
            source: w.record.source().clone(),
            timestamp: w.record.timestamp(),
            contribution: w.contribution,
        })
        .collect()
}
