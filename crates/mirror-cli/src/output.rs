//! Output formatting for the CLI.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use colored::*;
use mirror_analyzer::{Classification, Finding, Report};
use mirror_extractor::Taxonomy;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const EXCERPT_WIDTH: usize = 80;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
    excerpts_shown: usize,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
            excerpts_shown: 1,
        }
    }

    /// Number of excerpts per side printed under each finding.
    pub fn with_excerpts(mut self, excerpts_shown: usize) -> Self {
        self.excerpts_shown = excerpts_shown;
        self
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an analysis report.
    ///
    /// JSON output is always the complete report; `show_all` only affects
    /// the table view, which otherwise lists actionable findings.
    pub fn format_report(&self, report: &Report, show_all: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(report.to_json()?),
            OutputFormat::Table => Ok(self.format_report_table(report, show_all)),
        }
    }

    fn format_report_table(&self, report: &Report, show_all: bool) -> String {
        let findings: Vec<&Finding> = report
            .findings
            .iter()
            .filter(|f| show_all || f.classification.is_actionable())
            .collect();

        let mut sections = vec![self.colorize(
            &format!(
                "Mirror report as of {} ({} categories, {} actionable)",
                report.now.format("%Y-%m-%d"),
                report.findings.len(),
                report.actionable().count()
            ),
            "cyan",
        )];

        if findings.is_empty() {
            sections.push(self.success("No blind spots found."));
        } else {
            sections.push(findings_table(&findings));
            for finding in findings.iter().filter(|f| f.classification.is_actionable()) {
                sections.push(self.format_evidence(finding));
            }
        }

        for warning in &report.diagnostics.warnings {
            sections.push(self.warning(&warning.to_string()));
        }
        if report.diagnostics.blocks_malformed() > 0 {
            sections.push(self.warning(&format!(
                "{} log block(s) skipped as malformed",
                report.diagnostics.blocks_malformed()
            )));
        }
        sections.push(report.diagnostics.summary());

        sections.join("\n\n")
    }

    fn format_evidence(&self, finding: &Finding) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.classification_label(finding.classification),
            finding.category
        )];
        for excerpt in finding.claim_excerpts.iter().take(self.excerpts_shown) {
            lines.push(format!(
                "  claimed  {}  ({}:{})",
                truncate(&excerpt.text, EXCERPT_WIDTH),
                excerpt.source.document,
                excerpt.source.line
            ));
        }
        for excerpt in finding.behavior_excerpts.iter().take(self.excerpts_shown) {
            lines.push(format!(
                "  observed {}  ({}:{})",
                truncate(&excerpt.text, EXCERPT_WIDTH),
                excerpt.source.document,
                excerpt.source.line
            ));
        }
        if finding.claim_excerpts.is_empty() {
            lines.push("  claimed  (nothing)".to_string());
        }
        if finding.behavior_excerpts.is_empty() {
            lines.push("  observed (nothing)".to_string());
        }
        lines.join("\n")
    }

    /// Format the category taxonomy.
    pub fn format_taxonomy(&self, taxonomy: &Taxonomy) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(taxonomy.rules())?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Category", "Keywords"]);
                for rule in taxonomy.rules() {
                    builder.push_record([rule.category.to_string(), rule.keywords.join(", ")]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format the effective configuration.
    pub fn format_config(&self, config: &Config) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
            OutputFormat::Table => config.to_toml(),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn classification_label(&self, classification: Classification) -> String {
        let label = format!("[{}]", classification);
        let color = match classification {
            Classification::Contradiction => "red",
            Classification::BlindSpot => "magenta",
            Classification::CalibrationMismatch => "yellow",
            Classification::Aligned => "green",
            Classification::InsufficientEvidence => "blue",
        };
        self.colorize(&label, color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn findings_table(findings: &[&Finding]) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "Category",
        "Classification",
        "Severity",
        "Claimed",
        "Observed",
        "Gap",
        "Confidence",
    ]);

    for finding in findings {
        let classification = if finding.within_tolerance {
            format!("{} (within tolerance)", finding.classification)
        } else {
            finding.classification.to_string()
        };
        builder.push_record([
            finding.category.to_string(),
            classification,
            format!("{:.1}", finding.severity),
            format!("{:.1}%", finding.claim_share * 100.0),
            format!("{:.1}%", finding.behavior_share * 100.0),
            format!("{:+.1}%", finding.raw_gap * 100.0),
            format!("{:.2}", finding.confidence_factor),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// Shorten text to `width` characters, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
