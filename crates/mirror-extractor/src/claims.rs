//! Claim extraction from the self-model document

use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::markdown::{classify_line, inline_date, is_placeholder, split_sentences, Line, SectionPath};
use crate::types::{ClaimExtraction, ClaimExtractionStats, SelfModelDocument};
use chrono::NaiveTime;
use mirror_domain::{CategoryClassifier, CategoryMatch, Claim, SourcePosition};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Confidence discount for categories inferred from a section header
const SECTION_HINT_DISCOUNT: f64 = 0.5;

/// Cues that soften a claim; English cues match whole words only
static HEDGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:sometimes|occasionally|try(?:ing)?\s+to|maybe|perhaps|might|tend\s+to|somewhat)\b|時々|たまに|かもしれ|なるべく",
    )
    .expect("valid hedge regex")
});

/// Turns the self-model document into categorized claims
pub struct ClaimExtractor<C: CategoryClassifier> {
    classifier: C,
    config: ExtractorConfig,
}

impl<C: CategoryClassifier> ClaimExtractor<C> {
    /// Create a new claim extractor
    pub fn new(classifier: C, config: ExtractorConfig) -> Self {
        Self { classifier, config }
    }

    /// Read and extract a document from disk
    pub fn extract_path(&self, path: &Path) -> Result<ClaimExtraction, ExtractionError> {
        let document = SelfModelDocument::from_path(path)?;
        self.extract(&document)
    }

    /// Extract claims from a document
    ///
    /// Fails only when the document is empty; individual lines that do not
    /// yield a claim are skipped and counted.
    pub fn extract(&self, document: &SelfModelDocument) -> Result<ClaimExtraction, ExtractionError> {
        if document.text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument {
                document: document.name.clone(),
            });
        }

        let mut claims = Vec::new();
        let mut stats = ClaimExtractionStats::default();
        let mut sections = SectionPath::new();
        let mut in_fence = false;
        // Whether the most recent header has had any content yet
        let mut open_header: Option<bool> = None;

        for (idx, raw) in document.text.lines().enumerate() {
            let line_no = idx + 1;
            let line = classify_line(raw);

            if line == Line::Fence {
                in_fence = !in_fence;
                stats.skipped_lines += 1;
                continue;
            }
            if in_fence {
                stats.skipped_lines += 1;
                continue;
            }

            let candidates = match line {
                Line::Header { level, title } => {
                    if open_header == Some(false) {
                        stats.empty_sections += 1;
                    }
                    open_header = Some(false);
                    sections.enter(level, title);
                    continue;
                }
                Line::Blank => continue,
                Line::Rule | Line::Fence => {
                    stats.skipped_lines += 1;
                    continue;
                }
                Line::Bullet(text) => vec![text.to_string()],
                Line::Text(text) => split_sentences(text),
            };

            if let Some(seen) = open_header.as_mut() {
                *seen = true;
            }
            if sections.within_any(&self.config.excluded_sections) {
                stats.excluded_lines += 1;
                continue;
            }

            for (ordinal, candidate) in candidates.into_iter().enumerate() {
                stats.candidates += 1;
                if is_placeholder(&candidate) {
                    debug!("Skipping placeholder at {}:{}", document.name, line_no);
                    stats.skipped_lines += 1;
                    continue;
                }
                let source = SourcePosition::new(document.name.clone(), line_no).with_ordinal(ordinal);
                let claim = self.build_claim(&candidate, source, sections.path(), document, &mut stats);
                claims.push(claim);
            }
        }

        if open_header == Some(false) {
            stats.empty_sections += 1;
        }

        info!(
            "Extracted {} claims from '{}' ({} skipped, {} excluded, {} unclassified)",
            claims.len(),
            document.name,
            stats.skipped_lines,
            stats.excluded_lines,
            stats.unclassified
        );

        Ok(ClaimExtraction { claims, stats })
    }

    fn build_claim(
        &self,
        text: &str,
        mut source: SourcePosition,
        section: Option<String>,
        document: &SelfModelDocument,
        stats: &mut ClaimExtractionStats,
    ) -> Claim {
        let category = self.categorize(text, section.as_deref(), stats);

        let timestamp = match inline_date(text) {
            Some(date) => {
                stats.dated_inline += 1;
                date.and_time(NaiveTime::MIN).and_utc()
            }
            None => document.revised_at,
        };

        if let Some(section) = section {
            source = source.with_section(section);
        }

        Claim::new(text, category.category, category.confidence, source, timestamp)
            .with_strength(self.strength(text))
    }

    /// Statement text first, then the section header as a coarse hint
    fn categorize(&self, text: &str, section: Option<&str>, stats: &mut ClaimExtractionStats) -> CategoryMatch {
        let direct = self.classifier.classify(text);
        if direct.clears(self.config.min_confidence) {
            return direct;
        }

        if let Some(section) = section {
            let hint = self.classifier.classify(section);
            if hint.clears(self.config.min_confidence) {
                stats.section_hinted += 1;
                return CategoryMatch::new(hint.category, hint.confidence * SECTION_HINT_DISCOUNT);
            }
        }

        stats.unclassified += 1;
        CategoryMatch::none()
    }

    fn strength(&self, text: &str) -> f64 {
        if HEDGE.is_match(text) {
            self.config.hedged_strength
        } else {
            mirror_domain::claim::DEFAULT_STRENGTH
        }
    }
}
