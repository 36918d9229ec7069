//! Behavior extraction from the day-keyed log corpus

use crate::config::ExtractorConfig;
use crate::error::{MalformedLogError, MalformedReason};
use crate::markdown::{classify_line, is_placeholder, parse_day_key, tags, Line};
use crate::types::{BehaviorExtraction, BehaviorExtractionStats, BlockContent, LogBlock};
use chrono::NaiveDate;
use mirror_domain::{Behavior, CategoryClassifier, CategoryMatch, SourcePosition};
use tracing::{debug, info, warn};

/// Header level that opens a session inside a day block
const SESSION_LEVEL: usize = 2;

/// Turns log blocks into categorized behaviors
pub struct BehaviorExtractor<C: CategoryClassifier> {
    classifier: C,
    config: ExtractorConfig,
}

impl<C: CategoryClassifier> BehaviorExtractor<C> {
    /// Create a new behavior extractor
    pub fn new(classifier: C, config: ExtractorConfig) -> Self {
        Self { classifier, config }
    }

    /// Extract behaviors from all blocks
    ///
    /// Never fails. Blocks that cannot be used are reported in
    /// [`BehaviorExtraction::malformed`] and skipped.
    pub fn extract(&self, blocks: &[LogBlock]) -> BehaviorExtraction {
        let mut stats = BehaviorExtractionStats {
            blocks_total: blocks.len(),
            ..Default::default()
        };
        let mut malformed = Vec::new();
        let mut dated: Vec<(NaiveDate, &LogBlock, &str)> = Vec::new();

        for block in blocks {
            match validate(block) {
                Ok((day, text)) => dated.push((day, block, text)),
                Err(err) => {
                    warn!("{}", err);
                    malformed.push(err);
                }
            }
        }

        // Stable: blocks sharing a day keep their input order
        dated.sort_by_key(|(day, _, _)| *day);

        let mut behaviors = Vec::new();
        for (day, block, text) in dated {
            stats.blocks_parsed += 1;
            let before = behaviors.len();
            self.extract_block(day, block, text, &mut behaviors, &mut stats);
            if behaviors.len() == before {
                debug!("Log block '{}' holds no entries", block.label);
                stats.empty_blocks += 1;
            }
        }

        info!(
            "Extracted {} behaviors from {} blocks ({} malformed, {} unclassified)",
            behaviors.len(),
            stats.blocks_parsed,
            malformed.len(),
            stats.unclassified
        );

        BehaviorExtraction {
            behaviors,
            malformed,
            stats,
        }
    }

    fn extract_block(
        &self,
        day: NaiveDate,
        block: &LogBlock,
        text: &str,
        behaviors: &mut Vec<Behavior>,
        stats: &mut BehaviorExtractionStats,
    ) {
        let mut session: Option<String> = None;
        let mut in_fence = false;

        for (idx, raw) in text.lines().enumerate() {
            let line = classify_line(raw);
            if line == Line::Fence {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }

            let entry = match line {
                Line::Header { level, title } => {
                    if level == SESSION_LEVEL {
                        session = Some(title.to_string());
                    }
                    continue;
                }
                Line::Bullet(entry) => entry,
                _ => continue,
            };

            if is_placeholder(entry) {
                debug!("Skipping placeholder entry at {}:{}", block.label, idx + 1);
                stats.skipped_entries += 1;
                continue;
            }

            let entry_tags = tags(entry);
            let category = self.categorize(entry, &entry_tags, stats);
            let source = SourcePosition::new(block.label.clone(), idx + 1);

            let mut behavior = Behavior::new(entry, category.category, category.confidence, day, source)
                .with_tags(entry_tags);
            if let Some(session) = &session {
                behavior = behavior.with_session(session.clone());
            }
            behaviors.push(behavior);
        }
    }

    /// An explicit tag naming a known category beats the keyword matcher
    fn categorize(&self, entry: &str, entry_tags: &[String], stats: &mut BehaviorExtractionStats) -> CategoryMatch {
        if let Some(category) = entry_tags
            .iter()
            .find_map(|tag| self.classifier.category_named(tag))
        {
            stats.tagged += 1;
            return CategoryMatch::new(category, 1.0);
        }

        let matched = self.classifier.classify(entry);
        if matched.clears(self.config.min_confidence) {
            return matched;
        }

        stats.unclassified += 1;
        CategoryMatch::none()
    }
}

/// Check the day key and decode the block
fn validate(block: &LogBlock) -> Result<(NaiveDate, &str), MalformedLogError> {
    let malformed = |reason| MalformedLogError::new(block.label.clone(), reason);

    let key = block
        .day_key
        .as_deref()
        .ok_or_else(|| malformed(MalformedReason::MissingDayKey))?;
    let day = parse_day_key(key).ok_or_else(|| {
        malformed(MalformedReason::InvalidDayKey {
            key: key.to_string(),
        })
    })?;

    let text = match &block.content {
        BlockContent::Bytes(bytes) => {
            std::str::from_utf8(bytes).map_err(|_| malformed(MalformedReason::InvalidEncoding))?
        }
        BlockContent::Unreadable(message) => {
            return Err(malformed(MalformedReason::Unreadable {
                message: message.clone(),
            }))
        }
    };

    Ok((day, text))
}

/// Split one concatenated log into day blocks on `# YYYY-MM-DD` headers
///
/// Each top-level header starts a block keyed by its title; a title that is
/// not a date yields a block that the extractor will report as malformed.
/// Non-blank text before the first header becomes a block without a day key.
pub fn split_day_sections(label: &str, text: &str) -> Vec<LogBlock> {
    let mut blocks = Vec::new();
    let mut key: Option<String> = None;
    let mut body = String::new();
    let mut in_fence = false;

    let mut flush = |key: Option<String>, body: &mut String| {
        if key.is_some() || !body.trim().is_empty() {
            let block_label = match &key {
                Some(k) => format!("{} > {}", label, k),
                None => label.to_string(),
            };
            blocks.push(LogBlock::new(block_label, key, body.as_bytes()));
        }
        body.clear();
    };

    for raw in text.lines() {
        let line = classify_line(raw);
        if line == Line::Fence {
            in_fence = !in_fence;
        }
        if !in_fence {
            if let Line::Header { level: 1, title } = line {
                flush(key.take(), &mut body);
                key = Some(title.to_string());
                continue;
            }
        }
        body.push_str(raw);
        body.push('\n');
    }
    flush(key, &mut body);

    blocks
}
