//! Gap classification with fixed, configurable thresholds

use crate::config::AnalyzerConfig;
use crate::emphasis::CategoryGap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of finding a category gap represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Claimed, but barely practiced
    Contradiction,
    /// Practiced, but never claimed
    BlindSpot,
    /// Present on both sides with a notable difference in emphasis
    CalibrationMismatch,
    /// Emphasis roughly matches
    Aligned,
    /// One side has no classified evidence at all
    InsufficientEvidence,
}

impl Classification {
    /// Whether the classification calls for attention
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            Self::Contradiction | Self::BlindSpot | Self::CalibrationMismatch
        )
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Contradiction => "contradiction",
            Self::BlindSpot => "blind spot",
            Self::CalibrationMismatch => "calibration mismatch",
            Self::Aligned => "aligned",
            Self::InsufficientEvidence => "insufficient evidence",
        };
        f.write_str(label)
    }
}

/// Classification of one gap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Assigned classification
    pub classification: Classification,

    /// Aligned with |raw_gap| under the tolerance
    pub within_tolerance: bool,
}

/// Threshold set applied to every gap
///
/// Comparisons are strict, so a value sitting exactly on a threshold gets
/// the less alarming label. A calibration mismatch needs both sides present
/// (claim share at least the blind-spot floor, behavior share at least the
/// contradiction floor); a one-sided gap below the extreme thresholds is
/// reported as aligned outside tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapClassifier {
    contradiction_claim: f64,
    contradiction_behavior: f64,
    blindspot_behavior: f64,
    blindspot_claim: f64,
    calibration_gap: f64,
    aligned_gap: f64,
}

impl GapClassifier {
    /// Build from configured thresholds
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            contradiction_claim: config.contradiction_claim_threshold,
            contradiction_behavior: config.contradiction_behavior_threshold,
            blindspot_behavior: config.blindspot_behavior_threshold,
            blindspot_claim: config.blindspot_claim_threshold,
            calibration_gap: config.calibration_gap_threshold,
            aligned_gap: config.aligned_gap_threshold,
        }
    }

    /// Classify a gap; `either_side_empty` marks a run missing one corpus
    pub fn classify(&self, gap: &CategoryGap, either_side_empty: bool) -> Verdict {
        let verdict = |classification| Verdict {
            classification,
            within_tolerance: false,
        };

        if either_side_empty {
            return verdict(Classification::InsufficientEvidence);
        }
        if gap.claim_share > self.contradiction_claim && gap.behavior_share < self.contradiction_behavior {
            return verdict(Classification::Contradiction);
        }
        if gap.behavior_share > self.blindspot_behavior && gap.claim_share < self.blindspot_claim {
            return verdict(Classification::BlindSpot);
        }
        let magnitude = gap.raw_gap.abs();
        let both_present =
            gap.claim_share >= self.blindspot_claim && gap.behavior_share >= self.contradiction_behavior;
        if both_present && magnitude > self.calibration_gap {
            return verdict(Classification::CalibrationMismatch);
        }
        Verdict {
            classification: Classification::Aligned,
            within_tolerance: magnitude < self.aligned_gap,
        }
    }
}

impl Default for GapClassifier {
    fn default() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_domain::Category;

    fn gap(claim_share: f64, behavior_share: f64) -> CategoryGap {
        CategoryGap {
            category: Category::new("delegation"),
            claim_share,
            behavior_share,
            raw_gap: behavior_share - claim_share,
            claim_mass: 1.0,
            behavior_mass: 1.0,
            claim_count: 1,
            behavior_count: 1,
            confidence_factor: 1.0,
            severity: 0.0,
        }
    }

    fn classify(claim_share: f64, behavior_share: f64) -> Verdict {
        GapClassifier::default().classify(&gap(claim_share, behavior_share), false)
    }

    #[test]
    fn test_contradiction() {
        assert_eq!(classify(0.20, 0.0).classification, Classification::Contradiction);
    }

    #[test]
    fn test_blind_spot() {
        assert_eq!(classify(0.0, 0.18).classification, Classification::BlindSpot);
    }

    #[test]
    fn test_calibration_mismatch() {
        assert_eq!(
            classify(0.40, 0.25).classification,
            Classification::CalibrationMismatch
        );
    }

    #[test]
    fn test_aligned() {
        let verdict = classify(0.30, 0.28);
        assert_eq!(verdict.classification, Classification::Aligned);
        assert!(verdict.within_tolerance);

        let verdict = classify(0.30, 0.22);
        assert_eq!(verdict.classification, Classification::Aligned);
        assert!(!verdict.within_tolerance);
    }

    #[test]
    fn test_insufficient_evidence_first() {
        let verdict = GapClassifier::default().classify(&gap(0.5, 0.0), true);
        assert_eq!(verdict.classification, Classification::InsufficientEvidence);
    }

    #[test]
    fn test_boundaries_resolve_conservatively() {
        // claim_share exactly on the threshold, nothing observed: not a contradiction
        let verdict = classify(0.15, 0.0);
        assert_eq!(verdict.classification, Classification::Aligned);
        assert!(!verdict.within_tolerance);
        // behavior_share exactly on the low threshold: not a contradiction
        assert_eq!(
            classify(0.30, 0.02).classification,
            Classification::CalibrationMismatch
        );
        // behavior_share exactly on the threshold, never claimed: not a blind spot
        assert_eq!(classify(0.0, 0.15).classification, Classification::Aligned);
        // exactly on the calibration threshold: aligned, outside tolerance
        let verdict = GapClassifier::default().classify(
            &CategoryGap {
                raw_gap: 0.10,
                ..gap(0.3, 0.4)
            },
            false,
        );
        assert_eq!(verdict.classification, Classification::Aligned);
        assert!(!verdict.within_tolerance);
    }

    #[test]
    fn test_one_sided_gap_is_not_calibration_mismatch() {
        // practiced but never claimed, below the blind-spot threshold
        let verdict = classify(0.0, 0.142857);
        assert_eq!(verdict.classification, Classification::Aligned);
        assert!(!verdict.within_tolerance);

        // claimed but never practiced, below the contradiction threshold
        let verdict = classify(0.12, 0.0);
        assert_eq!(verdict.classification, Classification::Aligned);
        assert!(!verdict.within_tolerance);

        // trace amounts on one side still count as absent
        assert_eq!(classify(0.13, 0.019).classification, Classification::Aligned);
        assert_eq!(classify(0.019, 0.13).classification, Classification::Aligned);

        // both sides present with the same gap: calibration mismatch
        assert_eq!(
            classify(0.02, 0.142857).classification,
            Classification::CalibrationMismatch
        );
    }

    #[test]
    fn test_actionable() {
        assert!(Classification::Contradiction.is_actionable());
        assert!(Classification::BlindSpot.is_actionable());
        assert!(Classification::CalibrationMismatch.is_actionable());
        assert!(!Classification::Aligned.is_actionable());
        assert!(!Classification::InsufficientEvidence.is_actionable());
    }

    #[test]
    fn test_display() {
        assert_eq!(Classification::BlindSpot.to_string(), "blind spot");
    }
}
