//! Configuration for analysis runs
//!
//! Defines half-lives for temporal decay, the evidence minimum behind the
//! confidence factor, and the classifier thresholds.

use crate::error::ConfigurationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration for the Analyzer
///
/// # Examples
///
/// ```
/// use mirror_analyzer::AnalyzerConfig;
///
/// // Default configuration (balanced)
/// let config = AnalyzerConfig::default();
/// assert_eq!(config.half_life_days, 21);
///
/// // Strict: fewer, better supported findings
/// let config = AnalyzerConfig::strict();
/// assert_eq!(config.min_evidence_count, 5.0);
///
/// // Lenient: surfaces smaller gaps earlier
/// let config = AnalyzerConfig::lenient();
/// assert_eq!(config.calibration_gap_threshold, 0.07);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Days after which a record's weight halves
    /// Default: 21
    pub half_life_days: u32,

    /// Half-life override for claims
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_half_life_days: Option<u32>,

    /// Half-life override for behaviors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior_half_life_days: Option<u32>,

    /// Weighted mass (claims plus behaviors) at which a category's
    /// confidence factor saturates at 1.0
    /// Default: 3.0
    pub min_evidence_count: f64,

    /// Claim share above which a missing behavior is a contradiction
    /// Default: 0.15
    pub contradiction_claim_threshold: f64,

    /// Behavior share below which a claimed category counts as absent
    /// Default: 0.02
    pub contradiction_behavior_threshold: f64,

    /// Behavior share above which an unclaimed category is a blind spot
    /// Default: 0.15
    pub blindspot_behavior_threshold: f64,

    /// Claim share below which a practiced category counts as unclaimed
    /// Default: 0.02
    pub blindspot_claim_threshold: f64,

    /// |raw_gap| above which both-sided categories are miscalibrated
    /// Default: 0.10
    pub calibration_gap_threshold: f64,

    /// |raw_gap| below which an aligned category is within tolerance
    /// Default: 0.05
    pub aligned_gap_threshold: f64,

    /// Excerpts kept per side of each finding
    /// Default: 3
    pub max_excerpts_per_finding: usize,

    /// Reference time for decay; current time when unset
    ///
    /// Read from an RFC 3339 string or a native TOML datetime. A value
    /// without an offset, or a bare date, is taken as UTC.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "reference_time::deserialize"
    )]
    pub now: Option<DateTime<Utc>>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            half_life_days: 21,
            claim_half_life_days: None,
            behavior_half_life_days: None,
            min_evidence_count: 3.0,
            contradiction_claim_threshold: 0.15,
            contradiction_behavior_threshold: 0.02,
            blindspot_behavior_threshold: 0.15,
            blindspot_claim_threshold: 0.02,
            calibration_gap_threshold: 0.10,
            aligned_gap_threshold: 0.05,
            max_excerpts_per_finding: 3,
            now: None,
        }
    }
}

impl AnalyzerConfig {
    /// Strict configuration: more evidence and larger gaps before reporting
    pub fn strict() -> Self {
        Self {
            min_evidence_count: 5.0,
            contradiction_claim_threshold: 0.20,
            blindspot_behavior_threshold: 0.20,
            calibration_gap_threshold: 0.15,
            ..Self::default()
        }
    }

    /// Lenient configuration: sparse evidence and small gaps are surfaced
    pub fn lenient() -> Self {
        Self {
            min_evidence_count: 1.0,
            contradiction_claim_threshold: 0.10,
            blindspot_behavior_threshold: 0.10,
            calibration_gap_threshold: 0.07,
            aligned_gap_threshold: 0.03,
            ..Self::default()
        }
    }

    /// Half-life applied to claims
    pub fn claim_half_life(&self) -> u32 {
        self.claim_half_life_days.unwrap_or(self.half_life_days)
    }

    /// Half-life applied to behaviors
    pub fn behavior_half_life(&self) -> u32 {
        self.behavior_half_life_days.unwrap_or(self.half_life_days)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let half_lives = [
            ("half_life_days", Some(self.half_life_days)),
            ("claim_half_life_days", self.claim_half_life_days),
            ("behavior_half_life_days", self.behavior_half_life_days),
        ];
        for (field, value) in half_lives {
            if value == Some(0) {
                return Err(ConfigurationError::NonPositiveHalfLife { field });
            }
        }

        if !self.min_evidence_count.is_finite() || self.min_evidence_count < 0.0 {
            return Err(ConfigurationError::InvalidEvidenceMinimum(self.min_evidence_count));
        }

        let thresholds = [
            ("contradiction_claim_threshold", self.contradiction_claim_threshold),
            ("contradiction_behavior_threshold", self.contradiction_behavior_threshold),
            ("blindspot_behavior_threshold", self.blindspot_behavior_threshold),
            ("blindspot_claim_threshold", self.blindspot_claim_threshold),
            ("calibration_gap_threshold", self.calibration_gap_threshold),
            ("aligned_gap_threshold", self.aligned_gap_threshold),
        ];
        for (field, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::ThresholdOutOfRange { field, value });
            }
        }

        // (low, high, equal allowed)
        let pairs = [
            (
                ("contradiction_behavior_threshold", self.contradiction_behavior_threshold),
                ("contradiction_claim_threshold", self.contradiction_claim_threshold),
                false,
            ),
            (
                ("blindspot_claim_threshold", self.blindspot_claim_threshold),
                ("blindspot_behavior_threshold", self.blindspot_behavior_threshold),
                false,
            ),
            (
                ("aligned_gap_threshold", self.aligned_gap_threshold),
                ("calibration_gap_threshold", self.calibration_gap_threshold),
                true,
            ),
        ];
        for ((low, low_value), (high, high_value), equal_allowed) in pairs {
            let inverted = if equal_allowed {
                low_value > high_value
            } else {
                low_value >= high_value
            };
            if inverted {
                return Err(ConfigurationError::InvertedThresholds {
                    low,
                    low_value,
                    high,
                    high_value,
                });
            }
        }

        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(toml_str).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigurationError> {
        toml::to_string_pretty(self).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }
}

mod reference_time {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Toml(toml::value::Datetime),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Option::<Raw>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(Raw::Text(text)) => text,
            Some(Raw::Toml(datetime)) => datetime.to_string(),
        };
        parse(&text)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("'{}' is not an RFC 3339 date and time", text)))
    }

    fn parse(text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();
        if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
            return Some(datetime.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .map(|day| day.and_time(NaiveTime::MIN).and_utc())
    }
}
