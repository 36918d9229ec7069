//! Configuration for the Extractor

use crate::taxonomy::{CategoryRule, Taxonomy};
use serde::{Deserialize, Serialize};

/// Configuration for claim and behavior extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Minimum classifier confidence for a category to be assigned
    /// Default: 0.5 (one keyword hit)
    pub min_confidence: f64,

    /// Self-model sections holding observations rather than claims
    pub excluded_sections: Vec<String>,

    /// Strength given to claims with hedging cues ("sometimes", "try to")
    /// Default: 0.5
    pub hedged_strength: f64,

    /// Rules added to the built-in taxonomy
    pub extra_rules: Vec<CategoryRule>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(format!(
                "min_confidence must be within [0.0, 1.0], got {}",
                self.min_confidence
            ));
        }
        if !(self.hedged_strength > 0.0 && self.hedged_strength <= 1.0) {
            return Err(format!(
                "hedged_strength must be within (0.0, 1.0], got {}",
                self.hedged_strength
            ));
        }
        for rule in &self.extra_rules {
            if rule.category.as_str().is_empty() {
                return Err("extra_rules entries need a category name".to_string());
            }
            if rule.category.is_unclassified() {
                return Err("extra_rules cannot target the unclassified category".to_string());
            }
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(format!("extra rule '{}' has no keywords", rule.category));
            }
        }
        Ok(())
    }

    /// The built-in taxonomy extended with `extra_rules`
    pub fn taxonomy(&self) -> Taxonomy {
        let mut taxonomy = Taxonomy::default();
        taxonomy.extend(self.extra_rules.iter().cloned());
        taxonomy
    }

    /// Strict preset: two keyword hits needed before a category is assigned
    pub fn strict() -> Self {
        Self {
            min_confidence: 0.75,
            ..Self::default()
        }
    }

    /// Lenient preset: every section counts as claims, hedges weigh more
    pub fn lenient() -> Self {
        Self {
            excluded_sections: Vec::new(),
            hedged_strength: 0.8,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            excluded_sections: vec![
                "気づき・学び".to_string(),
                "Learnings".to_string(),
                "Observations".to_string(),
            ],
            hedged_strength: 0.5,
            extra_rules: Vec::new(),
        }
    }
}
