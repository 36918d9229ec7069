//! Configuration management for the CLI.
//!
//! Settings come from `mirror.toml`. Analysis options sit at the top level
//! (the [`AnalyzerConfig`] keys), `[extraction]` maps onto
//! [`ExtractorConfig`] and `[output]` holds display preferences. Missing
//! tables and keys take their defaults.

use crate::error::{CliError, Result};
use mirror_analyzer::{AnalyzerConfig, ConfigurationError};
use mirror_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "mirror.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Config {
    /// Decay, evidence and threshold settings
    #[serde(flatten)]
    pub analysis: AnalyzerConfig,

    /// Claim and behavior extraction settings
    pub extraction: ExtractorConfig,

    /// Display settings
    pub output: Settings,
}

/// Tables read next to the top-level analysis keys.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Sections {
    extraction: ExtractorConfig,
    output: Settings,
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enable colored output
    pub color: bool,

    /// Default output format
    pub format: OutputFormat,

    /// Excerpts shown per finding in table output
    pub excerpts_shown: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Resolve the configuration file: an explicit path, else `./mirror.toml`
    /// if it exists.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.is_file().then_some(local)
            }
        }
    }

    /// Load configuration from file or fall back to defaults.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit) {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let analysis: AnalyzerConfig = toml::from_str(contents)?;
        let sections: Sections = toml::from_str(contents)?;
        Ok(Self {
            analysis,
            extraction: sections.extraction,
            output: sections.output,
        })
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        self.extraction
            .validate()
            .map_err(ConfigurationError::Extraction)?;
        if self.output.excerpts_shown == 0 {
            return Err(CliError::InvalidInput(
                "output.excerpts_shown must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            excerpts_shown: 1,
        }
    }
}
