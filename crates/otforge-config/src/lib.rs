//! Configuration system for OTForge.
//!
//! Load learner configuration from TOML or YAML to choose the ranking bias,
//! the comparison strategy used during loser search, and an optional cap
//! on MRCD passes, without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use otforge_config::{ComparerType, LearnerConfig, RankingBiasType};
//!
//! let config = LearnerConfig::from_toml_str(r#"
//!     ranking_bias = "faith_low"
//!     comparer = "ctie"
//!
//!     [mrcd]
//!     pass_limit = 50
//! "#).unwrap();
//!
//! assert_eq!(config.ranking_bias, Some(RankingBiasType::FaithLow));
//! assert_eq!(config.comparer, Some(ComparerType::Ctie));
//! assert_eq!(config.pass_limit(), Some(50));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use otforge_config::LearnerConfig;
//!
//! let config = LearnerConfig::load("learner.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main learner configuration.
///
/// Every strategy setting is optional here; whether a combination is
/// complete is decided when strategies are built from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LearnerConfig {
    /// Tie-break policy used when RCD builds a hierarchy.
    #[serde(default)]
    pub ranking_bias: Option<RankingBiasType>,

    /// Comparison strategy used during loser search.
    #[serde(default)]
    pub comparer: Option<ComparerType>,

    /// MRCD loop settings.
    #[serde(default)]
    pub mrcd: MrcdConfig,
}

impl LearnerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the ranking bias.
    pub fn with_ranking_bias(mut self, bias: RankingBiasType) -> Self {
        self.ranking_bias = Some(bias);
        self
    }

    /// Sets the comparison strategy.
    pub fn with_comparer(mut self, comparer: ComparerType) -> Self {
        self.comparer = Some(comparer);
        self
    }

    /// Caps the number of MRCD passes.
    pub fn with_pass_limit(mut self, limit: u64) -> Self {
        self.mrcd.pass_limit = Some(limit);
        self
    }

    /// Returns the MRCD pass limit, if configured.
    pub fn pass_limit(&self) -> Option<u64> {
        self.mrcd.pass_limit
    }

    /// Checks values that are malformed regardless of strategy choice.
    ///
    /// Incomplete strategy combinations are not rejected here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mrcd.pass_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "mrcd.pass_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Named ranking-bias policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingBiasType {
    /// Rank every rankable constraint as high as possible.
    AllHigh,

    /// Keep faithfulness constraints as low as possible.
    FaithLow,

    /// Keep markedness constraints as low as possible.
    MarkLow,
}

impl fmt::Display for RankingBiasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllHigh => write!(f, "all_high"),
            Self::FaithLow => write!(f, "faith_low"),
            Self::MarkLow => write!(f, "mark_low"),
        }
    }
}

/// Named comparison strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparerType {
    /// Exact: tests consistency of the reversed pair.
    Consistent,

    /// Stratum-wise, pooling violations within a stratum.
    Pool,

    /// Stratum-wise, treating conflicting strata as ties.
    Ctie,
}

impl ComparerType {
    /// Returns true if this strategy compares over a biased hierarchy.
    pub fn requires_bias(&self) -> bool {
        matches!(self, Self::Pool | Self::Ctie)
    }
}

impl fmt::Display for ComparerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consistent => write!(f, "consistent"),
            Self::Pool => write!(f, "pool"),
            Self::Ctie => write!(f, "ctie"),
        }
    }
}

/// MRCD loop configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MrcdConfig {
    /// Maximum number of full passes over the winner list.
    pub pass_limit: Option<u64>,
}
