//! Session configuration.
//!
//! Configuration for a gesture camera session, including:
//! - Stabilizer tuning and gesture bindings
//! - The confidence model used to gate frames
//! - Command history size
//! - An optional initially selected target instance
//!
//! ```toml
//! target = "i-0abc123"
//! history_limit = 50
//!
//! [stabilizer]
//! window_size = 5
//! cooldown_ms = 3000
//! confidence_threshold = 0.7
//!
//! [confidence]
//! model = "flag_sum"
//! high = 0.9
//! low = 0.5
//! ```

use std::path::Path;

use gestctl_core::{ConfidenceModel, FixedConfidence, FlagSumConfidence, StabilizerConfig};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::history::DEFAULT_HISTORY_LIMIT;

/// Which confidence model scores detected hands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ConfidenceSettings {
    /// Score from the raised-digit count.
    FlagSum {
        /// Score for an unambiguous pose.
        high: f32,
        /// Score for an ambiguous pose.
        low: f32,
    },
    /// The same score for every detected hand.
    Fixed {
        /// The score.
        value: f32,
    },
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        let model = FlagSumConfidence::default();
        Self::FlagSum {
            high: model.high,
            low: model.low,
        }
    }
}

impl ConfidenceSettings {
    /// Builds the configured model.
    #[must_use]
    pub fn build(&self) -> Box<dyn ConfidenceModel> {
        match *self {
            Self::FlagSum { high, low } => Box::new(FlagSumConfidence { high, low }),
            Self::Fixed { value } => Box::new(FixedConfidence(value)),
        }
    }

    fn scores(&self) -> Vec<f32> {
        match *self {
            Self::FlagSum { high, low } => vec![high, low],
            Self::Fixed { value } => vec![value],
        }
    }
}

/// Main session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Instance selected when the session starts.
    pub target: Option<String>,
    /// Number of command records kept.
    pub history_limit: usize,
    /// Stabilizer tuning.
    pub stabilizer: StabilizerConfig,
    /// Confidence model.
    pub confidence: ConfidenceSettings,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            stabilizer: StabilizerConfig::default(),
            confidence: ConfidenceSettings::default(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SessionError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SessionError::Config(format!("invalid TOML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.stabilizer
            .validate()
            .map_err(|e| SessionError::Config(e.to_string()))?;

        if self.history_limit == 0 {
            return Err(SessionError::Config(
                "history_limit must be greater than 0".to_string(),
            ));
        }

        if self.target.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(SessionError::Config("target cannot be empty".to_string()));
        }

        if self
            .confidence
            .scores()
            .iter()
            .any(|score| !(0.0..=1.0).contains(score))
        {
            return Err(SessionError::Config(
                "confidence scores must be within [0, 1]".to_string(),
            ));
        }

        Ok(())
    }
}
