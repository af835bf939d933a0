//! Configuration
//!
//! Serializable settings for drift detection and stream construction, with
//! JSON persistence through [`ConfigIO`].
use crate::constants::{DEFAULT_BINS, DEFAULT_DRIFT_THRESHOLD, DEFAULT_MAX_SEEN, DEFAULT_POLLING_INTERVAL_MS};
use crate::divergence::DivergenceMethod;
use crate::drift::classify::DriftThresholds;
use crate::errors::DriftError;
use crate::utils::validate_float_parameter;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

fn default_bins() -> usize {
    DEFAULT_BINS
}
fn default_threshold() -> f64 {
    DEFAULT_DRIFT_THRESHOLD
}
fn default_polling_interval_ms() -> u64 {
    DEFAULT_POLLING_INTERVAL_MS
}
fn default_max_seen() -> usize {
    DEFAULT_MAX_SEEN
}

/// Numeric parameters of the stream sources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreamSettings {
    /// Pause between two replayed records, in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,
    /// Pause between two polls, in milliseconds.
    #[serde(default = "default_polling_interval_ms")]
    pub polling_interval_ms: u64,
    /// Identities a polling source remembers for deduplication.
    #[serde(default = "default_max_seen")]
    pub max_seen: usize,
}

impl Default for StreamSettings {
    fn default() -> Self {
        StreamSettings {
            delay_ms: 0,
            polling_interval_ms: DEFAULT_POLLING_INTERVAL_MS,
            max_seen: DEFAULT_MAX_SEEN,
        }
    }
}

impl StreamSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }
}

/// Configuration for a [`DriftDetector`](crate::drift::DriftDetector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Number of histogram bins.
    #[serde(default = "default_bins")]
    pub bins: usize,
    /// Scores strictly above this value are flagged as drift.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Divergence used for scoring.
    #[serde(default)]
    pub method: DivergenceMethod,
    /// Cutoffs used for severity labels.
    #[serde(default)]
    pub thresholds: DriftThresholds,
    #[serde(default)]
    pub stream: StreamSettings,
}

impl Default for DriftConfig {
    fn default() -> Self {
        DriftConfig {
            bins: DEFAULT_BINS,
            threshold: DEFAULT_DRIFT_THRESHOLD,
            method: DivergenceMethod::Kl,
            thresholds: DriftThresholds::default(),
            stream: StreamSettings::default(),
        }
    }
}

impl DriftConfig {
    pub fn validate(&self) -> Result<(), DriftError> {
        if self.bins < 1 {
            return Err(DriftError::Configuration(format!(
                "bins must be at least 1, {} provided",
                self.bins
            )));
        }
        validate_float_parameter(self.threshold, 0.0, f64::MAX, "threshold")?;
        self.thresholds.validate()?;
        if self.stream.max_seen < 1 {
            return Err(DriftError::Configuration(
                "stream.max_seen must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Save the configuration as a json object to a file.
    ///
    /// * `path` - Path to save the configuration.
    fn save_config<P: AsRef<Path>>(&self, path: P) -> Result<(), DriftError> {
        fs::write(path, self.json_dump()?).map_err(|e| DriftError::UnableToWrite(e.to_string()))
    }

    /// Dump the configuration as a json object.
    fn json_dump(&self) -> Result<String, DriftError> {
        serde_json::to_string(self).map_err(|e| DriftError::UnableToWrite(e.to_string()))
    }

    /// Load the configuration from a json string.
    fn from_json(json_str: &str) -> Result<Self, DriftError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| DriftError::UnableToRead(e.to_string()))
    }

    /// Load the configuration from a path to a json file.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, DriftError> {
        let json_str = fs::read_to_string(path).map_err(|e| DriftError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for DriftConfig {}
impl ConfigIO for StreamSettings {}
