//! Threshold based drift detection between a reference and a current window.
use crate::config::DriftConfig;
use crate::divergence::{divergence_from_samples, kl_divergence_from_samples, DivergenceMethod};
use crate::drift::classify::DriftLabel;
use crate::drift::report::{feature_drift_report, FeatureDrift};
use crate::errors::DriftError;
use crate::stream::record::StreamRecord;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Flag drift when `D_KL(current || reference)` exceeds `threshold`.
///
/// Both windows are histogrammed with `bins` bins over their union range.
/// Returns whether drift was detected together with the score.
pub fn detect_drift(
    current_window: &[f64],
    reference_window: &[f64],
    bins: usize,
    threshold: f64,
) -> Result<(bool, f64), DriftError> {
    if threshold.is_nan() {
        return Err(DriftError::InvalidInput("threshold must not be NaN".to_string()));
    }
    let score = kl_divergence_from_samples(current_window, reference_window, bins)?;
    let drift = score > threshold;
    if drift {
        info!("Drift detected: KL score {:.4} above threshold {:.4}.", score, threshold);
    } else {
        debug!("No drift: KL score {:.4}, threshold {:.4}.", score, threshold);
    }
    Ok((drift, score))
}

/// Result of a configured comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftOutcome {
    pub drift: bool,
    pub score: f64,
    pub method: DivergenceMethod,
    pub label: DriftLabel,
}

/// Compares windows according to a validated [`DriftConfig`].
#[derive(Debug, Clone)]
pub struct DriftDetector {
    config: DriftConfig,
}

impl DriftDetector {
    pub fn new(config: DriftConfig) -> Result<Self, DriftError> {
        config.validate()?;
        Ok(DriftDetector { config })
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Score `current` against `reference` with the configured method.
    pub fn detect(&self, current: &[f64], reference: &[f64]) -> Result<DriftOutcome, DriftError> {
        let result = divergence_from_samples(self.config.method, current, reference, self.config.bins)?;
        let drift = result.value > self.config.threshold;
        let label = self.config.thresholds.categorize_method(result.value, result.method);
        if drift {
            info!(
                "Drift detected: {} score {:.4} above threshold {:.4}, labelled {}.",
                result.method, result.value, self.config.threshold, label
            );
        }
        Ok(DriftOutcome {
            drift,
            score: result.value,
            method: result.method,
            label,
        })
    }

    /// Per feature comparison of two record windows.
    pub fn report(
        &self,
        reference: &[StreamRecord],
        current: &[StreamRecord],
        features: &[&str],
    ) -> Result<Vec<FeatureDrift>, DriftError> {
        feature_drift_report(
            reference,
            current,
            features,
            self.config.method,
            self.config.bins,
            &self.config.thresholds,
        )
    }
}
