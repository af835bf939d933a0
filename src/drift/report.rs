//! Per feature drift report over two record windows.
use crate::divergence::{divergence_from_samples, DivergenceMethod};
use crate::drift::classify::{DriftLabel, DriftThresholds};
use crate::errors::DriftError;
use crate::stream::record::{collect_feature, StreamRecord};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Drift of a single feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDrift {
    pub feature: String,
    pub value: f64,
    pub method: DivergenceMethod,
    pub label: DriftLabel,
}

/// Compare every named feature of `current` against `reference`.
///
/// Features are scored in parallel, the output keeps the order of `features`.
/// Fails if a window is empty or a record lacks one of the features.
pub fn feature_drift_report(
    reference: &[StreamRecord],
    current: &[StreamRecord],
    features: &[&str],
    method: DivergenceMethod,
    bins: usize,
    thresholds: &DriftThresholds,
) -> Result<Vec<FeatureDrift>, DriftError> {
    features
        .par_iter()
        .map(|name| -> Result<FeatureDrift, DriftError> {
            let reference_window = collect_feature(reference, name)?;
            let current_window = collect_feature(current, name)?;
            let result = divergence_from_samples(method, &current_window, &reference_window, bins)?;
            Ok(FeatureDrift {
                feature: name.to_string(),
                value: result.value,
                method,
                label: thresholds.categorize_method(result.value, method),
            })
        })
        .collect()
}
