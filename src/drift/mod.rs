//! Drift Detection Logic
//!
//! Severity classification of divergence values, threshold based detection
//! between two windows, and per feature reports over record windows.

pub mod classify;
pub mod detect;
pub mod report;

pub use classify::{categorize_drift, DriftLabel, DriftThresholds, SeverityCutoffs};
pub use detect::{detect_drift, DriftDetector, DriftOutcome};
pub use report::{feature_drift_report, FeatureDrift};
