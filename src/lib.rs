//! Drift detection between a reference and a current data window.
//!
//! Samples are turned into smoothed histograms over shared bin edges
//! ([`histogram`]), compared with KL, Jensen-Shannon or Hellinger
//! ([`divergence`]) and labelled by severity ([`drift`]). The [`stream`]
//! module supplies records from a replayed dataset or a polled source.

// Modules
pub mod config;
pub mod constants;
pub mod divergence;
pub mod drift;
pub mod errors;
pub mod histogram;
pub mod stream;
pub mod utils;

// Individual classes, and functions
pub use config::{ConfigIO, DriftConfig, StreamSettings};
pub use divergence::{
    divergence, divergence_from_samples, hellinger_distance, hellinger_distance_from_samples, jensen_shannon,
    jensen_shannon_from_samples, kl_divergence, kl_divergence_from_samples, DivergenceMethod, DivergenceResult,
};
pub use drift::{categorize_drift, detect_drift, DriftDetector, DriftLabel, DriftThresholds};
pub use errors::DriftError;
pub use histogram::{compute_histogram, BinEdges};
pub use stream::{
    PollingStreamSource, RecordId, SimulatedStreamSource, StreamConfig, StreamManager, StreamRecord, StreamSource,
};
