/// Added to every histogram bin and probability entry before renormalising.
pub const EPSILON: f64 = 1e-8;
/// Half width of the range used when a sample's range is empty or too narrow to bin.
pub const DEGENERATE_HALF_WIDTH: f64 = 0.5;
/// Relative half width used instead when it exceeds `DEGENERATE_HALF_WIDTH`.
pub const DEGENERATE_RELATIVE_WIDTH: f64 = 1e-9;
pub const DEFAULT_BINS: usize = 20;
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_POLLING_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_MAX_SEEN: usize = 100_000;
