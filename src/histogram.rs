//! Histogram
//!
//! Equal-width histogram estimation turning raw samples into smoothed
//! probability vectors. Two samples that are going to be compared must be
//! binned over the same [`BinEdges`], see [`histogram_pair`].
use crate::constants::{DEGENERATE_HALF_WIDTH, DEGENERATE_RELATIVE_WIDTH, EPSILON};
use crate::errors::DriftError;
use crate::utils::{validate_bins, validate_sample};
use serde::{Deserialize, Serialize};

/// Equal-width bin layout spanning `[min, max]`.
///
/// The last bin is closed on the right, every other bin is half open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinEdges {
    /// Left edge of the first bin.
    pub min: f64,
    /// Right edge of the last bin.
    pub max: f64,
    /// Number of bins.
    pub bins: usize,
}

impl BinEdges {
    /// Create edges over `[min, max]`.
    ///
    /// When the range is empty, or too narrow to be split into bins, it is
    /// widened around its centre by `max(0.5, 1e-9 * |centre|)` on each side,
    /// so a constant sample still gets a valid layout.
    pub fn new(min: f64, max: f64, bins: usize) -> Result<Self, DriftError> {
        validate_bins(bins)?;
        if !min.is_finite() || !max.is_finite() {
            return Err(DriftError::InvalidInput(format!(
                "histogram range [{}, {}] is not finite",
                min, max
            )));
        }
        if min > max {
            return Err(DriftError::InvalidInput(format!(
                "histogram range minimum {} exceeds maximum {}",
                min, max
            )));
        }
        let half_span = max / 2.0 - min / 2.0;
        let (min, max) = if half_span.is_normal() {
            (min, max)
        } else {
            let centre = min / 2.0 + max / 2.0;
            let pad = DEGENERATE_HALF_WIDTH.max(centre.abs() * DEGENERATE_RELATIVE_WIDTH);
            ((centre - pad).max(f64::MIN), (centre + pad).min(f64::MAX))
        };
        Ok(BinEdges { min, max, bins })
    }

    /// Edges spanning the range of a single sample.
    pub fn from_sample(data: &[f64], bins: usize) -> Result<Self, DriftError> {
        Self::from_samples(&[data], bins)
    }

    /// Edges spanning the union range of all samples.
    pub fn from_samples(samples: &[&[f64]], bins: usize) -> Result<Self, DriftError> {
        if samples.is_empty() {
            return Err(DriftError::InvalidInput("no samples to derive bin edges from".to_string()));
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (i, sample) in samples.iter().enumerate() {
            validate_sample(sample, &format!("sample {}", i))?;
            for v in sample.iter() {
                min = min.min(*v);
                max = max.max(*v);
            }
        }
        Self::new(min, max, bins)
    }

    // Half of `max - min`, finite for any finite range.
    #[inline]
    fn half_span(&self) -> f64 {
        self.max / 2.0 - self.min / 2.0
    }

    /// Width of a single bin. Infinite when the range exceeds `f64::MAX`.
    pub fn width(&self) -> f64 {
        2.0 * (self.half_span() / self.bins as f64)
    }

    /// All `bins + 1` edge positions.
    pub fn edges(&self) -> Vec<f64> {
        let step = self.half_span() / self.bins as f64;
        let mut edges: Vec<f64> = (0..self.bins)
            .map(|i| 2.0 * (self.min / 2.0 + step * i as f64))
            .collect();
        edges.push(self.max);
        edges
    }

    /// Bin a value falls in, `None` if it lies outside of the range.
    #[inline]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if !(self.min..=self.max).contains(&value) {
            return None;
        }
        let frac = (value / 2.0 - self.min / 2.0) / self.half_span();
        let idx = (frac * self.bins as f64) as usize;
        Some(idx.min(self.bins - 1))
    }
}

/// Add epsilon to every entry and divide by the new total.
pub fn smooth_normalize(v: &[f64]) -> Vec<f64> {
    let smoothed: Vec<f64> = v.iter().map(|x| x + EPSILON).collect();
    let total: f64 = smoothed.iter().sum();
    smoothed.iter().map(|x| x / total).collect()
}

/// Histogram a sample over pre-computed edges.
///
/// Counts are normalised by the number of binned values (bins share one
/// width, so this is the density up to a constant), smoothed and
/// renormalised. The result has `edges.bins` strictly positive entries
/// summing to one. Values outside of the edges are ignored.
pub fn histogram_with_edges(data: &[f64], edges: &BinEdges) -> Result<Vec<f64>, DriftError> {
    validate_sample(data, "data")?;
    validate_bins(edges.bins)?;

    let mut counts = vec![0usize; edges.bins];
    let mut n_in = 0usize;
    for v in data {
        if let Some(i) = edges.bin_index(*v) {
            counts[i] += 1;
            n_in += 1;
        }
    }

    let frequencies: Vec<f64> = if n_in == 0 {
        vec![0.0; edges.bins]
    } else {
        counts.iter().map(|c| *c as f64 / n_in as f64).collect()
    };
    Ok(smooth_normalize(&frequencies))
}

/// Convert a raw sample into a smoothed probability vector with `bins`
/// equal-width bins spanning `[min(data), max(data)]`.
///
/// * `data` - Non-empty, finite sample.
/// * `bins` - Number of bins, at least one.
pub fn compute_histogram(data: &[f64], bins: usize) -> Result<Vec<f64>, DriftError> {
    validate_bins(bins)?;
    let edges = BinEdges::from_sample(data, bins)?;
    histogram_with_edges(data, &edges)
}

/// Histogram two samples over the same edges, derived from their union range.
pub fn histogram_pair(p: &[f64], q: &[f64], bins: usize) -> Result<(Vec<f64>, Vec<f64>), DriftError> {
    validate_bins(bins)?;
    let edges = BinEdges::from_samples(&[p, q], bins)?;
    Ok((histogram_with_edges(p, &edges)?, histogram_with_edges(q, &edges)?))
}
