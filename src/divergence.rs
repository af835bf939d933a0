//! Divergence
//!
//! Closed form KL divergence, Jensen-Shannon divergence and Hellinger
//! distance between probability vectors, or between raw samples histogrammed
//! over shared bin edges. All logarithms are natural, so KL and JS are in nats
//! and JS is bounded by `ln 2`.
use crate::errors::DriftError;
use crate::histogram::{histogram_pair, smooth_normalize};
use crate::utils::{items_to_strings, validate_probabilities};
use serde::{Deserialize, Serialize};
use std::f64::consts::{LN_2, SQRT_2};
use std::fmt;
use std::str::FromStr;

/// Divergence measure used to compare two distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DivergenceMethod {
    /// Kullback-Leibler divergence, asymmetric and unbounded.
    #[default]
    Kl,
    /// Jensen-Shannon divergence, symmetric and bounded by `ln 2`.
    Js,
    /// Hellinger distance, bounded in `[0, 1]`.
    Hellinger,
}

impl DivergenceMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DivergenceMethod::Kl => "kl",
            DivergenceMethod::Js => "js",
            DivergenceMethod::Hellinger => "hellinger",
        }
    }
}

impl fmt::Display for DivergenceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DivergenceMethod {
    type Err = DriftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kl" => Ok(DivergenceMethod::Kl),
            "js" => Ok(DivergenceMethod::Js),
            "hellinger" => Ok(DivergenceMethod::Hellinger),
            _ => Err(DriftError::ParseString(
                s.to_string(),
                "DivergenceMethod".to_string(),
                items_to_strings(vec!["kl", "js", "hellinger"]),
            )),
        }
    }
}

/// The outcome of a single comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivergenceResult {
    pub value: f64,
    pub method: DivergenceMethod,
}

fn check_shape(p: &[f64], q: &[f64]) -> Result<(), DriftError> {
    if p.len() != q.len() {
        Err(DriftError::ShapeMismatch(p.len(), q.len()))
    } else {
        Ok(())
    }
}

/// Validate two caller supplied vectors and smooth them so every entry is positive.
fn prepare(p: &[f64], q: &[f64]) -> Result<(Vec<f64>, Vec<f64>), DriftError> {
    check_shape(p, q)?;
    validate_probabilities(p, "p")?;
    validate_probabilities(q, "q")?;
    Ok((smooth_normalize(p), smooth_normalize(q)))
}

// The kernels below expect equal length, strictly positive, normalised vectors.

#[inline]
fn kl_kernel(p: &[f64], q: &[f64]) -> f64 {
    let d: f64 = p.iter().zip(q).map(|(pi, qi)| pi * (pi / qi).ln()).sum();
    d.max(0.0)
}

fn js_kernel(p: &[f64], q: &[f64]) -> f64 {
    let m: Vec<f64> = p.iter().zip(q).map(|(pi, qi)| (pi + qi) / 2.0).collect();
    let d = 0.5 * kl_kernel(p, &m) + 0.5 * kl_kernel(q, &m);
    d.clamp(0.0, LN_2)
}

fn hellinger_kernel(p: &[f64], q: &[f64]) -> f64 {
    let s: f64 = p.iter().zip(q).map(|(pi, qi)| (pi.sqrt() - qi.sqrt()).powi(2)).sum();
    (s.sqrt() / SQRT_2).clamp(0.0, 1.0)
}

fn kernel(method: DivergenceMethod) -> fn(&[f64], &[f64]) -> f64 {
    match method {
        DivergenceMethod::Kl => kl_kernel,
        DivergenceMethod::Js => js_kernel,
        DivergenceMethod::Hellinger => hellinger_kernel,
    }
}

/// `D_KL(p || q) = sum p_i ln(p_i / q_i)` over smoothed copies of `p` and `q`.
pub fn kl_divergence(p: &[f64], q: &[f64]) -> Result<f64, DriftError> {
    let (p, q) = prepare(p, q)?;
    Ok(kl_kernel(&p, &q))
}

/// `JS(p, q) = 0.5 D_KL(p || m) + 0.5 D_KL(q || m)` with `m = (p + q) / 2`.
pub fn jensen_shannon(p: &[f64], q: &[f64]) -> Result<f64, DriftError> {
    let (p, q) = prepare(p, q)?;
    Ok(js_kernel(&p, &q))
}

/// `H(p, q) = sqrt(sum (sqrt(p_i) - sqrt(q_i))^2) / sqrt(2)`.
pub fn hellinger_distance(p: &[f64], q: &[f64]) -> Result<f64, DriftError> {
    let (p, q) = prepare(p, q)?;
    Ok(hellinger_kernel(&p, &q))
}

/// Compare two probability vectors with the given method.
pub fn divergence(method: DivergenceMethod, p: &[f64], q: &[f64]) -> Result<DivergenceResult, DriftError> {
    let (p, q) = prepare(p, q)?;
    Ok(DivergenceResult {
        value: kernel(method)(&p, &q),
        method,
    })
}

/// Compare two raw samples with the given method.
///
/// Both samples are histogrammed with `bins` bins over the union of their
/// ranges, so the resulting vectors are aligned bin for bin.
pub fn divergence_from_samples(
    method: DivergenceMethod,
    data_p: &[f64],
    data_q: &[f64],
    bins: usize,
) -> Result<DivergenceResult, DriftError> {
    let (p, q) = histogram_pair(data_p, data_q, bins)?;
    Ok(DivergenceResult {
        value: kernel(method)(&p, &q),
        method,
    })
}

pub fn kl_divergence_from_samples(data_p: &[f64], data_q: &[f64], bins: usize) -> Result<f64, DriftError> {
    divergence_from_samples(DivergenceMethod::Kl, data_p, data_q, bins).map(|r| r.value)
}

pub fn jensen_shannon_from_samples(data_p: &[f64], data_q: &[f64], bins: usize) -> Result<f64, DriftError> {
    divergence_from_samples(DivergenceMethod::Js, data_p, data_q, bins).map(|r| r.value)
}

pub fn hellinger_distance_from_samples(data_p: &[f64], data_q: &[f64], bins: usize) -> Result<f64, DriftError> {
    divergence_from_samples(DivergenceMethod::Hellinger, data_p, data_q, bins).map(|r| r.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_probabilities(rng: &mut StdRng, n: usize) -> Vec<f64> {
        let raw: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
        let total: f64 = raw.iter().sum();
        raw.iter().map(|v| v / total).collect()
    }

    #[test]
    fn test_kl_known_value() {
        let p = vec![0.5, 0.5];
        let q = vec![0.9, 0.1];
        let expected = 0.5 * (0.5f64 / 0.9).ln() + 0.5 * (0.5f64 / 0.1).ln();
        let d = kl_divergence(&p, &q).unwrap();
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn test_kl_is_asymmetric_and_finite_with_zeros() {
        let p = vec![1.0, 0.0, 0.0];
        let q = vec![0.0, 0.5, 0.5];
        let pq = kl_divergence(&p, &q).unwrap();
        let qp = kl_divergence(&q, &p).unwrap();
        assert!(pq.is_finite());
        assert!(qp.is_finite());
        assert!((pq - qp).abs() > 1e-3);
    }

    #[test]
    fn test_kl_unnormalised_input() {
        let d = kl_divergence(&[2.0, 2.0], &[1.0, 1.0]).unwrap();
        assert!(d.abs() < 1e-12);
    }

    #[test]
    fn test_jensen_shannon_symmetry() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1, 2, 10, 50] {
            let p = random_probabilities(&mut rng, n);
            let q = random_probabilities(&mut rng, n);
            let pq = jensen_shannon(&p, &q).unwrap();
            let qp = jensen_shannon(&q, &p).unwrap();
            assert!((pq - qp).abs() < 1e-9);
            assert!((0.0..=LN_2).contains(&pq));
        }
    }

    #[test]
    fn test_jensen_shannon_disjoint_support() {
        let d = jensen_shannon(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!((d - LN_2).abs() < 1e-3);
    }

    #[test]
    fn test_hellinger_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in [1, 3, 25] {
            let p = random_probabilities(&mut rng, n);
            let q = random_probabilities(&mut rng, n);
            let h = hellinger_distance(&p, &q).unwrap();
            assert!((0.0..=1.0).contains(&h));
        }
        let same = hellinger_distance(&[0.2, 0.8], &[0.2, 0.8]).unwrap();
        assert!(same.abs() < 1e-12);
        let disjoint = hellinger_distance(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(disjoint > 0.999 && disjoint <= 1.0);
    }

    #[test]
    fn test_shape_mismatch() {
        assert!(matches!(
            kl_divergence(&[0.5, 0.5], &[1.0]),
            Err(DriftError::ShapeMismatch(2, 1))
        ));
        assert!(matches!(
            jensen_shannon(&[0.5, 0.5], &[0.2, 0.3, 0.5]),
            Err(DriftError::ShapeMismatch(2, 3))
        ));
        assert!(matches!(
            divergence(DivergenceMethod::Hellinger, &[1.0], &[]),
            Err(DriftError::ShapeMismatch(1, 0))
        ));
    }

    #[test]
    fn test_invalid_probabilities() {
        assert!(matches!(kl_divergence(&[], &[]), Err(DriftError::InvalidInput(_))));
        assert!(matches!(
            hellinger_distance(&[-0.5, 1.5], &[0.5, 0.5]),
            Err(DriftError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_self_divergence_from_samples() {
        let mut rng = StdRng::seed_from_u64(1903);
        let x: Vec<f64> = (0..500).map(|_| rng.gen_range(0.0..10.0)).collect();
        assert!(kl_divergence_from_samples(&x, &x, 10).unwrap().abs() < 1e-6);
        assert!(jensen_shannon_from_samples(&x, &x, 10).unwrap().abs() < 1e-6);
        assert!(hellinger_distance_from_samples(&x, &x, 10).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_shifted_samples_diverge() {
        let p: Vec<f64> = (0..200).map(|i| i as f64 / 200.0).collect();
        let q: Vec<f64> = p.iter().map(|v| v + 5.0).collect();
        let js = jensen_shannon_from_samples(&p, &q, 10).unwrap();
        let h = hellinger_distance_from_samples(&p, &q, 10).unwrap();
        assert!(js > 0.6);
        assert!(h > 0.9);
    }

    #[test]
    fn test_divergence_from_samples_tags_method() {
        let p = vec![1.0, 2.0, 3.0];
        let q = vec![1.0, 2.0, 4.0];
        let r = divergence_from_samples(DivergenceMethod::Js, &p, &q, 4).unwrap();
        assert_eq!(r.method, DivergenceMethod::Js);
        assert!(r.value > 0.0);
        assert!(divergence_from_samples(DivergenceMethod::Kl, &p, &[], 4).is_err());
        assert!(divergence_from_samples(DivergenceMethod::Kl, &p, &q, 0).is_err());
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("kl".parse::<DivergenceMethod>().unwrap(), DivergenceMethod::Kl);
        assert_eq!("js".parse::<DivergenceMethod>().unwrap(), DivergenceMethod::Js);
        assert_eq!(
            "hellinger".parse::<DivergenceMethod>().unwrap(),
            DivergenceMethod::Hellinger
        );
        assert!(matches!(
            "bogus".parse::<DivergenceMethod>(),
            Err(DriftError::ParseString(_, _, _))
        ));
        assert_eq!(DivergenceMethod::Hellinger.to_string(), "hellinger");
        assert_eq!(serde_json::to_string(&DivergenceMethod::Js).unwrap(), "\"js\"");
    }
}
