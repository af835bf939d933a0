//! Severity labels for divergence values.
use crate::divergence::DivergenceMethod;
use crate::errors::DriftError;
use crate::utils::validate_float_parameter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Drift severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftLabel {
    Stable,
    Gradual,
    Abrupt,
    /// The method tag was not recognised.
    Unknown,
}

impl DriftLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftLabel::Stable => "stable",
            DriftLabel::Gradual => "gradual",
            DriftLabel::Abrupt => "abrupt",
            DriftLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DriftLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values strictly above `abrupt` are abrupt, strictly above `gradual` are gradual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityCutoffs {
    pub abrupt: f64,
    pub gradual: f64,
}

impl SeverityCutoffs {
    pub fn label(&self, value: f64) -> DriftLabel {
        if value > self.abrupt {
            DriftLabel::Abrupt
        } else if value > self.gradual {
            DriftLabel::Gradual
        } else {
            DriftLabel::Stable
        }
    }

    fn validate(&self, parameter: &str) -> Result<(), DriftError> {
        validate_float_parameter(self.gradual, 0.0, f64::MAX, &format!("{}.gradual", parameter))?;
        validate_float_parameter(self.abrupt, self.gradual, f64::MAX, &format!("{}.abrupt", parameter))
    }
}

fn default_kl_js() -> SeverityCutoffs {
    SeverityCutoffs {
        abrupt: 1.0,
        gradual: 0.5,
    }
}
fn default_hellinger() -> SeverityCutoffs {
    SeverityCutoffs {
        abrupt: 0.7,
        gradual: 0.4,
    }
}

/// Per method family cutoffs. KL and JS share one table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftThresholds {
    #[serde(default = "default_kl_js")]
    pub kl_js: SeverityCutoffs,
    #[serde(default = "default_hellinger")]
    pub hellinger: SeverityCutoffs,
}

impl Default for DriftThresholds {
    fn default() -> Self {
        DriftThresholds {
            kl_js: default_kl_js(),
            hellinger: default_hellinger(),
        }
    }
}

impl DriftThresholds {
    pub fn cutoffs(&self, method: DivergenceMethod) -> &SeverityCutoffs {
        match method {
            DivergenceMethod::Kl | DivergenceMethod::Js => &self.kl_js,
            DivergenceMethod::Hellinger => &self.hellinger,
        }
    }

    pub fn categorize_method(&self, value: f64, method: DivergenceMethod) -> DriftLabel {
        self.cutoffs(method).label(value)
    }

    /// Label a value produced by the method named `method`.
    /// Unrecognised names give [`DriftLabel::Unknown`].
    pub fn categorize(&self, value: f64, method: &str) -> DriftLabel {
        match method.parse::<DivergenceMethod>() {
            Ok(m) => self.categorize_method(value, m),
            Err(_) => DriftLabel::Unknown,
        }
    }

    pub fn validate(&self) -> Result<(), DriftError> {
        self.kl_js.validate("thresholds.kl_js")?;
        self.hellinger.validate("thresholds.hellinger")
    }
}

/// Label a divergence value with the default cutoffs.
pub fn categorize_drift(value: f64, method: &str) -> DriftLabel {
    DriftThresholds::default().categorize(value, method)
}
