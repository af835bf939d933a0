use crate::errors::DriftError;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    let mut s = String::new();
    for i in items {
        s.push_str(i);
        s.push_str(&String::from(", "));
    }
    s
}

// Validation
pub fn validate_sample(data: &[f64], parameter: &str) -> Result<(), DriftError> {
    if data.is_empty() {
        return Err(DriftError::InvalidInput(format!("{} must not be empty", parameter)));
    }
    if let Some(v) = data.iter().find(|v| !v.is_finite()) {
        return Err(DriftError::InvalidInput(format!(
            "{} contains the non-finite value {}",
            parameter, v
        )));
    }
    Ok(())
}

pub fn validate_bins(bins: usize) -> Result<(), DriftError> {
    if bins < 1 {
        Err(DriftError::InvalidInput(format!(
            "bin count must be at least 1, {} provided",
            bins
        )))
    } else {
        Ok(())
    }
}

/// A probability vector must be non-empty, finite and non-negative.
pub fn validate_probabilities(p: &[f64], parameter: &str) -> Result<(), DriftError> {
    validate_sample(p, parameter)?;
    if let Some(v) = p.iter().find(|v| **v < 0.0) {
        return Err(DriftError::InvalidInput(format!(
            "{} contains the negative probability {}",
            parameter, v
        )));
    }
    Ok(())
}

pub fn validate_float_parameter(value: f64, min: f64, max: f64, parameter: &str) -> Result<(), DriftError> {
    if value.is_nan() || value < min || max < value {
        Err(DriftError::Configuration(format!(
            "invalid value {} passed for {}, expected real value within range {} and {}",
            value, parameter, min, max
        )))
    } else {
        Ok(())
    }
}
