//! Errors
//!
//! Custom error types used throughout the `driftwatch` crate.
use thiserror::Error;

/// Errors that can occur while estimating, comparing or streaming samples.
#[derive(Debug, Error)]
pub enum DriftError {
    /// Empty sample window, non-finite value, or a non-positive bin count.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Two probability vectors of different lengths were compared.
    #[error("Shape mismatch: first vector has length {0}, second has length {1}.")]
    ShapeMismatch(usize, usize),
    /// Unknown stream type, or a required construction parameter is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The fetch operation of a polling source failed.
    #[error("Fetch failed: {0}")]
    Fetch(String),
    /// Unable to read a configuration or dataset.
    #[error("Unable to read {0}")]
    UnableToRead(String),
    /// Unable to write a configuration.
    #[error("Unable to write: {0}")]
    UnableToWrite(String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
}
