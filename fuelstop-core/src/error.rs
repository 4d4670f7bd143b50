//! Errors raised for structurally invalid call arguments.
//!
//! Bad *data* never produces an error in the core; it is skipped and reported
//! through [`crate::Warning`]. Only caller-supplied parameters such as the
//! deviation radius or the vehicle range are rejected here.

use thiserror::Error;

/// Errors returned by the proximity index, optimizer and cost aggregator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// A numeric parameter was non-finite, negative or zero where a
    /// positive value is required.
    #[error("{name} must be a finite {requirement} number, got {value}")]
    InvalidArgument {
        /// Parameter name as the caller knows it.
        name: &'static str,
        /// Human readable constraint, e.g. "positive".
        requirement: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A route batch size of zero was supplied.
    #[error("batch size must be at least one")]
    ZeroBatchSize,
}

/// Require `value` to be finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, PlanError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PlanError::InvalidArgument {
            name,
            requirement: "positive",
            value,
        })
    }
}

/// Require `value` to be finite and not negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64, PlanError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PlanError::InvalidArgument {
            name,
            requirement: "non-negative",
            value,
        })
    }
}
