//! # Sales Math
//!
//! Numeric kernels behind the sales forecaster.
//! This crate provides the descriptive statistics, differencing helpers and
//! regularised least-squares solver that the ARIMA fit is built from.

use thiserror::Error;

pub mod differencing;
pub mod regression;
pub mod statistics;

/// Errors that can occur in numeric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Singular matrix: pivot {pivot:e} at column {column}")]
    SingularMatrix { column: usize, pivot: f64 },
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
