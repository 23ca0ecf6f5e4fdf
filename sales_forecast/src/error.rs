//! Error types for the sales_forecast crate

use crate::models::ModelOrder;
use polars::prelude::PolarsError;
use sales_math::MathError;
use thiserror::Error;

/// Custom error types for the sales_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The raw sales input could not be turned into a series
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// The model could not be fitted to the series
    #[error("Model fit error: {0}")]
    ModelFit(#[from] ModelFitError),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error while writing or reading exported CSV
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error while loading or validating configuration
    #[error("Config error: {0}")]
    ConfigError(String),

    /// A derived quantity overflowed to infinity or NaN
    #[error("Non-finite result: {0}")]
    NonFiniteResult(String),

    /// Error from the numeric kernels outside of model fitting
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

/// Reasons raw sales input is rejected before any forecast is attempted
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("sales series is empty")]
    EmptySeries,

    #[error("column '{column}' not found (available: {})", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("entry {index} ('{raw}') is not a number")]
    InvalidValue { index: usize, raw: String },

    #[error("entry {index} ({value}) is negative; sales cannot be below zero")]
    NegativeValue { index: usize, value: f64 },

    #[error("at most {max} weeks are accepted, got {actual}")]
    TooManyObservations { max: usize, actual: usize },
}

/// Reasons a model of a given order cannot be fitted to a series
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelFitError {
    #[error("{order} needs at least {required} observations, got {actual}")]
    InsufficientData {
        order: ModelOrder,
        required: usize,
        actual: usize,
    },

    #[error("{order} fit is numerically singular: {detail}")]
    Singular { order: ModelOrder, detail: String },

    #[error("{order} fit produced non-finite values")]
    NonFinite { order: ModelOrder },
}

impl ModelFitError {
    /// The order that failed to fit
    pub fn order(&self) -> ModelOrder {
        match self {
            ModelFitError::InsufficientData { order, .. }
            | ModelFitError::Singular { order, .. }
            | ModelFitError::NonFinite { order } => *order,
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}
