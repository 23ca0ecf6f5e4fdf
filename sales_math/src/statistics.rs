//! Descriptive statistics over plain slices

use crate::{MathError, Result};

/// Arithmetic mean of the values
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot take the mean of an empty slice".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance of the values
pub fn variance(values: &[f64]) -> Result<f64> {
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Ok(sum_sq / values.len() as f64)
}

/// Subtract the mean from every value, returning the centered values and the mean
pub fn demean(values: &[f64]) -> Result<(Vec<f64>, f64)> {
    let mean = mean(values)?;
    Ok((values.iter().map(|v| v - mean).collect(), mean))
}
