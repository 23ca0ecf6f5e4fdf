//! Forecast configuration loaded from JSON

use crate::data::{DataLoader, MissingValuePolicy, SeriesValidator, MAX_MANUAL_WEEKS, SALES_COLUMN};
use crate::error::{ForecastError, Result};
use crate::forecaster::{FallbackPolicy, DEFAULT_HORIZON};
use crate::models::arima::DEFAULT_RIDGE;
use crate::models::ModelOrder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable parameters for validation and forecasting.
///
/// Every field has a default, so a config file only lists what it changes:
///
/// ```json
/// { "horizon": 6, "order": { "p": 2, "d": 1, "q": 0 }, "fallback": "fail" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Weeks to forecast
    pub horizon: usize,
    /// ARIMA order to fit
    pub order: ModelOrder,
    /// What to do when the order cannot be fitted
    pub fallback: FallbackPolicy,
    /// What to do with non-numeric entries
    pub missing_values: MissingValuePolicy,
    /// Relative ridge penalty for the least-squares fits
    pub ridge: f64,
    /// Column read from uploaded files
    pub sales_column: String,
    /// Most weeks accepted through manual entry
    pub max_manual_weeks: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            order: ModelOrder::default(),
            fallback: FallbackPolicy::default(),
            missing_values: MissingValuePolicy::default(),
            ridge: DEFAULT_RIDGE,
            sales_column: SALES_COLUMN.to_string(),
            max_manual_weeks: MAX_MANUAL_WEEKS,
        }
    }
}

impl ForecastConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loaded forecast config");
        Self::from_json_str(&text)
    }

    /// Check every field for a usable value
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ForecastError::ConfigError(
                "horizon must be at least one week".to_string(),
            ));
        }
        if !(self.ridge >= 0.0 && self.ridge.is_finite()) {
            return Err(ForecastError::ConfigError(format!(
                "ridge must be a finite non-negative number, got {}",
                self.ridge
            )));
        }
        if self.sales_column.trim().is_empty() {
            return Err(ForecastError::ConfigError(
                "sales_column must not be empty".to_string(),
            ));
        }
        if self.max_manual_weeks == 0 {
            return Err(ForecastError::ConfigError(
                "max_manual_weeks must be at least one".to_string(),
            ));
        }

        self.order
            .validate()
            .map_err(|e| ForecastError::ConfigError(format!("order: {}", e)))?;
        if let FallbackPolicy::Retry(order) = self.fallback {
            order
                .validate()
                .map_err(|e| ForecastError::ConfigError(format!("fallback order: {}", e)))?;
        }
        Ok(())
    }

    /// Validator for manually entered weeks
    pub fn manual_validator(&self) -> SeriesValidator {
        SeriesValidator::new(self.missing_values).with_max_observations(self.max_manual_weeks)
    }

    /// Loader for uploaded files
    pub fn data_loader(&self) -> DataLoader {
        DataLoader::new(SeriesValidator::new(self.missing_values)).with_column(self.sales_column.clone())
    }
}
