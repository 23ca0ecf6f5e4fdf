//! Forecasting models for weekly sales series

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::str::FromStr;

/// Largest autoregressive order accepted
pub const MAX_AR_ORDER: usize = 10;
/// Largest differencing degree accepted
pub const MAX_DIFFERENCING: usize = 2;
/// Largest moving-average order accepted
pub const MAX_MA_ORDER: usize = 10;

/// ARIMA order: autoregressive lags, differencing degree, moving-average lags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelOrder {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ModelOrder {
    /// Create an order without range checks; see [`ModelOrder::validate`]
    pub const fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Fewest observations a fit of this order is attempted on
    pub fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 1
    }

    /// Check the order against the accepted bounds
    pub fn validate(&self) -> Result<()> {
        if self.p > MAX_AR_ORDER {
            return Err(ForecastError::InvalidParameter(format!(
                "AR order must be <= {}, got {}",
                MAX_AR_ORDER, self.p
            )));
        }
        if self.d > MAX_DIFFERENCING {
            return Err(ForecastError::InvalidParameter(format!(
                "Differencing order must be <= {}, got {}",
                MAX_DIFFERENCING, self.d
            )));
        }
        if self.q > MAX_MA_ORDER {
            return Err(ForecastError::InvalidParameter(format!(
                "MA order must be <= {}, got {}",
                MAX_MA_ORDER, self.q
            )));
        }
        Ok(())
    }
}

impl Default for ModelOrder {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

impl fmt::Display for ModelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

impl FromStr for ModelOrder {
    type Err = ForecastError;

    /// Parse `"p,d,q"`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ForecastError::InvalidParameter(format!(
                "Model order must look like 'p,d,q', got '{}'",
                s
            )));
        }

        let mut numbers = [0usize; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                ForecastError::InvalidParameter(format!(
                    "Model order component '{}' is not a non-negative integer",
                    part
                ))
            })?;
        }

        let order = Self::new(numbers[0], numbers[1], numbers[2]);
        order.validate()?;
        Ok(order)
    }
}

/// How a forecast was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForecastMethod {
    /// Fitted ARIMA model of the given order
    Arima(ModelOrder),
    /// Historical mean repeated over the horizon
    Mean,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastMethod::Arima(order) => write!(f, "{}", order),
            ForecastMethod::Mean => write!(f, "Mean"),
        }
    }
}

/// Point forecasts for the weeks right after the last observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Forecasted values
    values: Vec<f64>,
    /// Number of weeks forecasted
    horizon: usize,
    /// 1-based week number of the first forecast
    first_week: usize,
    /// Model that produced the values
    method: ForecastMethod,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(
        values: Vec<f64>,
        horizon: usize,
        first_week: usize,
        method: ForecastMethod,
    ) -> Result<Self> {
        if values.len() != horizon {
            return Err(ForecastError::InvalidParameter(format!(
                "Values length ({}) doesn't match horizon ({})",
                values.len(),
                horizon
            )));
        }

        Ok(Self {
            values,
            horizon,
            first_week,
            method,
        })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of weeks forecasted
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Get the week number of the first forecast
    pub fn first_week(&self) -> usize {
        self.first_week
    }

    /// Week numbers paired with their forecasts
    pub fn weeks(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (self.first_week + i, *v))
    }

    /// Get the model that produced the forecast
    pub fn method(&self) -> ForecastMethod {
        self.method
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecasts for the next `horizon` weeks
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a sales series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a sales series
    fn train(&self, series: &SalesSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub(crate) fn check_horizon(horizon: usize) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::InvalidParameter(
            "Horizon must be at least one week".to_string(),
        ));
    }
    Ok(())
}

pub mod arima;
pub mod mean;
