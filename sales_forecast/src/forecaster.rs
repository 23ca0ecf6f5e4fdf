//! Forecast entry points
//!
//! [`forecast`] is the strict operation: it fits the requested order or
//! reports why it could not. [`Forecaster::predict`] wraps it with an explicit
//! [`FallbackPolicy`] and tells the caller which path produced the numbers.

use crate::config::ForecastConfig;
use crate::data::SalesSeries;
use crate::error::{ForecastError, ModelFitError, Result};
use crate::models::arima::{ArimaModel, DEFAULT_RIDGE};
use crate::models::mean::MeanModel;
use crate::models::{ForecastModel, ForecastResult, ModelOrder, TrainedForecastModel};
use serde::{Deserialize, Serialize};

/// Weeks forecast when the caller does not say otherwise
pub const DEFAULT_HORIZON: usize = 3;

/// Fit an ARIMA model of `order` to `series` and forecast `horizon` weeks.
///
/// Stateless: nothing is kept between calls. Fails with
/// [`ForecastError::ModelFit`] when the order cannot be fitted and with
/// [`ForecastError::InvalidParameter`] when `horizon` is zero or the order is
/// out of range.
pub fn forecast(series: &SalesSeries, horizon: usize, order: ModelOrder) -> Result<ForecastResult> {
    forecast_with_ridge(series, horizon, order, DEFAULT_RIDGE)
}

fn forecast_with_ridge(
    series: &SalesSeries,
    horizon: usize,
    order: ModelOrder,
    ridge: f64,
) -> Result<ForecastResult> {
    let model = ArimaModel::from_order(order)?.with_ridge(ridge)?;
    model.train(series)?.forecast(horizon)
}

/// `horizon` copies of the series mean
pub fn mean_forecast(series: &SalesSeries, horizon: usize) -> Result<ForecastResult> {
    MeanModel::new().train(series)?.forecast(horizon)
}

/// What to do when the requested order cannot be fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Surface the fit error
    Fail,
    /// Forecast the series mean
    #[default]
    Mean,
    /// Try another order once, then forecast the series mean
    Retry(ModelOrder),
}

/// Outcome of a policy-driven forecast
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// The requested order was fitted
    Fitted(ForecastResult),
    /// The requested order failed; `result` came from the fallback path
    Fallback {
        result: ForecastResult,
        reason: ModelFitError,
    },
}

impl Prediction {
    /// The forecast, whichever path produced it
    pub fn result(&self) -> &ForecastResult {
        match self {
            Prediction::Fitted(result) | Prediction::Fallback { result, .. } => result,
        }
    }

    /// Why the requested order was not used, if it was not
    pub fn fallback_reason(&self) -> Option<&ModelFitError> {
        match self {
            Prediction::Fitted(_) => None,
            Prediction::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Whether the fallback path was taken
    pub fn is_fallback(&self) -> bool {
        matches!(self, Prediction::Fallback { .. })
    }
}

/// Forecaster configured with horizon, order, ridge and fallback policy
#[derive(Debug, Clone)]
pub struct Forecaster {
    horizon: usize,
    order: ModelOrder,
    ridge: f64,
    fallback: FallbackPolicy,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            order: ModelOrder::default(),
            ridge: DEFAULT_RIDGE,
            fallback: FallbackPolicy::default(),
        }
    }
}

impl Forecaster {
    /// Create a forecaster from validated configuration
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            horizon: config.horizon,
            order: config.order,
            ridge: config.ridge,
            fallback: config.fallback,
        })
    }

    /// Forecast a different number of weeks
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Fit a different order
    pub fn with_order(mut self, order: ModelOrder) -> Self {
        self.order = order;
        self
    }

    /// Use a different fallback policy
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Get the horizon
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Get the order
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// Get the fallback policy
    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Forecast with the configured order only
    pub fn forecast(&self, series: &SalesSeries) -> Result<ForecastResult> {
        forecast_with_ridge(series, self.horizon, self.order, self.ridge)
    }

    /// Forecast with the configured order, applying the fallback policy on fit errors.
    ///
    /// Errors other than [`ForecastError::ModelFit`] are never absorbed.
    pub fn predict(&self, series: &SalesSeries) -> Result<Prediction> {
        let reason = match self.forecast(series) {
            Ok(result) => return Ok(Prediction::Fitted(result)),
            Err(ForecastError::ModelFit(reason)) => reason,
            Err(other) => return Err(other),
        };

        match self.fallback {
            FallbackPolicy::Fail => Err(reason.into()),
            FallbackPolicy::Mean => self.fall_back_to_mean(series, reason),
            FallbackPolicy::Retry(order) => {
                match forecast_with_ridge(series, self.horizon, order, self.ridge) {
                    Ok(result) => {
                        tracing::warn!(%reason, retry = %order, "requested order failed; used retry order");
                        Ok(Prediction::Fallback { result, reason })
                    }
                    Err(ForecastError::ModelFit(retry_reason)) => {
                        tracing::debug!(%retry_reason, "retry order failed too");
                        self.fall_back_to_mean(series, reason)
                    }
                    Err(other) => Err(other),
                }
            }
        }
    }

    fn fall_back_to_mean(&self, series: &SalesSeries, reason: ModelFitError) -> Result<Prediction> {
        tracing::warn!(%reason, "falling back to mean forecast");
        let result = mean_forecast(series, self.horizon)?;
        Ok(Prediction::Fallback { result, reason })
    }
}
