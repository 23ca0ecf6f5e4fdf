//! ARIMA models for weekly sales forecasting
//!
//! The series is differenced `d` times and demeaned; the mean of the
//! differenced series is kept as the intercept (a drift when `d > 0`).
//! ARMA(p, q) coefficients are then estimated in two least-squares stages:
//!
//! 1. A long AR(p + q) regression supplies innovation estimates. It needs at
//!    least `2(p + q) + 1` differenced observations; shorter series fit the MA
//!    coefficients to zero.
//! 2. Each value is regressed on its `p` lags and `q` lagged innovations.
//!
//! Both regressions use a small relative ridge penalty so short or flat series
//! still give a unique solution. With the penalty set to zero, rank deficiency
//! is reported as [`ModelFitError::Singular`].

use crate::data::SalesSeries;
use crate::error::{ForecastError, ModelFitError, Result};
use crate::models::{
    check_horizon, ForecastMethod, ForecastModel, ForecastResult, ModelOrder, TrainedForecastModel,
};
use sales_math::differencing::{difference, integrate};
use sales_math::regression::ridge_least_squares;
use sales_math::statistics::demean;
use sales_math::MathError;

/// Relative ridge penalty used unless configured otherwise
pub const DEFAULT_RIDGE: f64 = 1e-8;

/// Sum of absolute AR coefficients is kept below one
const AR_BOUND: f64 = 0.99;

/// MA coefficients are clamped to this magnitude
const MA_BOUND: f64 = 0.99;

/// ARIMA model (AutoRegressive Integrated Moving Average)
#[derive(Debug, Clone)]
pub struct ArimaModel {
    /// Name of the model
    name: String,
    /// Model order
    order: ModelOrder,
    /// Relative ridge penalty
    ridge: f64,
}

/// Trained ARIMA model
#[derive(Debug, Clone)]
pub struct TrainedArimaModel {
    /// Name of the model
    name: String,
    /// Model order
    order: ModelOrder,
    /// Mean of the differenced series
    intercept: f64,
    /// Fitted AR coefficients
    ar_coefficients: Vec<f64>,
    /// Fitted MA coefficients
    ma_coefficients: Vec<f64>,
    /// Observed series, needed to undo differencing
    history: Vec<f64>,
    /// Differenced and demeaned series
    centered: Vec<f64>,
    /// Conditional residuals on the differenced scale
    residuals: Vec<f64>,
    /// Mean squared residual
    residual_variance: f64,
}

impl ArimaModel {
    /// Create a new ARIMA model
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        Self::from_order(ModelOrder::new(p, d, q))
    }

    /// Create a new ARIMA model from an order
    pub fn from_order(order: ModelOrder) -> Result<Self> {
        order.validate()?;
        Ok(Self {
            name: order.to_string(),
            order,
            ridge: DEFAULT_RIDGE,
        })
    }

    /// Set the relative ridge penalty; zero disables regularisation
    pub fn with_ridge(mut self, ridge: f64) -> Result<Self> {
        if !(ridge >= 0.0 && ridge.is_finite()) {
            return Err(ForecastError::InvalidParameter(format!(
                "Ridge penalty must be a finite non-negative number, got {}",
                ridge
            )));
        }
        self.ridge = ridge;
        Ok(self)
    }

    /// Get the model order
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// Get the ridge penalty
    pub fn ridge(&self) -> f64 {
        self.ridge
    }

    /// Residuals of a long autoregression, or `None` when the series is too short
    fn estimate_innovations(&self, centered: &[f64]) -> Result<Option<Vec<f64>>> {
        let lags = self.order.p + self.order.q;
        if centered.len() < 2 * lags + 1 {
            tracing::debug!(
                order = %self.order,
                observations = centered.len(),
                "series too short for innovation estimates; MA terms fit to zero"
            );
            return Ok(None);
        }

        let (design, targets) = lagged_rows(centered, &[], lags, 0, lags);
        let coefficients =
            ridge_least_squares(&design, &targets, self.ridge).map_err(|e| self.fit_error(e))?;

        let mut innovations = vec![0.0; centered.len()];
        for t in lags..centered.len() {
            innovations[t] = centered[t] - one_step(centered, &[], &coefficients, &[], t);
        }
        Ok(Some(innovations))
    }

    fn fit_error(&self, err: MathError) -> ForecastError {
        match err {
            MathError::SingularMatrix { .. } => ModelFitError::Singular {
                order: self.order,
                detail: err.to_string(),
            }
            .into(),
            other => ForecastError::Math(other),
        }
    }
}

impl ForecastModel for ArimaModel {
    type Trained = TrainedArimaModel;

    fn train(&self, series: &SalesSeries) -> Result<TrainedArimaModel> {
        let values = series.values();
        let ModelOrder { p, d, q } = self.order;

        // Also covers d >= n, since the minimum exceeds d
        let required = self.order.min_observations();
        if values.len() < required {
            return Err(ModelFitError::InsufficientData {
                order: self.order,
                required,
                actual: values.len(),
            }
            .into());
        }

        let differenced = difference(values, d);
        let (centered, intercept) = demean(&differenced)?;
        let start = p.max(q);

        let mut ar_coefficients = Vec::new();
        let mut ma_coefficients = vec![0.0; q];
        if p + q > 0 {
            let innovations = if q > 0 {
                self.estimate_innovations(&centered)?
            } else {
                None
            };
            let fitted_q = if innovations.is_some() { q } else { 0 };
            let innovations = innovations.unwrap_or_default();

            let (design, targets) = lagged_rows(&centered, &innovations, p, fitted_q, start);
            let beta =
                ridge_least_squares(&design, &targets, self.ridge).map_err(|e| self.fit_error(e))?;

            ar_coefficients = beta[..p].to_vec();
            if fitted_q > 0 {
                ma_coefficients = beta[p..].to_vec();
            }
            stabilise(&mut ar_coefficients, &mut ma_coefficients);
        }

        let residuals = conditional_residuals(&centered, &ar_coefficients, &ma_coefficients);
        let tail = &residuals[start..];
        let residual_variance = tail.iter().map(|e| e * e).sum::<f64>() / tail.len() as f64;

        let finite = intercept.is_finite()
            && residual_variance.is_finite()
            && ar_coefficients.iter().chain(&ma_coefficients).all(|c| c.is_finite());
        if !finite {
            return Err(ModelFitError::NonFinite { order: self.order }.into());
        }

        tracing::debug!(
            order = %self.order,
            intercept,
            ar = ?ar_coefficients,
            ma = ?ma_coefficients,
            residual_variance,
            "fitted ARIMA model"
        );

        Ok(TrainedArimaModel {
            name: self.name.clone(),
            order: self.order,
            intercept,
            ar_coefficients,
            ma_coefficients,
            history: values.to_vec(),
            centered,
            residuals,
            residual_variance,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedArimaModel {
    /// Get the model order
    pub fn order(&self) -> ModelOrder {
        self.order
    }

    /// Get the fitted AR coefficients
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coefficients
    }

    /// Get the fitted MA coefficients
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coefficients
    }

    /// Get the intercept (mean of the differenced series)
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Get the conditional residuals on the differenced scale
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Get the mean squared residual
    pub fn residual_variance(&self) -> f64 {
        self.residual_variance
    }
}

impl TrainedForecastModel for TrainedArimaModel {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        check_horizon(horizon)?;

        let mut values = self.centered.clone();
        let mut residuals = self.residuals.clone();
        let mut differenced = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let t = values.len();
            let next = one_step(
                &values,
                &residuals,
                &self.ar_coefficients,
                &self.ma_coefficients,
                t,
            );
            values.push(next);
            // Future shocks have zero expectation
            residuals.push(0.0);
            differenced.push(next + self.intercept);
        }

        let forecasts = integrate(&differenced, &self.history, self.order.d);
        if forecasts.iter().any(|v| !v.is_finite()) {
            return Err(ModelFitError::NonFinite { order: self.order }.into());
        }

        ForecastResult::new(
            forecasts,
            horizon,
            self.history.len() + 1,
            ForecastMethod::Arima(self.order),
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Regression rows `[x[t-1..=t-p], e[t-1..=t-q]] -> x[t]` for `t` in `start..len`
fn lagged_rows(
    values: &[f64],
    innovations: &[f64],
    p: usize,
    q: usize,
    start: usize,
) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut design = Vec::with_capacity(values.len().saturating_sub(start));
    let mut targets = Vec::with_capacity(values.len().saturating_sub(start));
    for t in start..values.len() {
        let row = (1..=p)
            .map(|i| values[t - i])
            .chain((1..=q).map(|j| innovations[t - j]))
            .collect();
        design.push(row);
        targets.push(values[t]);
    }
    (design, targets)
}

/// One-step prediction of `values[t]` from the values and residuals before it
fn one_step(values: &[f64], residuals: &[f64], ar: &[f64], ma: &[f64], t: usize) -> f64 {
    let ar_part: f64 = ar
        .iter()
        .enumerate()
        .map(|(i, c)| c * values[t - 1 - i])
        .sum();
    let ma_part: f64 = ma
        .iter()
        .enumerate()
        .map(|(j, c)| c * residuals[t - 1 - j])
        .sum();
    ar_part + ma_part
}

/// Residuals computed recursively, zero before the first full set of lags
fn conditional_residuals(values: &[f64], ar: &[f64], ma: &[f64]) -> Vec<f64> {
    let start = ar.len().max(ma.len());
    let mut residuals = vec![0.0; values.len()];
    for t in start..values.len() {
        residuals[t] = values[t] - one_step(values, &residuals, ar, ma, t);
    }
    residuals
}

/// Keep the AR part stationary and the MA part invertible
fn stabilise(ar: &mut [f64], ma: &mut [f64]) {
    let total: f64 = ar.iter().map(|c| c.abs()).sum();
    if total >= 1.0 {
        let scale = AR_BOUND / total;
        ar.iter_mut().for_each(|c| *c *= scale);
    }
    ma.iter_mut().for_each(|c| *c = c.clamp(-MA_BOUND, MA_BOUND));
}
