//! Dashboard KPIs derived from a sales series and its forecast

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::models::ForecastResult;
use serde::Serialize;

/// Added to the first week's sales so a zero start does not divide by zero
pub const GROWTH_EPSILON: f64 = 1e-5;

/// Arithmetic mean of the observed weeks
pub fn average_sales(series: &SalesSeries) -> f64 {
    series.mean()
}

/// Percentage change from the first to the last observed week.
///
/// `(last - first) / (first + 1e-5) * 100`. This compares two points only, not
/// a fitted slope, so noise in either boundary week moves it directly.
///
/// A near-zero first week with very large later sales overflows; that is
/// reported as [`ForecastError::NonFiniteResult`] rather than returned.
pub fn growth_rate(series: &SalesSeries) -> Result<f64> {
    let growth = (series.last() - series.first()) / (series.first() + GROWTH_EPSILON) * 100.0;
    if !growth.is_finite() {
        return Err(ForecastError::NonFiniteResult(format!(
            "growth from {} to {} overflows",
            series.first(),
            series.last()
        )));
    }
    Ok(growth)
}

/// Forecast for the week right after the last observation
pub fn next_predicted(forecast: &ForecastResult) -> Option<f64> {
    forecast.values().first().copied()
}

/// The three headline numbers shown above the chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalesKpis {
    /// Mean weekly sales
    pub average_sales: f64,
    /// First-to-last growth in percent
    pub growth_rate: f64,
    /// First forecast value
    pub next_predicted: Option<f64>,
}

impl SalesKpis {
    /// Compute all KPIs for a series and its forecast
    pub fn compute(series: &SalesSeries, forecast: &ForecastResult) -> Result<Self> {
        Ok(Self {
            average_sales: average_sales(series),
            growth_rate: growth_rate(series)?,
            next_predicted: next_predicted(forecast),
        })
    }
}
