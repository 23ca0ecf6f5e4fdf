//! Historical mean model, the fallback estimate for every forecast

use crate::data::SalesSeries;
use crate::error::{ForecastError, Result};
use crate::models::{check_horizon, ForecastMethod, ForecastModel, ForecastResult, TrainedForecastModel};

/// Forecasts every future week as the mean of the observed weeks
#[derive(Debug, Clone, Default)]
pub struct MeanModel;

/// Trained mean model
#[derive(Debug, Clone)]
pub struct TrainedMeanModel {
    /// Mean of the observations
    mean: f64,
    /// Number of observed weeks
    observations: usize,
}

impl MeanModel {
    /// Create a new mean model
    pub fn new() -> Self {
        Self
    }
}

impl ForecastModel for MeanModel {
    type Trained = TrainedMeanModel;

    fn train(&self, series: &SalesSeries) -> Result<Self::Trained> {
        let mean = series.mean();
        if !mean.is_finite() {
            return Err(ForecastError::NonFiniteResult(format!(
                "mean of {} weeks is {}",
                series.len(),
                mean
            )));
        }

        Ok(TrainedMeanModel {
            mean,
            observations: series.len(),
        })
    }

    fn name(&self) -> &str {
        "Mean"
    }
}

impl TrainedMeanModel {
    /// Get the fitted mean
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

impl TrainedForecastModel for TrainedMeanModel {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        check_horizon(horizon)?;
        ForecastResult::new(
            vec![self.mean; horizon],
            horizon,
            self.observations + 1,
            ForecastMethod::Mean,
        )
    }

    fn name(&self) -> &str {
        "Mean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_forecast() {
        let series = SalesSeries::new(vec![1.0, 2.0, 6.0]).unwrap();
        let trained = MeanModel::new().train(&series).unwrap();
        let forecast = trained.forecast(2).unwrap();

        assert_eq!(forecast.values(), &[3.0, 3.0]);
        assert_eq!(forecast.first_week(), 4);
        assert_eq!(forecast.method(), ForecastMethod::Mean);
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let series = SalesSeries::new(vec![1e308, 1e308, 1e308]).unwrap();
        let forecast = MeanModel::new().train(&series).unwrap().forecast(2).unwrap();

        for value in forecast.values() {
            assert!(value.is_finite());
            assert!((value - 1e308).abs() < 1e294);
        }
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let series = SalesSeries::new(vec![1.0]).unwrap();
        let trained = MeanModel::new().train(&series).unwrap();
        assert!(trained.forecast(0).is_err());
    }
}
