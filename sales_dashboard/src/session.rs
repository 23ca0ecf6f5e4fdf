//! Per-session dashboard state
//!
//! A [`SessionContext`] holds the most recent series and the prediction made
//! from it. Each submission replaces both, or neither when it fails.

use crate::chart;
use crate::error::{DashboardError, Result};
use sales_forecast::{
    ForecastConfig, Forecaster, Prediction, SalesKpis, SalesSeries, SalesTable,
};
use std::path::Path;

/// State for one dashboard user
#[derive(Debug, Clone)]
pub struct SessionContext {
    config: ForecastConfig,
    forecaster: Forecaster,
    series: Option<SalesSeries>,
    prediction: Option<Prediction>,
}

impl SessionContext {
    /// Start an empty session; fails when `config` is invalid
    pub fn new(config: ForecastConfig) -> Result<Self> {
        let forecaster = Forecaster::from_config(&config)?;
        Ok(Self {
            config,
            forecaster,
            series: None,
            prediction: None,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// The last accepted series
    pub fn series(&self) -> Option<&SalesSeries> {
        self.series.as_ref()
    }

    /// The prediction made from the last accepted series
    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    /// Validate manually entered weeks and predict from them
    pub fn enter_sales<I, S>(&mut self, entries: I) -> Result<&Prediction>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let series = self.config.manual_validator().validate_entries(entries)?;
        self.submit(series)
    }

    /// Load the sales column of a CSV file and predict from it
    pub fn upload_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<&Prediction> {
        let series = self.config.data_loader().from_csv(path)?;
        self.submit(series)
    }

    /// Load the sales column of CSV bytes and predict from them
    pub fn upload_csv_bytes(&mut self, bytes: &[u8]) -> Result<&Prediction> {
        let series = self.config.data_loader().from_csv_bytes(bytes)?;
        self.submit(series)
    }

    /// Predict from an already validated series and keep both
    pub fn submit(&mut self, series: SalesSeries) -> Result<&Prediction> {
        let prediction = self.forecaster.predict(&series)?;
        tracing::info!(
            weeks = series.len(),
            method = %prediction.result().method(),
            fallback = prediction.is_fallback(),
            "prediction updated"
        );

        self.series = Some(series);
        Ok(&*self.prediction.insert(prediction))
    }

    /// KPIs for the current prediction
    pub fn kpis(&self) -> Result<SalesKpis> {
        let (series, prediction) = self.current()?;
        Ok(SalesKpis::compute(series, prediction.result())?)
    }

    /// Week/Sales table for the current prediction
    pub fn table(&self) -> Result<SalesTable> {
        let (series, prediction) = self.current()?;
        Ok(SalesTable::from_forecast(series, prediction.result()))
    }

    /// Write the Week/Sales table to `path`
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.table()?.save_csv(path)?;
        Ok(())
    }

    /// Draw the actual and predicted weeks as an SVG file at `path`
    pub fn save_chart<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        chart::save_chart(&self.table()?, path)
    }

    /// Forget the series and prediction
    pub fn clear(&mut self) {
        self.series = None;
        self.prediction = None;
    }

    fn current(&self) -> Result<(&SalesSeries, &Prediction)> {
        match (&self.series, &self.prediction) {
            (Some(series), Some(prediction)) => Ok((series, prediction)),
            _ => Err(DashboardError::NoPrediction),
        }
    }
}
