//! Error types for the dashboard layer

use sales_forecast::ForecastError;
use thiserror::Error;

/// Dashboard errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Error raised by the forecasting core
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Results were requested before any sales were submitted
    #[error("No sales data yet: enter or upload sales first")]
    NoPrediction,

    /// Drawing the sales chart failed
    #[error("Chart error: {0}")]
    Chart(String),

    /// Writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for DashboardError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        DashboardError::Chart(err.to_string())
    }
}
