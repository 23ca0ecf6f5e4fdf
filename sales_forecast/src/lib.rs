//! # Sales Forecast
//!
//! Forecasting core for a weekly sales dashboard.
//!
//! ## Features
//!
//! - Validation of raw sales input (manual entries or a CSV `Sales` column)
//! - ARIMA(p, d, q) forecasting with an explicit mean fallback
//! - Dashboard KPIs: average sales, growth rate, next predicted week
//! - Week/Sales table export as CSV
//!
//! ## Quick Start
//!
//! ```rust
//! use sales_forecast::{Forecaster, SalesKpis, SalesTable, SeriesValidator};
//!
//! let series = SeriesValidator::default()
//!     .validate_entries(["120", "135", "128", "150", "161"])?;
//!
//! let prediction = Forecaster::default().predict(&series)?;
//! let forecast = prediction.result();
//! assert_eq!(forecast.horizon(), 3);
//!
//! let kpis = SalesKpis::compute(&series, forecast)?;
//! assert!(kpis.next_predicted.is_some());
//!
//! let csv = SalesTable::from_forecast(&series, forecast).to_csv_bytes()?;
//! assert!(csv.starts_with(b"Week,Sales\n"));
//! # Ok::<(), sales_forecast::ForecastError>(())
//! ```
//!
//! The core holds no state: every call takes the series and parameters it
//! needs and returns a fresh result.

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod forecaster;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, MissingValuePolicy, SalesSeries, SeriesValidator};
pub use crate::error::{ForecastError, InputError, ModelFitError, Result};
pub use crate::export::{SalesRow, SalesTable};
pub use crate::forecaster::{forecast, mean_forecast, FallbackPolicy, Forecaster, Prediction};
pub use crate::metrics::SalesKpis;
pub use crate::models::{ForecastMethod, ForecastResult, ModelOrder};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
