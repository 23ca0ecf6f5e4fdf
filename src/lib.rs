//! # Sales Dashboard Workspace
//!
//! One import for the whole stack:
//!
//! - [`math`]: differencing, statistics and ridge least squares
//! - [`forecast`]: series validation, ARIMA forecasting, KPIs and CSV export
//! - [`dashboard`]: session state, text rendering and the command line
//!
//! ## Example
//!
//! ```
//! use sales_dashboard_workspace::forecast::{Forecaster, SeriesValidator};
//!
//! let series = SeriesValidator::default().validate_entries(["3", "6", "9", "12"])?;
//! let prediction = Forecaster::default().predict(&series)?;
//! assert_eq!(prediction.result().first_week(), 5);
//! # Ok::<(), sales_dashboard_workspace::forecast::ForecastError>(())
//! ```

pub use sales_dashboard as dashboard;
pub use sales_forecast as forecast;
pub use sales_math as math;
