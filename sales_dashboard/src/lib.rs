//! # Sales Dashboard
//!
//! The layer between a user and the forecasting core: per-user session state,
//! plain-text rendering of KPIs and the Week/Sales table, an SVG chart of
//! actual and predicted sales, and the `sales_dashboard` command line.
//!
//! ## Example
//!
//! ```
//! use sales_dashboard::{render_kpis, SessionContext};
//! use sales_forecast::ForecastConfig;
//!
//! let mut session = SessionContext::new(ForecastConfig::default())?;
//! session.enter_sales(["1", "2", "3"])?;
//!
//! let text = render_kpis(&session.kpis()?);
//! assert!(text.starts_with("Avg Sales: 2.00"));
//! # Ok::<(), sales_dashboard::DashboardError>(())
//! ```

pub mod chart;
pub mod cli;
pub mod error;
pub mod render;
pub mod session;

pub use crate::chart::{chart_svg, save_chart};
pub use crate::cli::{run, Cli};
pub use crate::error::{DashboardError, Result};
pub use crate::render::{render_kpis, render_prediction, render_series, render_table};
pub use crate::session::SessionContext;
