//! Command-line front end

use crate::error::Result;
use crate::render::{render_kpis, render_prediction, render_series, render_table};
use crate::session::SessionContext;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sales_forecast::{FallbackPolicy, ForecastConfig, ModelOrder, SalesSeries};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sales_dashboard")]
#[command(about = "Weekly sales forecasting dashboard", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate sales, forecast them and show KPIs, the Week/Sales table and an optional chart
    Predict {
        #[command(flatten)]
        input: InputArgs,

        /// Number of weeks to forecast
        #[arg(long)]
        horizon: Option<usize>,

        /// ARIMA order as p,d,q
        #[arg(long)]
        order: Option<ModelOrder>,

        /// What to do when the order cannot be fitted
        #[arg(long, value_enum)]
        fallback: Option<FallbackArg>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the Week/Sales table to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Draw actual and predicted sales to this SVG file
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Validate sales and print the cleaned series
    Validate {
        #[command(flatten)]
        input: InputArgs,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Where the sales come from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// CSV file with a sales column
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Weekly sales, oldest first
    #[arg(long, num_args = 1..)]
    pub sales: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackArg {
    /// Forecast the series mean
    Mean,
    /// Report the fit error
    Fail,
}

impl From<FallbackArg> for FallbackPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Mean => FallbackPolicy::Mean,
            FallbackArg::Fail => FallbackPolicy::Fail,
        }
    }
}

/// Run a parsed command, writing its report to `out`
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Commands::Predict {
            input,
            horizon,
            order,
            fallback,
            config,
            export,
            chart,
        } => {
            let mut config = load_config(config)?;
            if let Some(horizon) = horizon {
                config.horizon = horizon;
            }
            if let Some(order) = order {
                config.order = order;
            }
            if let Some(fallback) = fallback {
                config.fallback = fallback.into();
            }
            run_predict(config, &input, export, chart, out)
        }
        Commands::Validate { input, config } => {
            let config = load_config(config)?;
            let series = read_series(&config, &input)?;
            write!(out, "{}", render_series(&series))?;
            Ok(())
        }
    }
}

fn run_predict<W: Write>(
    config: ForecastConfig,
    input: &InputArgs,
    export: Option<PathBuf>,
    chart: Option<PathBuf>,
    out: &mut W,
) -> Result<()> {
    let mut session = SessionContext::new(config)?;
    let series = read_series(session.config(), input)?;
    let prediction = session.submit(series)?;
    write!(out, "{}", render_prediction(prediction))?;

    writeln!(out)?;
    write!(out, "{}", render_kpis(&session.kpis()?))?;
    writeln!(out)?;
    write!(out, "{}", render_table(&session.table()?))?;

    if let Some(path) = export {
        session.export_csv(&path)?;
        writeln!(out, "\nSaved {}", path.display())?;
    }
    if let Some(path) = chart {
        session.save_chart(&path)?;
        writeln!(out, "\nSaved chart {}", path.display())?;
    }
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<ForecastConfig> {
    match path {
        Some(path) => Ok(ForecastConfig::from_json_file(path)?),
        None => Ok(ForecastConfig::default()),
    }
}

fn read_series(config: &ForecastConfig, input: &InputArgs) -> Result<SalesSeries> {
    let series = match &input.csv {
        Some(path) => config.data_loader().from_csv(path)?,
        None => config.manual_validator().validate_entries(&input.sales)?,
    };
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_predict() {
        let cli = Cli::try_parse_from([
            "sales_dashboard",
            "predict",
            "--sales",
            "1",
            "2.5",
            "3",
            "--order",
            "2,1,0",
            "--fallback",
            "fail",
        ])
        .unwrap();

        match cli.command {
            Commands::Predict {
                input,
                order,
                fallback,
                ..
            } => {
                assert_eq!(input.sales, vec!["1", "2.5", "3"]);
                assert_eq!(order, Some(ModelOrder::new(2, 1, 0)));
                assert_eq!(fallback, Some(FallbackArg::Fail));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_input_is_required_and_exclusive() {
        assert!(Cli::try_parse_from(["sales_dashboard", "validate"]).is_err());
        assert!(Cli::try_parse_from([
            "sales_dashboard",
            "validate",
            "--csv",
            "a.csv",
            "--sales",
            "1"
        ])
        .is_err());
    }

    #[test]
    fn test_negative_sales_are_not_values() {
        assert!(Cli::try_parse_from(["sales_dashboard", "validate", "--sales", "1", "-2"]).is_err());
    }

    #[test]
    fn test_bad_order_rejected() {
        assert!(Cli::try_parse_from([
            "sales_dashboard",
            "predict",
            "--sales",
            "1",
            "--order",
            "1,1"
        ])
        .is_err());
    }
}
