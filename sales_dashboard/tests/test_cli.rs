use clap::Parser;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sales_dashboard::{run, Cli, DashboardError};
use sales_forecast::{ForecastError, InputError, SalesTable};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn run_args(args: &[&str]) -> Result<String, DashboardError> {
    let cli = Cli::try_parse_from(std::iter::once("sales_dashboard").chain(args.iter().copied()))
        .unwrap();
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_predict_manual_entry() {
    let out = run_args(&["predict", "--sales", "1", "2", "3"]).unwrap();

    assert!(out.starts_with("Model: "));
    assert!(out.contains("Avg Sales: 2.00"));
    assert!(out.contains("Growth Rate: 200.00%"));
    assert!(out.contains("Next Predicted: 2.00"));
    assert_eq!(out.lines().filter(|l| l.ends_with("predicted")).count(), 3);
}

#[test]
fn test_predict_from_csv_with_export() {
    let mut data = NamedTempFile::new().unwrap();
    writeln!(data, "Week,Sales").unwrap();
    for week in 1..=10 {
        writeln!(data, "{},{}", week, 100 + week * 5).unwrap();
    }

    let dir = tempdir().unwrap();
    let export = dir.path().join("sales_predictions.csv");
    let out = run_args(&[
        "predict",
        "--csv",
        data.path().to_str().unwrap(),
        "--order",
        "0,1,0",
        "--horizon",
        "2",
        "--export",
        export.to_str().unwrap(),
    ])
    .unwrap();

    assert!(out.starts_with("Model: ARIMA(0,1,0)\n"));
    assert!(out.contains("Next Predicted: 155.00"));
    assert!(out.contains("Saved"));

    let table = SalesTable::from_csv_reader(std::fs::File::open(&export).unwrap()).unwrap();
    assert_eq!(table.len(), 12);
    assert_eq!(table.rows()[11].sales, 160.0);
}

#[test]
fn test_predict_fail_policy() {
    let result = run_args(&["predict", "--sales", "5", "--fallback", "fail"]);
    assert!(matches!(
        result,
        Err(DashboardError::Forecast(ForecastError::ModelFit(_)))
    ));
}

#[test]
fn test_config_file_and_override() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, r#"{{ "horizon": 5, "order": {{ "p": 0, "d": 1, "q": 0 }} }}"#).unwrap();
    let path = config.path().to_str().unwrap();

    let out = run_args(&["predict", "--sales", "10", "20", "30", "--config", path]).unwrap();
    assert_eq!(out.lines().filter(|l| l.ends_with("predicted")).count(), 5);

    let out = run_args(&[
        "predict", "--sales", "10", "20", "30", "--config", path, "--horizon", "1",
    ])
    .unwrap();
    assert_eq!(out.lines().filter(|l| l.ends_with("predicted")).count(), 1);
    assert!(out.contains("Next Predicted: 40.00"));
}

#[test]
fn test_validate_zero_fills() {
    let out = run_args(&["validate", "--sales", "3.5", "abc", "7"]).unwrap();
    assert_eq!(out, "Week 1: 3.5\nWeek 2: 0\nWeek 3: 7\n");
}

#[test]
fn test_validate_missing_column() {
    let mut data = NamedTempFile::new().unwrap();
    writeln!(data, "Week,Revenue\n1,10").unwrap();

    let result = run_args(&["validate", "--csv", data.path().to_str().unwrap()]);
    assert!(matches!(
        result,
        Err(DashboardError::Forecast(ForecastError::Input(
            InputError::MissingColumn { .. }
        )))
    ));
}

#[rstest]
#[case::zero_horizon(&["predict", "--sales", "1", "2", "--horizon", "0"])]
#[case::order_out_of_range(&["predict", "--sales", "1", "2", "--order", "1,3,1"])]
fn test_invalid_parameters(#[case] args: &[&str]) {
    match Cli::try_parse_from(std::iter::once("sales_dashboard").chain(args.iter().copied())) {
        Err(_) => {}
        Ok(cli) => {
            let result = run(cli, &mut Vec::<u8>::new());
            assert!(matches!(
                result,
                Err(DashboardError::Forecast(ForecastError::ConfigError(_)))
            ));
        }
    }
}

#[test]
fn test_too_many_manual_weeks() {
    let values: Vec<String> = (1..=53).map(|v| v.to_string()).collect();
    let mut args = vec!["validate", "--sales"];
    args.extend(values.iter().map(String::as_str));

    let result = run_args(&args);
    assert!(matches!(
        result,
        Err(DashboardError::Forecast(ForecastError::Input(
            InputError::TooManyObservations { max: 52, actual: 53 }
        )))
    ));
}

#[test]
fn test_negative_upload_rejected() {
    let mut data = NamedTempFile::new().unwrap();
    writeln!(data, "Sales\n-5\n-7").unwrap();

    let result = run_args(&["predict", "--csv", data.path().to_str().unwrap()]);
    assert!(matches!(
        result,
        Err(DashboardError::Forecast(ForecastError::Input(
            InputError::NegativeValue { index: 0, .. }
        )))
    ));
}

#[test]
fn test_predict_writes_chart() {
    let dir = tempdir().unwrap();
    let chart = dir.path().join("sales.svg");

    let out = run_args(&[
        "predict",
        "--sales",
        "12",
        "15",
        "14",
        "19",
        "22",
        "--chart",
        chart.to_str().unwrap(),
    ])
    .unwrap();
    assert!(out.contains("Saved chart"));

    let svg = std::fs::read_to_string(&chart).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Actual Sales"));
    assert!(svg.contains("Predicted Sales"));
}
