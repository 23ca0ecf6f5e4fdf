use sales_forecast::{ForecastError, InputError, ModelFitError, ModelOrder};
use std::io;

#[test]
fn test_error_conversion() {
    // IO errors
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    // Input errors
    let forecast_error = ForecastError::from(InputError::EmptySeries);
    assert!(matches!(
        forecast_error,
        ForecastError::Input(InputError::EmptySeries)
    ));

    // Config errors from malformed JSON
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let forecast_error = ForecastError::from(json_error);
    assert!(matches!(forecast_error, ForecastError::ConfigError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::from(InputError::MissingColumn {
        column: "Sales".to_string(),
        available: vec!["Week".to_string(), "Revenue".to_string()],
    });
    assert_eq!(
        error.to_string(),
        "Input error: column 'Sales' not found (available: Week, Revenue)"
    );

    let error = ForecastError::from(ModelFitError::InsufficientData {
        order: ModelOrder::new(1, 1, 1),
        required: 4,
        actual: 1,
    });
    assert_eq!(
        error.to_string(),
        "Model fit error: ARIMA(1,1,1) needs at least 4 observations, got 1"
    );

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}

#[test]
fn test_fit_errors_are_comparable() {
    let order = ModelOrder::new(2, 0, 1);
    let singular = ModelFitError::Singular {
        order,
        detail: "pivot 0".to_string(),
    };

    assert_eq!(singular.clone(), singular);
    assert_eq!(singular.order(), order);
    assert_eq!(ModelFitError::NonFinite { order }.order(), order);
    assert_ne!(singular, ModelFitError::NonFinite { order });
}
