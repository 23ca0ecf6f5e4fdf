use sales_forecast::models::arima::ArimaModel;
use sales_forecast::models::{ForecastModel, TrainedForecastModel};
use sales_forecast::{Forecaster, ModelOrder, SalesKpis, SalesTable, SeriesValidator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Sales Forecast: Basic Forecasting Example");
    println!("=========================================\n");

    // Twelve weeks of sales, one entry left blank
    let entries = [
        "120", "132", "128", "", "150", "147", "158", "166", "161", "175", "182", "179",
    ];
    let series = SeriesValidator::default().validate_entries(entries)?;
    println!("Validated {} weeks: {:?}\n", series.len(), series.values());

    // Fit the model directly to look at its coefficients
    let trained = ArimaModel::new(1, 1, 1)?.train(&series)?;
    println!("{} fitted:", trained.name());
    println!("  intercept: {:.3}", trained.intercept());
    println!("  AR: {:?}", trained.ar_coefficients());
    println!("  MA: {:?}", trained.ma_coefficients());
    println!("  residual variance: {:.3}\n", trained.residual_variance());

    // Policy-driven forecast, as the dashboard runs it
    let forecaster = Forecaster::default().with_horizon(4);
    let prediction = forecaster.predict(&series)?;
    if let Some(reason) = prediction.fallback_reason() {
        println!("Fell back to the mean: {}", reason);
    }
    let forecast = prediction.result();
    for (week, value) in forecast.weeks() {
        println!("  Week {}: {:.2}", week, value);
    }

    // A series too short for the order shows the fallback path
    let short = SeriesValidator::default().validate_entries(["40", "44"])?;
    let prediction = Forecaster::default()
        .with_order(ModelOrder::new(2, 1, 1))
        .predict(&short)?;
    println!(
        "\nShort series: {} ({})",
        prediction.result().method(),
        prediction
            .fallback_reason()
            .map(|r| r.to_string())
            .unwrap_or_default()
    );

    let kpis = SalesKpis::compute(&series, forecast)?;
    println!("\nAvg Sales: {:.2}", kpis.average_sales);
    println!("Growth Rate: {:.2}%", kpis.growth_rate);
    if let Some(next) = kpis.next_predicted {
        println!("Next Predicted: {:.2}", next);
    }

    let csv = SalesTable::from_forecast(&series, forecast).to_csv_bytes()?;
    println!("\n{}", String::from_utf8(csv)?);

    Ok(())
}
