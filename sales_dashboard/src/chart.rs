//! Actual versus predicted sales chart, drawn as SVG

use crate::error::{DashboardError, Result};
use plotters::prelude::*;
use sales_forecast::{SalesRow, SalesTable};
use std::path::Path;

/// Chart size in pixels
pub const CHART_SIZE: (u32, u32) = (800, 480);

const ACTUAL_COLOR: RGBColor = RGBColor(0, 123, 255);
const PREDICTED_COLOR: RGBColor = RGBColor(255, 99, 71);

/// Draw the table as an SVG document.
///
/// Observed weeks are a solid line with circles, forecast weeks a line with
/// crosses that starts at the last observed week.
pub fn chart_svg(table: &SalesTable) -> Result<String> {
    if table.is_empty() {
        return Err(DashboardError::Chart("table has no rows".to_string()));
    }

    let actual = points(table.observed_rows());
    // Join the forecast to the last observation so the lines connect
    let predicted: Vec<(f64, f64)> = actual
        .last()
        .copied()
        .into_iter()
        .chain(points(table.forecast_rows()))
        .collect();

    let weeks = table.len() as f64;
    let (y_min, y_max) = sales_range(table.rows());

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Sales", ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(0.5..weeks + 0.5, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Weeks")
            .y_desc("Sales")
            .x_label_formatter(&|v| format!("{:.0}", v))
            .y_label_formatter(&|v| format!("{:.1}", v))
            .draw()?;

        chart
            .draw_series(LineSeries::new(actual.iter().copied(), ACTUAL_COLOR))?
            .label("Actual Sales")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ACTUAL_COLOR));
        chart.draw_series(
            actual
                .iter()
                .map(|&point| Circle::new(point, 3, ACTUAL_COLOR.filled())),
        )?;

        if predicted.len() > 1 {
            chart
                .draw_series(LineSeries::new(predicted.iter().copied(), PREDICTED_COLOR))?
                .label("Predicted Sales")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PREDICTED_COLOR));
            chart.draw_series(
                predicted
                    .iter()
                    .skip(1)
                    .map(|&point| Cross::new(point, 4, PREDICTED_COLOR)),
            )?;
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;

        root.present()?;
    }

    Ok(svg)
}

/// Draw the table and write the SVG to `path`
pub fn save_chart<P: AsRef<Path>>(table: &SalesTable, path: P) -> Result<()> {
    let svg = chart_svg(table)?;
    std::fs::write(path.as_ref(), svg)?;
    tracing::info!(path = %path.as_ref().display(), "saved sales chart");
    Ok(())
}

fn points(rows: &[SalesRow]) -> Vec<(f64, f64)> {
    rows.iter().map(|row| (row.week as f64, row.sales)).collect()
}

/// Sales axis range with a 5% margin; flat data gets a unit margin
fn sales_range(rows: &[SalesRow]) -> (f64, f64) {
    let min = rows.iter().map(|r| r.sales).fold(f64::INFINITY, f64::min);
    let max = rows.iter().map(|r| r.sales).fold(f64::NEG_INFINITY, f64::max);
    let margin = (max - min) * 0.05;
    let margin = if margin > 0.0 && margin.is_finite() { margin } else { 1.0 };
    (min - margin, max + margin)
}
