//! Plain-text views of dashboard results

use sales_forecast::{Prediction, SalesKpis, SalesSeries, SalesTable};

/// The three KPI lines, two decimals each
pub fn render_kpis(kpis: &SalesKpis) -> String {
    let next = match kpis.next_predicted {
        Some(value) => format!("{:.2}", value),
        None => "n/a".to_string(),
    };
    format!(
        "Avg Sales: {:.2}\nGrowth Rate: {:.2}%\nNext Predicted: {}\n",
        kpis.average_sales, kpis.growth_rate, next
    )
}

/// Which model produced the forecast, and why when it was a fallback
pub fn render_prediction(prediction: &Prediction) -> String {
    let method = prediction.result().method();
    match prediction.fallback_reason() {
        None => format!("Model: {}\n", method),
        Some(reason) => format!("Model: {} (fallback: {})\n", method, reason),
    }
}

/// Week/Sales table with forecast weeks marked
pub fn render_table(table: &SalesTable) -> String {
    let mut out = format!("{:>6}  {:>12}\n", "Week", "Sales");
    let observed = table.observed_rows().iter().map(|row| (row, "actual"));
    let forecast = table.forecast_rows().iter().map(|row| (row, "predicted"));
    for (row, kind) in observed.chain(forecast) {
        out.push_str(&format!("{:>6}  {:>12.2}  {}\n", row.week, row.sales, kind));
    }
    out
}

/// Cleaned series, one week per line
pub fn render_series(series: &SalesSeries) -> String {
    let mut out = String::new();
    for (week, value) in series.weeks().zip(series.values()) {
        out.push_str(&format!("Week {}: {}\n", week, value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sales_forecast::{ForecastMethod, ForecastResult, SalesRow};

    #[test]
    fn test_render_kpis() {
        let kpis = SalesKpis {
            average_sales: 2.0,
            growth_rate: 99.99990000099999,
            next_predicted: Some(2.0),
        };
        assert_eq!(
            render_kpis(&kpis),
            "Avg Sales: 2.00\nGrowth Rate: 100.00%\nNext Predicted: 2.00\n"
        );
    }

    #[test]
    fn test_render_kpis_without_forecast() {
        let kpis = SalesKpis {
            average_sales: 1.5,
            growth_rate: 0.0,
            next_predicted: None,
        };
        assert!(render_kpis(&kpis).ends_with("Next Predicted: n/a\n"));
    }

    #[test]
    fn test_render_table_marks_forecast_rows() {
        let series = SalesSeries::new(vec![10.0, 20.0]).unwrap();
        let forecast = ForecastResult::new(vec![15.0], 1, 3, ForecastMethod::Mean).unwrap();
        let table = SalesTable::from_forecast(&series, &forecast);

        let text = render_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("actual"));
        assert!(lines[3].trim_start().starts_with("3"));
        assert!(lines[3].ends_with("predicted"));
        assert!(lines[3].contains("15.00"));
    }

    #[test]
    fn test_render_plain_table() {
        let table = SalesTable::from_rows(vec![SalesRow { week: 1, sales: 7.5 }]);
        assert!(render_table(&table).lines().nth(1).unwrap().contains("7.50"));
    }

    #[test]
    fn test_render_series() {
        let series = SalesSeries::new(vec![1.5, 0.0]).unwrap();
        assert_eq!(render_series(&series), "Week 1: 1.5\nWeek 2: 0\n");
    }
}
