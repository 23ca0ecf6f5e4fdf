//! Property-based tests for the forecasting core.

use proptest::prelude::*;
use sales_forecast::{forecast, Forecaster, ModelOrder, SalesSeries};

/// Weekly sales between 0 and 10 000, up to a year long.
fn sales_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..10_000.0_f64, min_len..max_len)
}

fn order_strategy() -> impl Strategy<Value = ModelOrder> {
    (0usize..=3, 0usize..=2, 0usize..=3).prop_map(|(p, d, q)| ModelOrder::new(p, d, q))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn successful_fit_returns_horizon_values(
        values in sales_strategy(1, 53),
        horizon in 1usize..13,
        order in order_strategy(),
    ) {
        let series = SalesSeries::new(values).unwrap();
        if let Ok(result) = forecast(&series, horizon, order) {
            prop_assert_eq!(result.values().len(), horizon);
            prop_assert_eq!(result.first_week(), series.len() + 1);
            prop_assert!(result.values().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn prediction_always_has_horizon_values(
        values in sales_strategy(1, 53),
        horizon in 1usize..13,
        order in order_strategy(),
    ) {
        let series = SalesSeries::new(values).unwrap();
        let prediction = Forecaster::default()
            .with_horizon(horizon)
            .with_order(order)
            .predict(&series)
            .unwrap();
        prop_assert_eq!(prediction.result().horizon(), horizon);
    }

    #[test]
    fn constant_series_forecasts_constant(
        level in 0.0..10_000.0_f64,
        len in 1usize..20,
        order in order_strategy(),
    ) {
        let series = SalesSeries::new(vec![level; len]).unwrap();
        let prediction = Forecaster::default().with_order(order).predict(&series).unwrap();
        for value in prediction.result().values() {
            prop_assert!((value - level).abs() < 1e-6 * level.max(1.0));
        }
    }
}
