//! Differencing and integration of ordered series
//!
//! `difference` removes trend by taking successive differences `d` times;
//! `integrate` undoes it for values that extend past the end of the original
//! series (forecasts), anchoring each level at the tail of the original.

/// Difference a series `order` times.
///
/// Each pass shortens the series by one; a series that runs out of values
/// comes back empty.
pub fn difference(values: &[f64], order: usize) -> Vec<f64> {
    let mut result = values.to_vec();
    for _ in 0..order {
        if result.len() < 2 {
            return Vec::new();
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Integrate values continuing a series that was differenced `order` times.
///
/// `future` holds values on the differenced scale for the periods right after
/// the end of `original`. The result is on the scale of `original`.
pub fn integrate(future: &[f64], original: &[f64], order: usize) -> Vec<f64> {
    let mut result = future.to_vec();

    for level in (0..order).rev() {
        let anchor = difference(original, level).last().copied().unwrap_or(0.0);

        let mut running = anchor;
        for value in result.iter_mut() {
            running += *value;
            *value = running;
        }
    }

    result
}
