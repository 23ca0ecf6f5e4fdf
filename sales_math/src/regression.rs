//! Regularised least squares
//!
//! Solves `min ||y - X b||² + λ ||b||²` through the normal equations and a
//! Cholesky factorisation. The penalty is relative: `λ = ridge * mean(diag(XᵀX))`,
//! so a fixed `ridge` behaves the same whether sales are in units or millions.

use crate::{MathError, Result};

/// Pivots at or below this fraction of the largest diagonal entry are singular
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solve a ridge-regularised least-squares problem.
///
/// `design` holds one row per observation; every row must have the same
/// number of columns. A `ridge` of zero gives ordinary least squares and
/// reports rank deficiency as [`MathError::SingularMatrix`].
pub fn ridge_least_squares(design: &[Vec<f64>], targets: &[f64], ridge: f64) -> Result<Vec<f64>> {
    if design.is_empty() {
        return Err(MathError::InsufficientData(
            "Least squares needs at least one observation".to_string(),
        ));
    }
    if design.len() != targets.len() {
        return Err(MathError::InvalidInput(format!(
            "Design has {} rows but there are {} targets",
            design.len(),
            targets.len()
        )));
    }
    if !(ridge >= 0.0 && ridge.is_finite()) {
        return Err(MathError::InvalidInput(format!(
            "Ridge penalty must be a finite non-negative number, got {}",
            ridge
        )));
    }

    let columns = design[0].len();
    if columns == 0 {
        return Ok(Vec::new());
    }
    if let Some(row) = design.iter().position(|r| r.len() != columns) {
        return Err(MathError::InvalidInput(format!(
            "Row {} has {} columns, expected {}",
            row,
            design[row].len(),
            columns
        )));
    }

    let mut xtx = vec![vec![0.0; columns]; columns];
    let mut xty = vec![0.0; columns];
    for (row, &target) in design.iter().zip(targets) {
        for i in 0..columns {
            xty[i] += row[i] * target;
            for j in 0..=i {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..columns {
        for j in 0..i {
            xtx[j][i] = xtx[i][j];
        }
    }

    let trace: f64 = (0..columns).map(|i| xtx[i][i]).sum();
    let scale = trace / columns as f64;
    let penalty = ridge * if scale > 0.0 { scale } else { 1.0 };
    for (i, row) in xtx.iter_mut().enumerate() {
        row[i] += penalty;
    }

    solve_symmetric(&xtx, &xty)
}

/// Solve `A x = b` for symmetric positive definite `A` by Cholesky factorisation
pub fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>> {
    let n = b.len();
    if a.len() != n || a.iter().any(|row| row.len() != n) {
        return Err(MathError::InvalidInput(format!(
            "Expected a {}x{} matrix",
            n, n
        )));
    }

    let max_diagonal = (0..n).map(|i| a[i][i].abs()).fold(0.0, f64::max);
    let tolerance = PIVOT_TOLERANCE * max_diagonal;

    // A = L Lᵀ
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }

            if i == j {
                if !(sum > tolerance) {
                    return Err(MathError::SingularMatrix { column: i, pivot: sum });
                }
                l[i][i] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Lᵀ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Ok(x)
}
