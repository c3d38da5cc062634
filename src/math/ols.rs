//! Least-squares line fit.
//!
//! Learning-curve estimation from observed data reduces to a straight line in
//! log-log space:
//!
//! ```text
//! ln(cost_i) = ln(t1) + b * ln(unit_i)
//! ```
//!
//! We build the two-column design matrix and solve with SVD, which tolerates
//! nearly collinear columns (e.g., all observations clustered at very large
//! unit indices).

use nalgebra::{DMatrix, DVector};

/// Intercept, slope and R² of a fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
    pub r_squared: f64,
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit `y = intercept + slope * x` by ordinary least squares.
///
/// Returns `None` for fewer than two points, mismatched lengths, non-finite
/// inputs, or zero variance in `x`.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LineFit> {
    let n = x.len();
    if n < 2 || n != y.len() {
        return None;
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }
    let x_mean = x.iter().sum::<f64>() / n as f64;
    if x.iter().all(|&v| (v - x_mean).abs() < 1e-300) {
        return None;
    }

    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] });
    let target = DVector::from_column_slice(y);
    let beta = solve_least_squares(&design, &target)?;

    let fitted = &design * &beta;
    let y_mean = y.iter().sum::<f64>() / n as f64;
    let ss_res: f64 = y
        .iter()
        .zip(fitted.iter())
        .map(|(&yi, &fi)| (yi - fi).powi(2))
        .sum();
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
    let r_squared = if ss_tot > 1e-300 {
        1.0 - ss_res / ss_tot
    } else {
        1.0
    };

    Some(LineFit {
        intercept: beta[0],
        slope: beta[1],
        r_squared,
    })
}
