//! Conversions between a learning rate and its natural slope.
//!
//! - learning rate `r`: cost multiplier applied each time cumulative
//!   production doubles (`r = 0.85` means an 85% curve)
//! - natural slope `b = ln(r) / ln(2)`, so `r = 2^b`
//!
//! The estimate functions back a slope out of an observed total cost for the
//! first `n` units by inverting the continuous cumulative-cost law
//! `T = t * n^(1 + b)`.

use std::f64::consts::{LN_2, LOG10_2};

use crate::domain::guards;
use crate::error::CurveError;

/// Natural slope of a learning rate: `b = ln(r) / ln(2)`.
pub fn natural_slope(r: f64) -> Result<f64, CurveError> {
    guards::positive("r", r)?;
    Ok(slope_of(r))
}

/// Learning rate of a natural slope: `r = 2^b`.
///
/// Evaluated as `10^(b * log10(2) + 2) / 100` so that common rates such as
/// `0.85` survive a round trip through [`natural_slope`].
pub fn learning_rate(b: f64) -> f64 {
    10f64.powf(b * LOG10_2 + 2.0) / 100.0
}

/// Estimate the natural slope from the total cost `total` of the first `n`
/// units and the cost `t` of unit 1.
///
/// `b = (ln(total) - ln(t)) / ln(n) - 1`
pub fn natural_slope_estimate(total: f64, t: f64, n: f64) -> Result<f64, CurveError> {
    guards::positive("total", total)?;
    guards::positive("t", t)?;
    guards::positive("n", n)?;
    if n <= 1.0 {
        return Err(CurveError::domain("n", n, "must be > 1 to estimate a slope"));
    }
    Ok((total.ln() - t.ln()) / n.ln() - 1.0)
}

/// Estimate the learning rate from the total cost of the first `n` units.
pub fn learning_rate_estimate(total: f64, t: f64, n: f64) -> Result<f64, CurveError> {
    natural_slope_estimate(total, t, n).map(learning_rate)
}

/// Unchecked slope for callers that already guarded `r`.
pub(crate) fn slope_of(r: f64) -> f64 {
    r.ln() / LN_2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_and_rate_round_trip() {
        for &r in &[0.5, 0.7, 0.75, 0.8, 0.85, 0.885, 0.9, 0.99, 1.0] {
            let b = natural_slope(r).unwrap();
            assert!((learning_rate(b) - r).abs() < 1e-12, "r={r}");
        }
    }

    #[test]
    fn known_slopes() {
        assert!((natural_slope(0.5).unwrap() + 1.0).abs() < 1e-15);
        assert_eq!(natural_slope(1.0).unwrap(), 0.0);
        assert!((natural_slope(0.8).unwrap() + 0.321_928_094_887_362_4).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_rate() {
        assert!(matches!(
            natural_slope(0.0),
            Err(CurveError::Domain { field: "r", .. })
        ));
        assert!(natural_slope(-0.5).is_err());
    }

    #[test]
    fn estimate_inverts_cumulative_law() {
        // T = t * n^(1 + b) with an 80% curve.
        let b = natural_slope(0.8).unwrap();
        let (t, n): (f64, f64) = (50.0, 400.0);
        let total = t * n.powf(1.0 + b);

        let b_hat = natural_slope_estimate(total, t, n).unwrap();
        assert!((b_hat - b).abs() < 1e-12);
        let r_hat = learning_rate_estimate(total, t, n).unwrap();
        assert!((r_hat - 0.8).abs() < 1e-12);
    }

    #[test]
    fn estimate_needs_more_than_one_unit() {
        assert!(natural_slope_estimate(100.0, 100.0, 1.0).is_err());
    }
}
