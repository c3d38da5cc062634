//! Crawford unit model.
//!
//! The cost of unit `n` is a power law of the unit index, anchored at the
//! known cost `t` of unit `m`:
//!
//! ```text
//! cost(n) = t * (n / m)^b,    b = ln(r) / ln(2)
//! ```
//!
//! Block totals come in two flavours:
//! - exact: sum every unit cost in `[m, n]` (linear in the block length)
//! - approximate: integrate the power law over `[m - 0.5, n + 0.5]` (constant
//!   time; the half-unit shift is the continuity correction for summing a
//!   discrete sequence with an integral)
//!
//! The midpoint unit is the unit whose cost, repeated over the whole block,
//! reproduces the approximate total.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{guards, BlockSummary};
use crate::error::CurveError;
use crate::math::rate::slope_of;

/// Blocks at least this long are summed in parallel.
const PARALLEL_MIN_UNITS: usize = 100_000;

/// Exponents closer to zero than this use the logarithmic limit.
const EXPONENT_EPS: f64 = 1e-12;

/// Cost of unit `n` given the cost `t` of unit `m`.
pub fn unit_cost(t: f64, m: f64, n: f64, r: f64) -> Result<f64, CurveError> {
    guards::positive("t", t)?;
    guards::positive("m", m)?;
    guards::positive("n", n)?;
    guards::positive("r", r)?;
    Ok(t * (n / m).powf(slope_of(r)))
}

/// Exact total cost of units `m..=n`, summing every unit.
pub fn cumulative_exact(t: f64, m: f64, n: f64, r: f64) -> Result<f64, CurveError> {
    guards::block_inputs(t, m, n, r)?;
    if [t, m, n, r].iter().any(|v| v.is_nan()) {
        return Ok(f64::NAN);
    }

    let b = slope_of(r);
    let count = guards::unit_count(m, n)?;
    let term = move |i: usize| t * ((m + i as f64) / m).powf(b);

    let total: f64 = if count >= PARALLEL_MIN_UNITS {
        debug!(count, "summing unit costs in parallel");
        (0..count).into_par_iter().map(term).sum()
    } else {
        (0..count).map(term).sum()
    };
    Ok(total)
}

/// Approximate total cost of units `m..=n` via the continuous integral.
pub fn cumulative_approx(t: f64, m: f64, n: f64, r: f64) -> Result<f64, CurveError> {
    guards::block_inputs(t, m, n, r)?;
    integral_lower_bound(m)?;
    let b = slope_of(r);
    let t1 = t / m.powf(b);
    Ok(t1 * power_integral(m - 0.5, n + 0.5, 1.0 + b))
}

/// Unit whose cost, repeated `n - m + 1` times, equals the approximate block total.
pub fn midpoint_unit(m: f64, n: f64, r: f64) -> Result<f64, CurveError> {
    guards::positive("m", m)?;
    guards::positive("n", n)?;
    guards::positive("r", r)?;
    guards::ordered_block(m, n)?;
    integral_lower_bound(m)?;

    let b = slope_of(r);
    if b.abs() < EXPONENT_EPS {
        // Flat curve: every unit costs the same.
        return Ok((m + n) / 2.0);
    }
    let units = n - m + 1.0;
    let mean = power_integral(m - 0.5, n + 0.5, 1.0 + b) / units;
    let k = mean.powf(1.0 / b);
    debug!(m, n, r, k, "solved midpoint unit");
    Ok(k)
}

/// Block units, block hours and the midpoint unit for units `m..=n`.
pub fn block_summary(t: f64, m: f64, n: f64, r: f64) -> Result<BlockSummary, CurveError> {
    guards::block_inputs(t, m, n, r)?;
    let b = slope_of(r);
    let block_units = n - m + 1.0;
    let midpoint = midpoint_unit(m, n, r)?;

    // Rebase the reference cost to unit 1 so the midpoint can be evaluated directly.
    let t1 = t / m.powf(b);
    let midpoint_hours = unit_cost(t1, 1.0, midpoint, r)?;

    Ok(BlockSummary {
        block_units,
        block_hours: midpoint_hours * block_units,
        midpoint_unit: midpoint,
        midpoint_hours,
    })
}

/// The integral starts at `m - 0.5`, which has to stay positive.
fn integral_lower_bound(m: f64) -> Result<(), CurveError> {
    if m <= 0.5 {
        return Err(CurveError::domain("m", m, "must be > 0.5 for the integral approximation"));
    }
    Ok(())
}

/// `∫ x^(c-1) dx` over `[lo, hi]`, i.e. `(hi^c - lo^c) / c`, with the
/// logarithmic limit at `c = 0`.
pub(crate) fn power_integral(lo: f64, hi: f64, c: f64) -> f64 {
    if c.abs() < EXPONENT_EPS {
        hi.ln() - lo.ln()
    } else {
        (hi.powf(c) - lo.powf(c)) / c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cost_matches_reference_value() {
        let v = unit_cost(100.0, 1.0, 125.0, 0.85).unwrap();
        assert!((v - 32.23647).abs() < 1e-5, "got {v}");
    }

    #[test]
    fn unit_cost_halves_by_rate_per_doubling() {
        let c10 = unit_cost(80.0, 5.0, 10.0, 0.9).unwrap();
        let c20 = unit_cost(80.0, 5.0, 20.0, 0.9).unwrap();
        assert!((c10 - 72.0).abs() < 1e-9);
        assert!((c20 / c10 - 0.9).abs() < 1e-12);
    }

    #[test]
    fn cumulative_exact_matches_reference_value() {
        let v = cumulative_exact(100.0, 1.0, 125.0, 0.85).unwrap();
        assert!((v - 5201.085).abs() < 1e-3, "got {v}");
    }

    #[test]
    fn cumulative_exact_single_unit_block() {
        let v = cumulative_exact(40.0, 7.0, 7.0, 0.8).unwrap();
        assert!((v - 40.0).abs() < 1e-12);
    }

    #[test]
    fn cumulative_exact_parallel_path_agrees_with_approx() {
        let exact = cumulative_exact(10.0, 1.0, 250_000.0, 0.9).unwrap();
        let approx = cumulative_approx(10.0, 1.0, 250_000.0, 0.9).unwrap();
        assert!(((approx - exact) / exact).abs() < 1e-3);
    }

    #[test]
    fn cumulative_approx_is_close_to_exact() {
        let exact = cumulative_exact(100.0, 1.0, 125.0, 0.85).unwrap();
        let approx = cumulative_approx(100.0, 1.0, 125.0, 0.85).unwrap();
        assert!(((approx - exact) / exact).abs() < 0.01);
    }

    #[test]
    fn fifty_percent_curve_uses_log_limit() {
        let approx = cumulative_approx(100.0, 1.0, 99.0, 0.5).unwrap();
        let expected = 100.0 * (99.5f64.ln() - 0.5f64.ln());
        assert!((approx - expected).abs() < 1e-9);
        assert!(midpoint_unit(1.0, 99.0, 0.5).unwrap().is_finite());
    }

    #[test]
    fn block_summary_matches_reference_values() {
        let s = block_summary(125.0, 201.0, 500.0, 0.75).unwrap();
        assert_eq!(s.block_units, 300.0);
        assert!((s.block_hours - 30350.48).abs() < 1e-2, "{s:?}");
        assert!((s.midpoint_unit - 334.6103).abs() < 1e-4, "{s:?}");
        assert!((s.midpoint_hours - 101.1683).abs() < 1e-4, "{s:?}");
    }

    #[test]
    fn block_hours_equal_approximate_total() {
        let s = block_summary(125.0, 201.0, 500.0, 0.75).unwrap();
        let approx = cumulative_approx(125.0, 201.0, 500.0, 0.75).unwrap();
        assert!((s.block_hours - approx).abs() < 1e-6);
    }

    #[test]
    fn flat_curve_midpoint_is_block_centre() {
        assert_eq!(midpoint_unit(11.0, 20.0, 1.0).unwrap(), 15.5);
        let s = block_summary(3.0, 11.0, 20.0, 1.0).unwrap();
        assert!((s.block_hours - 30.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_block_is_a_range_error() {
        let range = |res: Result<f64, CurveError>| matches!(res, Err(CurveError::Range { .. }));
        assert!(range(cumulative_exact(100.0, 10.0, 5.0, 0.8)));
        assert!(range(cumulative_approx(100.0, 10.0, 5.0, 0.8)));
        assert!(range(midpoint_unit(10.0, 5.0, 0.8)));
        assert!(matches!(
            block_summary(100.0, 10.0, 5.0, 0.8),
            Err(CurveError::Range { .. })
        ));
    }

    #[test]
    fn oversized_exact_block_is_rejected() {
        assert!(matches!(
            cumulative_exact(1.0, 1.0, 1e20, 0.9),
            Err(CurveError::Domain { field: "n", .. })
        ));
        // The integral form has no length limit.
        assert!(cumulative_approx(1.0, 1.0, 1e20, 0.9).unwrap().is_finite());
    }

    #[test]
    fn integral_forms_need_a_positive_lower_bound() {
        let low_m = |res: Result<f64, CurveError>| {
            matches!(res, Err(CurveError::Domain { field: "m", .. }))
        };
        assert!(low_m(cumulative_approx(100.0, 0.25, 10.0, 0.8)));
        assert!(low_m(midpoint_unit(0.5, 10.0, 0.8)));
        assert!(matches!(
            block_summary(100.0, 0.3, 10.0, 0.8),
            Err(CurveError::Domain { field: "m", .. })
        ));
        // The exact sum is defined for any positive start.
        assert!(cumulative_exact(100.0, 0.25, 10.0, 0.8).unwrap().is_finite());
    }

    #[test]
    fn missing_input_propagates() {
        assert!(unit_cost(f64::NAN, 1.0, 10.0, 0.8).unwrap().is_nan());
        assert!(cumulative_exact(100.0, 1.0, 10.0, f64::NAN).unwrap().is_nan());
    }
}
