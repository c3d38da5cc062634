//! Wright cumulative-average model.
//!
//! The running average cost of the first `n` units follows the power law, so
//! the total for the first `n` units is proportional to `n^c` with
//! `c = 1 + b`. Single-unit cost is the first difference of that total:
//!
//! ```text
//! cost(n) = t * (n^c - (n-1)^c) / (m^c - (m-1)^c)
//! ```
//!
//! At r = 0.5 the exponent `c` reaches zero and every difference vanishes
//! except the one at unit 1, so unit costs follow the `c -> 0` limit of the
//! ratio. Rates below 0.5 give `c < 0`, where the cumulative total would
//! shrink as units are added; those are rejected.

use tracing::debug;

use crate::domain::guards;
use crate::error::CurveError;
use crate::math::rate::slope_of;

/// Exponents closer to zero than this use the `c -> 0` limit.
const EXPONENT_EPS: f64 = 1e-12;

/// Cost of unit `n` given the cost `t` of unit `m`.
pub fn unit_cost(t: f64, m: f64, n: f64, r: f64) -> Result<f64, CurveError> {
    guards::positive("t", t)?;
    at_least_one("m", m)?;
    at_least_one("n", n)?;
    guards::positive("r", r)?;

    let c = cumulative_exponent(r)?;
    if c.abs() < EXPONENT_EPS {
        return Ok(t * limit_ratio(m, n)?);
    }
    Ok(t * first_difference(n, c) / first_difference(m, c))
}

/// Total cost of units `m..=n`: `t * (n^c - (m-1)^c)`.
///
/// `t` is the scale of the cumulative law, i.e. the cost of unit 1.
pub fn block_cost(t: f64, m: f64, n: f64, r: f64) -> Result<f64, CurveError> {
    guards::block_inputs(t, m, n, r)?;
    at_least_one("m", m)?;

    let c = cumulative_exponent(r)?;
    let total = t * (cumulative_power(n, c) - cumulative_power(m - 1.0, c));
    debug!(m, n, c, total, "cumulative-average block cost");
    Ok(total)
}

/// `c = 1 + b`, clamped to zero within rounding of r = 0.5.
fn cumulative_exponent(r: f64) -> Result<f64, CurveError> {
    let c = 1.0 + slope_of(r);
    if c < -EXPONENT_EPS {
        return Err(CurveError::domain(
            "r",
            r,
            "must be >= 0.5 for the cumulative-average model",
        ));
    }
    Ok(if c < 0.0 { 0.0 } else { c })
}

/// `x^c` for a cumulative count. Nothing is produced before unit 1, so a zero
/// count contributes nothing, also at `c = 0`.
fn cumulative_power(x: f64, c: f64) -> f64 {
    if x == 0.0 && !c.is_nan() {
        0.0
    } else {
        x.powf(c)
    }
}

fn first_difference(x: f64, c: f64) -> f64 {
    cumulative_power(x, c) - cumulative_power(x - 1.0, c)
}

/// `lim c->0 of first_difference(n, c) / first_difference(m, c)`.
///
/// Past unit 1 each difference behaves like `c * ln(x / (x - 1))`; at unit 1
/// it stays 1.
fn limit_ratio(m: f64, n: f64) -> Result<f64, CurveError> {
    if m.is_nan() || n.is_nan() {
        return Ok(f64::NAN);
    }
    let log_step = |x: f64| x.ln() - (x - 1.0).ln();
    match (m == 1.0, n == 1.0) {
        (true, true) => Ok(1.0),
        (true, false) => Ok(0.0),
        (false, true) => Err(CurveError::domain(
            "n",
            n,
            "unit 1 has unbounded cost relative to later units at r = 0.5",
        )),
        (false, false) => Ok(log_step(n) / log_step(m)),
    }
}

/// Cumulative counts start at unit 1.
fn at_least_one(field: &'static str, value: f64) -> Result<f64, CurveError> {
    guards::positive(field, value)?;
    if value < 1.0 {
        return Err(CurveError::domain(field, value, "must be >= 1"));
    }
    Ok(value)
}
