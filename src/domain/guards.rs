//! Input guards shared by every formula.
//!
//! Inputs are statically typed, so validation reduces to domain checks:
//! strictly positive, finite values and ordered block bounds. `NaN` marks a
//! missing value and is passed through untouched so that it propagates into
//! the result instead of failing the call.

use crate::error::CurveError;

/// Longest block that is walked one unit at a time.
pub const MAX_ENUMERATED_UNITS: f64 = 1e9;

/// Require `value > 0` and finite. `NaN` passes.
pub fn positive(field: &'static str, value: f64) -> Result<f64, CurveError> {
    if value.is_nan() {
        return Ok(value);
    }
    if !value.is_finite() {
        return Err(CurveError::domain(field, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(CurveError::domain(field, value, "must be > 0"));
    }
    Ok(value)
}

/// Check every entry of a slice with [`positive`].
pub fn all_positive(field: &'static str, values: &[f64]) -> Result<(), CurveError> {
    for &v in values {
        positive(field, v)?;
    }
    Ok(())
}

/// Require `m <= n`. Missing bounds pass.
pub fn ordered_block(m: f64, n: f64) -> Result<(), CurveError> {
    if m > n {
        return Err(CurveError::Range { m, n });
    }
    Ok(())
}

/// Require a value to be present. Used where a missing value cannot flow
/// into the result, e.g. the bounds of a block that is enumerated unit by unit.
pub fn present(field: &'static str, value: f64) -> Result<f64, CurveError> {
    if value.is_nan() {
        return Err(CurveError::domain(field, value, "is missing"));
    }
    Ok(value)
}

/// Number of units `m, m+1, ...` not exceeding `n`, for ordered, present bounds.
pub fn unit_count(m: f64, n: f64) -> Result<usize, CurveError> {
    let units = (n - m).floor() + 1.0;
    if units > MAX_ENUMERATED_UNITS {
        return Err(CurveError::domain(
            "n",
            n,
            "block spans more than 1e9 units; use the integral approximation",
        ));
    }
    Ok(units as usize)
}

/// Guard the full `(t, m, n, r)` input tuple of a block formula.
pub fn block_inputs(t: f64, m: f64, n: f64, r: f64) -> Result<(), CurveError> {
    positive("t", t)?;
    positive("m", m)?;
    positive("n", n)?;
    positive("r", r)?;
    ordered_block(m, n)
}
