//! Aggregate learning curve for several independently learning departments.
//!
//! Each department `i` has its own first-unit cost `t_i` and rate `r_i`. At a
//! shared horizon `n` the cumulative cost of department `i` is approximately
//! `t_i * n^(1 + b_i)`. We sum these into `hours_all` and back-solve a single
//! exponent `B` with
//!
//! ```text
//! H * n^B = hours_all,    H = Σ t_i
//! ```
//!
//! The fitted curve matches the combined total only at the supplied `n`; the
//! departments' mixture is not itself a power law, so refit for other horizons.

use tracing::{debug, warn};

use crate::domain::{guards, AggregateCurve, EvalOptions};
use crate::error::CurveError;
use crate::math::rate::{learning_rate, slope_of};

/// Fit the equivalent aggregate curve for department costs `t` and rates `r`
/// at horizon `n`.
///
/// With `opts.na_rm`, departments with a missing cost or rate are dropped.
pub fn aggregate_curve(
    t: &[f64],
    r: &[f64],
    n: f64,
    opts: EvalOptions,
) -> Result<AggregateCurve, CurveError> {
    if t.len() != r.len() {
        return Err(CurveError::config(
            "departments",
            format!("{} costs vs {} rates", t.len(), r.len()),
            "costs and rates must be index-aligned",
        ));
    }

    let (t, r) = if opts.na_rm {
        let kept: (Vec<f64>, Vec<f64>) = t
            .iter()
            .zip(r.iter())
            .filter(|(ti, ri)| !ti.is_nan() && !ri.is_nan())
            .map(|(&ti, &ri)| (ti, ri))
            .unzip();
        if kept.0.len() != t.len() {
            warn!(
                dropped = t.len() - kept.0.len(),
                "dropped departments with missing cost or rate"
            );
        }
        kept
    } else {
        (t.to_vec(), r.to_vec())
    };

    if t.is_empty() {
        return Err(CurveError::config(
            "departments",
            "[]",
            "at least one department is required",
        ));
    }
    guards::all_positive("t", &t)?;
    guards::all_positive("r", &r)?;
    guards::positive("n", n)?;
    if n <= 1.0 {
        return Err(CurveError::domain(
            "n",
            n,
            "must be > 1 to fit an aggregate exponent",
        ));
    }

    let department_hours: Vec<f64> = t
        .iter()
        .zip(r.iter())
        .map(|(&ti, &ri)| ti * n.powf(1.0 + slope_of(ri)))
        .collect();
    let hours_all: f64 = department_hours.iter().sum();
    let first_unit_total: f64 = t.iter().sum();

    let exponent = (hours_all / first_unit_total).ln() / n.ln();
    let total_hours = first_unit_total * n.powf(exponent);
    debug!(n, exponent, hours_all, "fitted aggregate exponent");

    Ok(AggregateCurve {
        horizon: n,
        first_unit_total,
        department_hours,
        hours_all,
        exponent,
        natural_slope: exponent - 1.0,
        learning_rate: learning_rate(exponent - 1.0),
        total_hours,
    })
}
