//! Learning curve estimated from observed unit costs.
//!
//! Given observed `(unit, cost)` pairs we fit the unit model in log-log space,
//! `ln(cost) = ln(t1) + b * ln(unit)`, and report the first-unit cost, the
//! natural slope and the implied learning rate.

use tracing::{debug, warn};

use crate::domain::{guards, EvalOptions, FittedCurve};
use crate::error::CurveError;
use crate::math::{fit_line, learning_rate};

/// Fit a unit-model curve to observed costs.
pub fn fit_learning_curve(
    units: &[f64],
    costs: &[f64],
    opts: EvalOptions,
) -> Result<FittedCurve, CurveError> {
    if units.len() != costs.len() {
        return Err(CurveError::config(
            "observations",
            format!("{} units vs {} costs", units.len(), costs.len()),
            "units and costs must be index-aligned",
        ));
    }

    let observed = units.len();
    let (units, costs): (Vec<f64>, Vec<f64>) = units
        .iter()
        .zip(costs.iter())
        .filter(|(u, c)| !opts.na_rm || (!u.is_nan() && !c.is_nan()))
        .map(|(&u, &c)| (u, c))
        .unzip();
    if units.len() != observed {
        warn!(
            dropped = observed - units.len(),
            "dropped observations with missing unit or cost"
        );
    }
    if let Some(&missing) = units.iter().chain(costs.iter()).find(|v| v.is_nan()) {
        return Err(CurveError::domain(
            "observations",
            missing,
            "contain missing values; enable na_rm to drop them",
        ));
    }

    guards::all_positive("units", &units)?;
    guards::all_positive("costs", &costs)?;
    if units.len() < 2 {
        return Err(CurveError::domain(
            "observations",
            units.len() as f64,
            "need at least two observations",
        ));
    }

    let ln_units: Vec<f64> = units.iter().map(|u| u.ln()).collect();
    let ln_costs: Vec<f64> = costs.iter().map(|c| c.ln()).collect();
    let line = fit_line(&ln_units, &ln_costs)
        .ok_or_else(|| CurveError::fit("observations do not span distinct units"))?;
    debug!(slope = line.slope, r_squared = line.r_squared, "fitted log-log line");

    Ok(FittedCurve {
        first_unit_cost: line.intercept.exp(),
        natural_slope: line.slope,
        learning_rate: learning_rate(line.slope),
        r_squared: line.r_squared,
        n_points: units.len(),
    })
}
