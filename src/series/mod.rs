//! Plotting input records.
//!
//! A plotting consumer receives, per model, the unit indices of a block with
//! the unit cost and running total at each index. Block plots add a single
//! annotated point at the midpoint unit.

use crate::compare::running_sum;
use crate::domain::{guards, AnnotatedPoint, BlockSeries, CurveSeries, ModelSpec, ProductionBlock};
use crate::error::CurveError;
use crate::models::{unit, unit_cost};

/// Unit cost and running total for every unit in `m..=n`, one series per
/// model selected by `spec`.
pub fn curve_series(
    t: f64,
    m: f64,
    n: f64,
    r: f64,
    spec: ModelSpec,
) -> Result<Vec<CurveSeries>, CurveError> {
    guards::block_inputs(t, m, n, r)?;
    let block = ProductionBlock::new(m, n)?;
    let x: Vec<f64> = block.indices()?.collect();

    spec.kinds()
        .iter()
        .map(|&model| {
            let value = x
                .iter()
                .map(|&i| unit_cost(model, t, m, i, r))
                .collect::<Result<Vec<f64>, CurveError>>()?;
            let cumulative_value = running_sum(&value);
            Ok(CurveSeries {
                model,
                x: x.clone(),
                value,
                cumulative_value,
            })
        })
        .collect()
}

/// Unit-model series for `m..=n` annotated with the block midpoint.
pub fn block_series(t: f64, m: f64, n: f64, r: f64) -> Result<BlockSeries, CurveError> {
    let summary = unit::block_summary(t, m, n, r)?;
    let series = curve_series(t, m, n, r, ModelSpec::Unit)?
        .into_iter()
        .next()
        .ok_or_else(|| CurveError::config("model", "unit", "no series produced"))?;

    let midpoint = AnnotatedPoint {
        x: summary.midpoint_unit,
        value: summary.midpoint_hours,
        label: format!(
            "midpoint unit {:.1}: {:.2} per unit, {:.2} for the block",
            summary.midpoint_unit, summary.midpoint_hours, summary.block_hours
        ),
    };

    Ok(BlockSeries {
        series,
        midpoint,
        summary,
    })
}
