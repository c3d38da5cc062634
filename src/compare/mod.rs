//! Comparison between the unit (Crawford) and cumulative-average (Wright)
//! models, and the cost of assuming the wrong learning rate.

use tracing::debug;

use crate::domain::{guards, Level, ModelKind, PredictionGap, ProductionBlock};
use crate::error::CurveError;
use crate::math::rate::slope_of;
use crate::models::unit_cost;

/// Per-unit `unit - cumulative_average` cost difference for every unit in
/// `m..=n`, or its running total when `level` is [`Level::Cumulative`].
pub fn delta(t: f64, m: f64, n: f64, r: f64, level: Level) -> Result<Vec<f64>, CurveError> {
    guards::block_inputs(t, m, n, r)?;
    let block = ProductionBlock::new(m, n)?;

    let per_unit = block
        .indices()?
        .map(|i| {
            let crawford = unit_cost(ModelKind::Unit, t, m, i, r)?;
            let wright = unit_cost(ModelKind::CumulativeAverage, t, m, i, r)?;
            Ok(crawford - wright)
        })
        .collect::<Result<Vec<f64>, CurveError>>()?;

    Ok(match level {
        Level::Unit => per_unit,
        Level::Cumulative => running_sum(&per_unit),
    })
}

/// Relative error in the predicted cost of unit `n` from using rate `r1`
/// when `r2` was correct: `n^(b2 - b1) - 1`.
///
/// Equal rates short-circuit to [`PredictionGap::SameRate`].
pub fn prediction_error(n: f64, r1: f64, r2: f64) -> Result<PredictionGap, CurveError> {
    guards::positive("n", n)?;
    guards::positive("r1", r1)?;
    guards::positive("r2", r2)?;
    if r1 == r2 {
        return Ok(PredictionGap::SameRate);
    }

    let (b1, b2) = (slope_of(r1), slope_of(r2));
    let gap = n.powf(b2 - b1) - 1.0;
    debug!(n, b1, b2, gap, "prediction error");
    Ok(PredictionGap::Relative(gap))
}

pub(crate) fn running_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_zero_at_reference_unit() {
        let d = delta(100.0, 1.0, 3.0, 0.8, Level::Unit).unwrap();
        assert_eq!(d.len(), 3);
        assert!(d[0].abs() < 1e-12);
        assert!((d[1] - 20.0).abs() < 1e-9);
        assert!((d[2] - 19.579_259_444).abs() < 1e-6);
    }

    #[test]
    fn cumulative_level_is_running_total() {
        let unit = delta(100.0, 1.0, 20.0, 0.85, Level::Unit).unwrap();
        let cum = delta(100.0, 1.0, 20.0, 0.85, Level::Cumulative).unwrap();
        let total: f64 = unit.iter().sum();
        assert!((cum[cum.len() - 1] - total).abs() < 1e-9);
        assert!(cum.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn delta_rejects_reversed_block_and_unknown_level() {
        assert!(matches!(
            delta(100.0, 10.0, 5.0, 0.8, Level::Unit),
            Err(CurveError::Range { .. })
        ));
        assert!(matches!(
            "total".parse::<Level>(),
            Err(CurveError::Config { .. })
        ));
    }

    #[test]
    fn missing_rate_fills_every_unit() {
        let d = delta(100.0, 1.0, 4.0, f64::NAN, Level::Unit).unwrap();
        assert_eq!(d.len(), 4);
        assert!(d.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn missing_block_bound_is_rejected() {
        assert!(matches!(
            delta(100.0, 1.0, f64::NAN, 0.8, Level::Unit),
            Err(CurveError::Domain { field: "n", .. })
        ));
        assert!(matches!(
            delta(100.0, 1.0, 1e20, 0.8, Level::Cumulative),
            Err(CurveError::Domain { field: "n", .. })
        ));
    }

    #[test]
    fn prediction_error_matches_closed_form() {
        let gap = prediction_error(100.0, 0.85, 0.8).unwrap();
        match gap {
            PredictionGap::Relative(v) => assert!((v - 0.495_979_638_6).abs() < 1e-8),
            PredictionGap::SameRate => panic!("rates differ"),
        }
    }

    #[test]
    fn equal_rates_short_circuit() {
        assert_eq!(
            prediction_error(250.0, 0.9, 0.9).unwrap(),
            PredictionGap::SameRate
        );
    }
}
