//! Model dispatch by [`ModelKind`].
//!
//! Comparison and series code call these two primitives:
//! - the cost of a single unit
//! - the total cost of a block of units
//!
//! For the unit model the block total is the exact sum, or the integral
//! approximation when `approx` is set; the cumulative-average model always
//! uses its closed form.

use crate::domain::ModelKind;
use crate::error::CurveError;
use crate::models::{cumulative_average, unit};

/// Cost of unit `n` given the cost `t` of unit `m`.
pub fn unit_cost(model: ModelKind, t: f64, m: f64, n: f64, r: f64) -> Result<f64, CurveError> {
    match model {
        ModelKind::Unit => unit::unit_cost(t, m, n, r),
        ModelKind::CumulativeAverage => cumulative_average::unit_cost(t, m, n, r),
    }
}

/// Total cost of units `m..=n`.
pub fn block_cost(
    model: ModelKind,
    t: f64,
    m: f64,
    n: f64,
    r: f64,
    approx: bool,
) -> Result<f64, CurveError> {
    match model {
        ModelKind::Unit if approx => unit::cumulative_approx(t, m, n, r),
        ModelKind::Unit => unit::cumulative_exact(t, m, n, r),
        ModelKind::CumulativeAverage => cumulative_average::block_cost(t, m, n, r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_agree_on_first_unit() {
        let a = unit_cost(ModelKind::Unit, 100.0, 1.0, 1.0, 0.8).unwrap();
        let b = unit_cost(ModelKind::CumulativeAverage, 100.0, 1.0, 1.0, 0.8).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn cumulative_average_model_learns_faster_per_unit() {
        // Wright unit costs sit below Crawford's for the same rate after unit 1.
        let a = unit_cost(ModelKind::Unit, 100.0, 1.0, 50.0, 0.85).unwrap();
        let b = unit_cost(ModelKind::CumulativeAverage, 100.0, 1.0, 50.0, 0.85).unwrap();
        assert!(b < a);

        let ta = block_cost(ModelKind::Unit, 100.0, 1.0, 50.0, 0.85, false).unwrap();
        let tb = block_cost(ModelKind::CumulativeAverage, 100.0, 1.0, 50.0, 0.85, false).unwrap();
        assert!(tb < ta);
    }

    #[test]
    fn approx_flag_selects_the_unit_total() {
        let exact = block_cost(ModelKind::Unit, 100.0, 1.0, 125.0, 0.85, false).unwrap();
        let approx = block_cost(ModelKind::Unit, 100.0, 1.0, 125.0, 0.85, true).unwrap();
        assert!((exact - 5201.085).abs() < 1e-3);
        assert_eq!(approx, unit::cumulative_approx(100.0, 1.0, 125.0, 0.85).unwrap());
        assert_ne!(exact, approx);

        let wright = |approx| block_cost(ModelKind::CumulativeAverage, 60.0, 1.0, 500.0, 0.9, approx);
        assert_eq!(wright(true).unwrap(), wright(false).unwrap());
    }
}
