//! Element-wise evaluation over sequence inputs.
//!
//! Every formula input may be a scalar or a sequence. Sequences must all have
//! the same length; scalars are repeated against them. Mismatched sequence
//! lengths are rejected rather than recycled cyclically.
//!
//! Missing entries are `NaN`. With [`EvalOptions::na_rm`] they are dropped from
//! each sequence before broadcasting (which can change the lengths that have
//! to line up); otherwise they propagate into the corresponding results.

use tracing::warn;

use crate::domain::{EvalOptions, ModelKind};
use crate::error::CurveError;
use crate::math::rate;
use crate::models;

/// A scalar or a sequence of values for one formula input.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Seq(Vec<f64>),
}

impl Operand {
    /// Sequence length, or `None` for a scalar.
    pub fn seq_len(&self) -> Option<usize> {
        match self {
            Operand::Scalar(_) => None,
            Operand::Seq(values) => Some(values.len()),
        }
    }

    fn at(&self, i: usize) -> f64 {
        match self {
            Operand::Scalar(v) => *v,
            Operand::Seq(values) => values[i],
        }
    }

    fn without_missing(&self) -> Operand {
        match self {
            Operand::Scalar(v) => Operand::Scalar(*v),
            Operand::Seq(values) => {
                Operand::Seq(values.iter().copied().filter(|v| !v.is_nan()).collect())
            }
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<Vec<f64>> for Operand {
    fn from(values: Vec<f64>) -> Self {
        Operand::Seq(values)
    }
}

impl From<&[f64]> for Operand {
    fn from(values: &[f64]) -> Self {
        Operand::Seq(values.to_vec())
    }
}

/// Line up named operands into rows of `N` values.
///
/// All sequences must share one length; scalars are repeated. When every
/// operand is a scalar the result has exactly one row.
pub fn broadcast<const N: usize>(
    names: [&'static str; N],
    operands: [&Operand; N],
    opts: EvalOptions,
) -> Result<Vec<[f64; N]>, CurveError> {
    let operands: Vec<Operand> = if opts.na_rm {
        let filtered: Vec<Operand> = operands.iter().map(|o| o.without_missing()).collect();
        let changed: Vec<&str> = names
            .iter()
            .zip(operands.iter().zip(filtered.iter()))
            .filter(|(_, (before, after))| before.seq_len() != after.seq_len())
            .map(|(name, _)| *name)
            .collect();
        if !changed.is_empty() {
            warn!(
                operands = ?changed,
                "dropped missing values; sequence lengths changed before broadcasting"
            );
        }
        filtered
    } else {
        operands.iter().map(|&o| o.clone()).collect()
    };

    let lengths: Vec<(&str, usize)> = names
        .iter()
        .zip(operands.iter())
        .filter_map(|(name, o)| o.seq_len().map(|len| (*name, len)))
        .collect();

    let len = match lengths.first() {
        None => 1,
        Some(&(_, first)) => {
            if lengths.iter().any(|&(_, len)| len != first) {
                let layout = lengths
                    .iter()
                    .map(|(name, len)| format!("{name}={len}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(CurveError::config(
                    "sequence lengths",
                    layout,
                    "sequences must have equal length (scalars are repeated)",
                ));
            }
            first
        }
    };

    Ok((0..len)
        .map(|i| std::array::from_fn(|k| operands[k].at(i)))
        .collect())
}

/// Unit cost of `n` given the cost `t` of `m`, element-wise.
pub fn unit_costs(
    model: ModelKind,
    t: &Operand,
    m: &Operand,
    n: &Operand,
    r: &Operand,
    opts: EvalOptions,
) -> Result<Vec<f64>, CurveError> {
    broadcast(["t", "m", "n", "r"], [t, m, n, r], opts)?
        .into_iter()
        .map(|[t, m, n, r]| models::unit_cost(model, t, m, n, r))
        .collect()
}

/// Cumulative-average (Wright) unit costs, element-wise.
pub fn cumulative_average_unit_costs(
    t: &Operand,
    m: &Operand,
    n: &Operand,
    r: &Operand,
    opts: EvalOptions,
) -> Result<Vec<f64>, CurveError> {
    unit_costs(ModelKind::CumulativeAverage, t, m, n, r, opts)
}

/// Natural slopes of a sequence of learning rates.
pub fn natural_slopes(r: &[f64], opts: EvalOptions) -> Result<Vec<f64>, CurveError> {
    let r = Operand::from(r);
    broadcast(["r"], [&r], opts)?
        .into_iter()
        .map(|[r]| rate::natural_slope(r))
        .collect()
}

/// Learning rates of a sequence of natural slopes.
pub fn learning_rates(b: &[f64], opts: EvalOptions) -> Result<Vec<f64>, CurveError> {
    let b = Operand::from(b);
    Ok(broadcast(["b"], [&b], opts)?
        .into_iter()
        .map(|[b]| rate::learning_rate(b))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_broadcast_against_sequences() {
        let t = Operand::from(100.0);
        let m = Operand::from(1.0);
        let n = Operand::from(vec![1.0, 2.0, 4.0]);
        let r = Operand::from(0.8);

        let v = unit_costs(ModelKind::Unit, &t, &m, &n, &r, EvalOptions::default()).unwrap();
        assert_eq!(v.len(), 3);
        assert!((v[1] - 80.0).abs() < 1e-9);
        assert!((v[2] - 64.0).abs() < 1e-9);
    }

    #[test]
    fn cumulative_average_costs_follow_sequence_rates() {
        let t = Operand::from(100.0);
        let m = Operand::from(1.0);
        let n = Operand::from(vec![1.0, 2.0, f64::NAN]);
        let r = Operand::from(vec![0.8, 0.8, 0.9]);

        let v = cumulative_average_unit_costs(&t, &m, &n, &r, EvalOptions::default()).unwrap();
        assert_eq!(v.len(), 3);
        assert!((v[0] - 100.0).abs() < 1e-12);
        // Average of the first two units is 80, so unit 2 costs 160 - 100.
        assert!((v[1] - 60.0).abs() < 1e-9);
        assert!(v[2].is_nan());

        let low = Operand::from(vec![0.8, 0.4, 0.9]);
        assert!(matches!(
            cumulative_average_unit_costs(&t, &m, &n, &low, EvalOptions::default()),
            Err(CurveError::Domain { field: "r", .. })
        ));
    }

    #[test]
    fn all_scalars_give_one_row() {
        let rows = broadcast(
            ["a", "b"],
            [&Operand::from(1.0), &Operand::from(2.0)],
            EvalOptions::default(),
        )
        .unwrap();
        assert_eq!(rows, vec![[1.0, 2.0]]);
    }

    #[test]
    fn mismatched_sequences_are_rejected() {
        let err = broadcast(
            ["n", "r"],
            [
                &Operand::from(vec![1.0, 2.0, 3.0]),
                &Operand::from(vec![0.8, 0.9]),
            ],
            EvalOptions::default(),
        )
        .unwrap_err();
        match err {
            CurveError::Config { value, .. } => assert_eq!(value, "n=3, r=2"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_values_propagate_without_na_rm() {
        let slopes = natural_slopes(&[0.8, f64::NAN, 0.9], EvalOptions::default()).unwrap();
        assert_eq!(slopes.len(), 3);
        assert!(slopes[1].is_nan());
    }

    #[test]
    fn na_rm_drops_missing_values() {
        let slopes = natural_slopes(&[0.8, f64::NAN, 0.5], EvalOptions::drop_missing()).unwrap();
        assert_eq!(slopes.len(), 2);
        assert!((slopes[1] + 1.0).abs() < 1e-15);

        let rates = learning_rates(&[-1.0, f64::NAN], EvalOptions::drop_missing()).unwrap();
        assert_eq!(rates.len(), 1);
        assert!((rates[0] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn na_rm_can_expose_length_mismatch() {
        let n = Operand::from(vec![1.0, 2.0, 3.0]);
        let r = Operand::from(vec![0.8, f64::NAN, 0.9]);
        let t = Operand::from(10.0);
        assert!(unit_costs(ModelKind::Unit, &t, &t, &n, &r, EvalOptions::default()).is_ok());
        assert!(matches!(
            unit_costs(ModelKind::Unit, &t, &t, &n, &r, EvalOptions::drop_missing()),
            Err(CurveError::Config { .. })
        ));
    }
}
