//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - returned by the pure model functions
//! - printed or emitted as JSON by the CLI
//! - handed to a plotting consumer without further conversion

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::guards;
use crate::error::CurveError;

/// Concrete learning-curve model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Crawford: unit cost is a power law of the unit index.
    Unit,
    /// Wright: cumulative-average cost is a power law of the unit count.
    CumulativeAverage,
}

impl ModelKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Unit => "Crawford (unit)",
            ModelKind::CumulativeAverage => "Wright (cumulative average)",
        }
    }

    /// Stable identifier used in series records.
    pub fn key(self) -> &'static str {
        match self {
            ModelKind::Unit => "unit",
            ModelKind::CumulativeAverage => "cumulative_average",
        }
    }
}

/// Which model(s) to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModelSpec {
    Unit,
    #[value(name = "cumulative_average")]
    CumulativeAverage,
    Both,
}

impl ModelSpec {
    /// Concrete model kinds, in plotting order.
    pub fn kinds(self) -> &'static [ModelKind] {
        match self {
            ModelSpec::Unit => &[ModelKind::Unit],
            ModelSpec::CumulativeAverage => &[ModelKind::CumulativeAverage],
            ModelSpec::Both => &[ModelKind::Unit, ModelKind::CumulativeAverage],
        }
    }
}

impl FromStr for ModelSpec {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unit" => Ok(ModelSpec::Unit),
            "cumulative_average" => Ok(ModelSpec::CumulativeAverage),
            "both" => Ok(ModelSpec::Both),
            other => Err(CurveError::config(
                "model",
                other,
                "expected one of unit, cumulative_average, both",
            )),
        }
    }
}

/// Whether a per-unit sequence is reported as-is or as a running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Unit,
    Cumulative,
}

impl FromStr for Level {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unit" => Ok(Level::Unit),
            "cumulative" => Ok(Level::Cumulative),
            other => Err(CurveError::config(
                "level",
                other,
                "expected one of unit, cumulative",
            )),
        }
    }
}

/// Per-call evaluation options for sequence inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Drop missing (`NaN`) entries from each sequence before broadcasting.
    ///
    /// When `false`, missing entries propagate into the result.
    pub na_rm: bool,
}

impl EvalOptions {
    pub fn drop_missing() -> Self {
        Self { na_rm: true }
    }
}

/// Closed production interval `[m, n]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionBlock {
    pub m: f64,
    pub n: f64,
}

impl ProductionBlock {
    pub fn new(m: f64, n: f64) -> Result<Self, CurveError> {
        guards::positive("m", m)?;
        guards::positive("n", n)?;
        guards::ordered_block(m, n)?;
        Ok(Self { m, n })
    }

    /// Number of units in the block, `n - m + 1`.
    pub fn units(&self) -> f64 {
        self.n - self.m + 1.0
    }

    /// Unit indices `m, m+1, ...` up to and including `n`.
    ///
    /// Both bounds must be present, and the block must fit under
    /// [`guards::MAX_ENUMERATED_UNITS`].
    pub fn indices(&self) -> Result<impl Iterator<Item = f64> + '_, CurveError> {
        guards::present("m", self.m)?;
        guards::present("n", self.n)?;
        let count = guards::unit_count(self.m, self.n)?;
        Ok((0..count).map(move |i| self.m + i as f64))
    }
}

/// Summary of a production block under the unit (Crawford) model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub block_units: f64,
    pub block_hours: f64,
    pub midpoint_unit: f64,
    pub midpoint_hours: f64,
}

/// Relative prediction error from assuming the wrong learning rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PredictionGap {
    /// Both rates are equal; there is nothing to compare.
    SameRate,
    /// `n^(b2 - b1) - 1`, as a fraction.
    Relative(f64),
}

impl PredictionGap {
    /// The gap as a percentage, or `None` when the rates are equal.
    pub fn percent(self) -> Option<f64> {
        match self {
            PredictionGap::SameRate => None,
            PredictionGap::Relative(v) => Some(v * 100.0),
        }
    }
}

impl fmt::Display for PredictionGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionGap::SameRate => write!(f, "no difference (rates are equal)"),
            PredictionGap::Relative(v) => write!(f, "{:.4}%", v * 100.0),
        }
    }
}

/// Single power law matching the combined cumulative cost of several
/// departments at one horizon.
///
/// The fitted exponent is only valid at `horizon`; refit for other horizons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateCurve {
    pub horizon: f64,
    /// `H = sum(t)`.
    pub first_unit_total: f64,
    /// `t_i * n^(1 + b_i)` per department.
    pub department_hours: Vec<f64>,
    /// Sum of `department_hours`.
    pub hours_all: f64,
    /// Fitted `B` such that `H * n^B = hours_all`.
    pub exponent: f64,
    /// Equivalent natural slope, `B - 1`.
    pub natural_slope: f64,
    /// Equivalent learning rate, `2^(B - 1)`.
    pub learning_rate: f64,
    /// `H * n^B`.
    pub total_hours: f64,
}

/// Power law fitted to observed (unit, cost) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedCurve {
    pub first_unit_cost: f64,
    pub natural_slope: f64,
    pub learning_rate: f64,
    pub r_squared: f64,
    pub n_points: usize,
}

/// Numeric series handed to a plotting consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSeries {
    pub model: ModelKind,
    pub x: Vec<f64>,
    pub value: Vec<f64>,
    pub cumulative_value: Vec<f64>,
}

/// A single labelled point drawn on top of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPoint {
    pub x: f64,
    pub value: f64,
    pub label: String,
}

/// Series for a production block plus its midpoint annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSeries {
    pub series: CurveSeries,
    pub midpoint: AnnotatedPoint,
    pub summary: BlockSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_parse_from_closed_sets() {
        assert_eq!("cumulative".parse::<Level>().unwrap(), Level::Cumulative);
        assert_eq!("both".parse::<ModelSpec>().unwrap(), ModelSpec::Both);

        let err = "running".parse::<Level>().unwrap_err();
        assert!(matches!(err, CurveError::Config { option: "level", .. }));
        assert!("crawford".parse::<ModelSpec>().is_err());
    }

    #[test]
    fn block_counts_inclusive_units() {
        let block = ProductionBlock::new(201.0, 500.0).unwrap();
        assert_eq!(block.units(), 300.0);
        assert_eq!(block.indices().unwrap().count(), 300);
        assert_eq!(block.indices().unwrap().last(), Some(500.0));

        assert!(matches!(
            ProductionBlock::new(10.0, 5.0),
            Err(CurveError::Range { .. })
        ));
    }

    #[test]
    fn missing_or_oversized_blocks_cannot_be_enumerated() {
        let missing = ProductionBlock::new(f64::NAN, 5.0).unwrap();
        assert!(matches!(
            missing.indices().map(|it| it.count()),
            Err(CurveError::Domain { field: "m", .. })
        ));

        let huge = ProductionBlock::new(1.0, 1e20).unwrap();
        assert!(matches!(
            huge.indices().map(|it| it.count()),
            Err(CurveError::Domain { field: "n", .. })
        ));
    }

    #[test]
    fn same_rate_gap_has_no_percentage() {
        assert_eq!(PredictionGap::SameRate.percent(), None);
        let p = PredictionGap::Relative(0.25).percent().unwrap();
        assert!((p - 25.0).abs() < 1e-12);
    }
}
