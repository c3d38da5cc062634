//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - configuration enums (`ModelKind`, `ModelSpec`, `Level`, `EvalOptions`)
//! - block values (`ProductionBlock`, `BlockSummary`)
//! - comparison and fit outputs (`PredictionGap`, `AggregateCurve`, `FittedCurve`)
//! - plotting input records (`CurveSeries`, `BlockSeries`)
//! - input guards shared by every formula (`guards`)

pub mod guards;
pub mod types;

pub use types::*;
