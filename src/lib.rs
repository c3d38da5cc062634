//! `learning-curves` library crate.
//!
//! Production learning-curve estimates under two competing models:
//!
//! - Crawford's unit model ([`models::unit`]): unit cost is a power law of the unit index
//! - Wright's cumulative-average model ([`models::cumulative_average`]): the running
//!   average cost is a power law of the unit count
//!
//! Every operation is a pure function of its inputs. The binary (`lc`) is a thin
//! wrapper around this library so that the formulas are testable without spawning
//! processes.

pub mod app;
pub mod cli;
pub mod compare;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod series;
pub mod vectorized;

pub use domain::{
    BlockSummary, EvalOptions, Level, ModelKind, ModelSpec, PredictionGap, ProductionBlock,
};
pub use error::CurveError;
