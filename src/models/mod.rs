//! Learning-curve model implementations.
//!
//! Models are implemented as small, pure functions so that comparison,
//! series and fitting code can stay generic over the model kind.

pub mod cumulative_average;
pub mod model;
pub mod unit;

pub use model::*;
