//! Curve fitting.
//!
//! Responsibilities:
//!
//! - fit one equivalent curve to several departments at a horizon (`aggregate`)
//! - estimate a curve from observed unit costs (`estimate`)

pub mod aggregate;
pub mod estimate;

pub use aggregate::*;
pub use estimate::*;
