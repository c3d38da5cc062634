//! Mathematical utilities: rate/slope conversion and least squares.

pub mod ols;
pub mod rate;

pub use ols::*;
pub use rate::*;
