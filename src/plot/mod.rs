//! Terminal plotting of curve series.

pub mod ascii;

pub use ascii::*;
