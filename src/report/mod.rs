//! Reporting utilities: formatted terminal output for computed records.

pub mod format;

pub use format::*;
