//! Mathematical utilities: the least-squares line fit.

pub mod ols;

pub use ols::*;
