//! Terminal plotting of the touchdowns-vs-wins fit.

pub mod ascii;

pub use ascii::*;
