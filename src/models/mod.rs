//! Win projection from the fitted league-wide line.
//!
//! The projection is a small, pure function so the pipeline, the report and the
//! TUI all derive identical numbers from the same model.

pub mod predictor;

pub use predictor::*;
