//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - league structure (`Conference`, `Division`, `GroupKey`)
//! - raw and validated team records (`RawTeamRecord`, `TeamRecord`)
//! - derived views (`StandingEntry`, `PredictionEntry`, `GroupSet`)
//! - fit outputs (`RegressionModel`, `LinearFit`) and run configuration

pub mod types;

pub use types::*;
