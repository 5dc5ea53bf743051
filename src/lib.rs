//! `gridiron-forecast` library crate.
//!
//! The binary (`standings`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the same pipeline feeds both the text report and the TUI

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod standings;
pub mod tui;
