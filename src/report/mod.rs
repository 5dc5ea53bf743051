//! Reporting utilities: formatted terminal output for standings tables.
//!
//! We keep formatting code in one place so:
//! - the grouping/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

mod format;

pub use format::*;
