//! Division grouping and ranking.
//!
//! - `grouper`: partition records into the 8 conference/division groups
//! - `ranker`: order a group by wins with a stable tie-break

pub mod grouper;
pub mod ranker;

pub use grouper::*;
pub use ranker::*;
