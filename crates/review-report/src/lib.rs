//! Review report building.
//!
//! Turns the raw per-filter summaries of one invocation into display
//! records and a ranking by review volume.

mod descriptor;
mod record;
mod report;

pub use descriptor::*;
pub use record::*;
pub use report::*;
