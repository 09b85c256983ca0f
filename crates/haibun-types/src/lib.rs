//! Haibun Types
//!
//! This crate defines the plain data shared across the Haibun workspace
//! (currently `haibun-core` and `haibun-cli`): the customer allocation record,
//! the rounding policy and the summary figures reported after a run.

#![warn(missing_docs)]

mod types;
pub use types::{AllocationSummary, CustomerRecord, RoundingMode};
