//! Proportional stock allocation for the Haibun workspace.
//!
//! Given customers with share ratios and demand ceilings, the [`Allocator`]
//! distributes a stock quantity in proportion to the ratios, hands stock freed
//! up by saturated customers to those that can still absorb it, and rounds the
//! result to whole units.
//!
//! ```
//! use haibun_core::{CustomerRecord, allocate};
//!
//! let mut customers = vec![
//!     CustomerRecord::new("north", 0.6, 100.0),
//!     CustomerRecord::new("south", 0.4, 20.0),
//! ];
//! allocate(&mut customers, 100.0).unwrap();
//! assert_eq!(customers[0].allocated, 80.0);
//! assert_eq!(customers[1].allocated, 20.0);
//! ```

/// Initial pass, redistribution rounds and final rounding
pub mod allocator;
/// Allocator settings
pub mod config;
/// Error types for allocation runs
pub mod error;
/// Per-record rounding and largest-remainder reconciliation
pub mod rounding;
/// Discretion split and run summaries
pub mod stock;

pub use allocator::{AllocationOutcome, Allocator, Termination, allocate};
pub use config::AllocatorConfig;
pub use error::{AllocationError, AllocationResult};
pub use stock::{StockSplit, sort_by_ratio, summarize};

pub use haibun_types::{AllocationSummary, CustomerRecord, RoundingMode};
